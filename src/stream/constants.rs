//! Limits owned by the transport-protocol contract with the stream service.

/// Maximum size of a single record, partition key included.
pub const MAX_RECORD_SIZE_BYTES: usize = 1_048_576;

/// Fixed per-record framing cost the stream service counts on the wire,
/// on top of payload and key bytes.
pub const PER_RECORD_OVERHEAD_BYTES: usize = 2;

/// Longest partition key the stream service accepts.
pub const MAX_PARTITION_KEY_LENGTH: usize = 256;

/// Marker appended to a payload when it is truncated to fit the record
/// size limit.
pub const DEFAULT_TRUNCATED_RECORD_TERMINATOR: &str = "\n";
