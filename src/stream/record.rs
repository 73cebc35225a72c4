//! Stream records: a payload slice plus routing key and offset metadata,
//! sized to the transport-protocol contract.

use crate::buffer::RecordData;
use crate::stream::constants::{MAX_RECORD_SIZE_BYTES, PER_RECORD_OVERHEAD_BYTES};
use crate::tailing::TrackedSource;
use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use std::sync::{Arc, Weak};
use tracing::debug;

/// A single record ready for transmission to the stream service.
///
/// A record is built once per tailed chunk and is immutable afterwards,
/// except for [`truncate`](StreamRecord::truncate), which replaces the
/// payload with a shorter one. The partition key is derived from the
/// payload at construction time and never recomputed: truncation must not
/// invalidate a key already derived from the content.
#[derive(Debug)]
pub struct StreamRecord {
    source: Weak<TrackedSource>,
    source_offset: u64,
    original_length: u64,
    payload: Bytes,
    partition_key: Option<String>,
    truncation_terminator: Bytes,
}

impl StreamRecord {
    /// Builds a record from a chunk the tailing subsystem read at
    /// `offset` in the source file.
    ///
    /// `data` may be a flat byte array or a view over a shared backing
    /// buffer; both normalize to one owned payload. `original_length` is
    /// the chunk's length in the source before any copying or truncation.
    ///
    /// The owning flow's partition key strategy runs here, once. A strategy
    /// that fails to produce a key leaves the record keyless rather than
    /// failing construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceDetached`] when `source` no longer points at
    /// a live tracked source.
    pub fn new(
        source: Weak<TrackedSource>,
        offset: u64,
        data: impl Into<RecordData>,
        original_length: u64,
    ) -> Result<Self> {
        let tracked = source.upgrade().ok_or(Error::SourceDetached)?;
        let payload = data.into().into_bytes();

        let flow = tracked.flow();
        let partition_key = flow.partition_key_strategy.generate_key(&payload);
        let truncation_terminator =
            Bytes::copy_from_slice(flow.truncated_record_terminator.as_bytes());

        Ok(Self {
            source,
            source_offset: offset,
            original_length,
            payload,
            partition_key,
            truncation_terminator,
        })
    }

    /// Offset in the source file where this record's data began.
    pub fn start_offset(&self) -> u64 {
        self.source_offset
    }

    /// Offset in the source file just past this record's original data.
    pub fn end_offset(&self) -> u64 {
        self.source_offset + self.original_length
    }

    /// Payload length plus partition key length.
    pub fn length(&self) -> u64 {
        self.payload.len() as u64 + self.partition_key_length() as u64
    }

    /// [`length`](StreamRecord::length) plus the fixed per-record framing
    /// cost of the transport protocol.
    pub fn length_with_overhead(&self) -> u64 {
        self.length() + PER_RECORD_OVERHEAD_BYTES as u64
    }

    /// The partition key derived at construction, if any.
    pub fn partition_key(&self) -> Option<&str> {
        self.partition_key.as_deref()
    }

    /// Length of the partition key, 0 when absent.
    pub fn partition_key_length(&self) -> usize {
        self.partition_key.as_ref().map_or(0, |key| key.len())
    }

    /// Largest payload this record may carry. The key shares the record's
    /// fixed size budget, so the bound shrinks with the key length.
    pub fn max_data_size(&self) -> usize {
        MAX_RECORD_SIZE_BYTES - self.partition_key_length()
    }

    /// Shrinks an oversize payload to exactly
    /// [`max_data_size`](StreamRecord::max_data_size) bytes, ending with
    /// the flow's truncation terminator.
    ///
    /// A no-op when the payload already fits, so repeated calls are safe.
    /// The partition key is left untouched.
    pub fn truncate(&mut self) {
        let max = self.max_data_size();
        if self.payload.len() <= max {
            return;
        }

        debug!(
            payload_len = self.payload.len(),
            max_data_size = max,
            "truncating oversize record"
        );
        // A terminator wider than the size budget keeps only its tail;
        // either way the result is exactly `max` bytes.
        let keep = max.saturating_sub(self.truncation_terminator.len());
        let marker_len = max - keep;
        let marker =
            &self.truncation_terminator[self.truncation_terminator.len() - marker_len..];
        let mut truncated = BytesMut::with_capacity(max);
        truncated.extend_from_slice(&self.payload[..keep]);
        truncated.extend_from_slice(marker);
        self.payload = truncated.freeze();
    }

    /// The finalized payload bytes handed to the sender.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The tracked source this record came from, if it is still live.
    /// Non-owning: records never keep a dropped source alive.
    pub fn source(&self) -> Option<Arc<TrackedSource>> {
        self.source.upgrade()
    }
}
