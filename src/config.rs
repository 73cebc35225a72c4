use crate::stream::constants::{
    DEFAULT_TRUNCATED_RECORD_TERMINATOR, MAX_PARTITION_KEY_LENGTH, MAX_RECORD_SIZE_BYTES,
};
use crate::stream::PartitionKeyStrategy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration of one flow: how records tailed from a set of source
/// files map onto a destination stream.
///
/// How this is loaded from disk is the configuration subsystem's concern;
/// this crate only defines the typed surface a flow hands to record
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Glob pattern selecting the files this flow tails.
    pub file_pattern: String,
    /// Name of the destination stream.
    pub destination_stream: String,
    #[serde(default)]
    pub partition_key_strategy: PartitionKeyStrategy,
    #[serde(default = "default_truncated_record_terminator")]
    pub truncated_record_terminator: String,
}

impl FlowConfig {
    /// Rejects flow definitions that cannot produce valid records.
    ///
    /// Configuration problems are fatal to the flow and surface
    /// immediately; they are never silently defaulted.
    pub fn validate(&self) -> Result<()> {
        if self.file_pattern.is_empty() {
            return Err(Error::Config("file_pattern must not be empty".to_string()));
        }
        if self.destination_stream.is_empty() {
            return Err(Error::Config(
                "destination_stream must not be empty".to_string(),
            ));
        }
        if let PartitionKeyStrategy::FieldExtraction(identifier) = &self.partition_key_strategy {
            if identifier.is_empty() {
                return Err(Error::Config(
                    "field-extraction partition keying requires a field identifier".to_string(),
                ));
            }
        }
        // The partition key shares the record's size budget, so the
        // terminator must fit even next to a maximum-length key.
        if self.truncated_record_terminator.len() > MAX_RECORD_SIZE_BYTES - MAX_PARTITION_KEY_LENGTH
        {
            return Err(Error::Config(format!(
                "truncated_record_terminator of {} bytes cannot fit inside a truncated record",
                self.truncated_record_terminator.len()
            )));
        }
        Ok(())
    }
}

fn default_truncated_record_terminator() -> String {
    DEFAULT_TRUNCATED_RECORD_TERMINATOR.to_string()
}
