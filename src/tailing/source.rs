//! Boundary types owned by the file-tailing collaborator.
//!
//! The tailing subsystem tracks each tailed file as a [`TrackedSource`]
//! and hands chunks over as [`SourceChunk`] tuples. Records hold only a
//! weak handle back to their source: the tailer owns source lifetime, and
//! dropping a source (file rotated away, flow removed) must not be kept
//! alive by in-flight records.

use crate::buffer::RecordData;
use crate::config::FlowConfig;
use crate::stream::StreamRecord;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

/// A file currently tailed under some flow.
#[derive(Debug)]
pub struct TrackedSource {
    path: PathBuf,
    flow: Arc<FlowConfig>,
}

impl TrackedSource {
    pub fn new(path: impl Into<PathBuf>, flow: Arc<FlowConfig>) -> Self {
        Self {
            path: path.into(),
            flow,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The flow this source feeds. Read-only: record construction reads
    /// the keying strategy and terminator from here, nothing writes back.
    pub fn flow(&self) -> &FlowConfig {
        &self.flow
    }
}

/// One chunk read from a tracked source, as handed to record construction:
/// the owning source handle, the byte offset the chunk started at, the
/// payload bytes, and the chunk's length before any copying.
#[derive(Debug)]
pub struct SourceChunk {
    pub source: Weak<TrackedSource>,
    pub offset: u64,
    pub data: RecordData,
    pub original_length: u64,
}

impl SourceChunk {
    /// Builds the stream record for this chunk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceDetached`](crate::Error::SourceDetached)
    /// when the source was dropped before the chunk was processed.
    pub fn into_record(self) -> Result<StreamRecord> {
        StreamRecord::new(self.source, self.offset, self.data, self.original_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::PartitionKeyStrategy;

    #[test]
    fn test_chunk_into_record() {
        let flow = FlowConfig {
            file_pattern: "/var/log/app/*.log".to_string(),
            destination_stream: "app-events".to_string(),
            partition_key_strategy: PartitionKeyStrategy::FieldExtraction("userId".to_string()),
            truncated_record_terminator: "\n".to_string(),
        };
        let source = Arc::new(TrackedSource::new(
            "/var/log/app/current.log",
            Arc::new(flow),
        ));

        let chunk = SourceChunk {
            source: Arc::downgrade(&source),
            offset: 512,
            data: RecordData::from(br#"{"userId": "34567"}"#.as_slice()),
            original_length: 19,
        };
        let record = chunk.into_record().unwrap();

        assert_eq!(record.start_offset(), 512);
        assert_eq!(record.end_offset(), 531);
        assert_eq!(record.partition_key(), Some("34567"));
        assert_eq!(
            record.source().unwrap().path(),
            Path::new("/var/log/app/current.log")
        );
    }
}
