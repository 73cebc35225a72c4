pub mod buffer;
pub mod config;
pub mod error;

pub mod stream;
pub mod tailing;

pub use buffer::RecordData;
pub use config::FlowConfig;
pub use error::{Error, Result};
pub use stream::{PartitionKeyStrategy, RecordSender, StreamRecord};
pub use tailing::{SourceChunk, TrackedSource};
