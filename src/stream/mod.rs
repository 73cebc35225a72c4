pub mod constants;
pub mod partition_key;
pub mod record;
pub mod sender;

pub use partition_key::PartitionKeyStrategy;
pub use record::StreamRecord;
pub use sender::RecordSender;
