use crate::stream::StreamRecord;
use crate::Result;

/// The transport collaborator that ships finalized records to the stream
/// service.
///
/// Taking the record by value transfers exclusive ownership: the sender
/// decides batching, retries, disposal, and the fallback policy for
/// keyless records. Implementations live outside this crate.
pub trait RecordSender {
    fn send(&mut self, record: StreamRecord) -> Result<()>;
}
