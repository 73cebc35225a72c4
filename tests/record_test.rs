use bytes::Bytes;
use std::sync::Arc;
use tailstream::stream::constants::{MAX_RECORD_SIZE_BYTES, PER_RECORD_OVERHEAD_BYTES};
use tailstream::{
    Error, FlowConfig, PartitionKeyStrategy, RecordData, SourceChunk, StreamRecord, TrackedSource,
};

fn tailed_file(strategy: PartitionKeyStrategy) -> Arc<TrackedSource> {
    let flow = FlowConfig {
        file_pattern: "/var/log/app/*.log".to_string(),
        destination_stream: "app-events".to_string(),
        partition_key_strategy: strategy,
        truncated_record_terminator: "\n".to_string(),
    };
    flow.validate().unwrap();
    Arc::new(TrackedSource::new(
        "/var/log/app/current.log",
        Arc::new(flow),
    ))
}

#[test]
fn test_offset_span() {
    let source = tailed_file(PartitionKeyStrategy::Random);

    let record = StreamRecord::new(Arc::downgrade(&source), 1023, vec![0u8; 100], 100).unwrap();

    assert_eq!(record.start_offset(), 1023);
    assert_eq!(record.end_offset(), 1123);
}

#[test]
fn test_size_accounting_identities() {
    let source = tailed_file(PartitionKeyStrategy::ContentHash);

    let record = StreamRecord::new(Arc::downgrade(&source), 0, vec![b'a'; 500], 500).unwrap();

    let key_length = record.partition_key_length() as u64;
    assert_eq!(record.length(), 500 + key_length);
    assert_eq!(
        record.length_with_overhead(),
        record.length() + PER_RECORD_OVERHEAD_BYTES as u64
    );
    assert_eq!(
        record.max_data_size(),
        MAX_RECORD_SIZE_BYTES - record.partition_key_length()
    );
}

#[test]
fn test_truncate_one_byte_over_maximum() {
    let source = tailed_file(PartitionKeyStrategy::Random);
    let data = vec![b'z'; MAX_RECORD_SIZE_BYTES + 1];
    let original_length = data.len() as u64;

    let mut record =
        StreamRecord::new(Arc::downgrade(&source), 0, data, original_length).unwrap();
    record.truncate();

    assert_eq!(record.length(), MAX_RECORD_SIZE_BYTES as u64);
    assert_eq!(
        record.length_with_overhead(),
        (MAX_RECORD_SIZE_BYTES + PER_RECORD_OVERHEAD_BYTES) as u64
    );
    assert!(record.payload().ends_with(b"\n"));

    // Truncating again changes nothing.
    let payload = record.payload().clone();
    record.truncate();
    assert_eq!(record.payload(), &payload);
}

#[test]
fn test_truncate_with_multi_byte_terminator() {
    let flow = FlowConfig {
        file_pattern: "/var/log/app/*.log".to_string(),
        destination_stream: "app-events".to_string(),
        partition_key_strategy: PartitionKeyStrategy::Random,
        truncated_record_terminator: "[TRUNCATED]\n".to_string(),
    };
    flow.validate().unwrap();
    let source = Arc::new(TrackedSource::new(
        "/var/log/app/current.log",
        Arc::new(flow),
    ));
    let data = vec![b'z'; MAX_RECORD_SIZE_BYTES + 100];
    let original_length = data.len() as u64;

    let mut record =
        StreamRecord::new(Arc::downgrade(&source), 0, data, original_length).unwrap();
    record.truncate();

    assert_eq!(record.length(), MAX_RECORD_SIZE_BYTES as u64);
    assert!(record.payload().ends_with(b"[TRUNCATED]\n"));
}

#[test]
fn test_content_hash_colocates_identical_content() {
    let source = tailed_file(PartitionKeyStrategy::ContentHash);
    let line = b"2024-01-01T00:00:00Z ERROR connection reset".as_slice();

    let first = StreamRecord::new(Arc::downgrade(&source), 0, line, 43).unwrap();
    let second = StreamRecord::new(Arc::downgrade(&source), 43, line, 43).unwrap();
    let other =
        StreamRecord::new(Arc::downgrade(&source), 86, b"different line".as_slice(), 14).unwrap();

    assert_eq!(first.partition_key(), second.partition_key());
    assert_ne!(first.partition_key(), other.partition_key());
}

#[test]
fn test_field_extraction_from_buffer_view() {
    let source = tailed_file(PartitionKeyStrategy::FieldExtraction("userId".to_string()));
    let backing = Bytes::from_static(
        br#"{"userId": "12345", "name": "John"},{"userId": "34567", "name": "Doe"}"#,
    );

    let chunk = SourceChunk {
        source: Arc::downgrade(&source),
        offset: 1023,
        data: RecordData::view(backing, 36, 34),
        original_length: 34,
    };
    let record = chunk.into_record().unwrap();

    assert_eq!(record.partition_key(), Some("34567"));
}

#[test]
fn test_malformed_payload_degrades_to_keyless_record() {
    let source = tailed_file(PartitionKeyStrategy::FieldExtraction("userId".to_string()));

    let record =
        StreamRecord::new(Arc::downgrade(&source), 0, b"invalid json".as_slice(), 12).unwrap();

    assert_eq!(record.partition_key(), None);
    assert_eq!(record.partition_key_length(), 0);
    assert_eq!(record.length(), 12);
}

#[test]
fn test_dropped_source_fails_construction() {
    let source = tailed_file(PartitionKeyStrategy::None);
    let chunk = SourceChunk {
        source: Arc::downgrade(&source),
        offset: 0,
        data: RecordData::from(vec![0u8; 8]),
        original_length: 8,
    };
    drop(source);

    assert!(matches!(chunk.into_record(), Err(Error::SourceDetached)));
}
