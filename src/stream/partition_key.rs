use md5::{Digest, Md5};
use rand::Rng as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// How a routing key is derived from a record's payload.
///
/// Selected per flow in [`FlowConfig`](crate::config::FlowConfig). Key
/// generation is stateless and never mutates the payload; every strategy
/// except `Random` is deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "field")]
pub enum PartitionKeyStrategy {
    /// MD5 digest of the payload bytes, hex-encoded. Identical content
    /// always lands on the same shard.
    ContentHash,
    /// A uniform random decimal number per record, to spread records
    /// evenly across shards.
    Random,
    /// The value of the named top-level field in the payload's first JSON
    /// object.
    FieldExtraction(String),
    /// No key.
    #[default]
    None,
}

impl PartitionKeyStrategy {
    /// Derives a partition key from `payload`, or `None` when the strategy
    /// produces no key.
    ///
    /// Malformed payload content never fails the caller: field extraction
    /// over invalid JSON, a missing field, or a null value all degrade to
    /// `None` and are logged. The single bad record loses its key; the
    /// rest of the file keeps flowing.
    pub fn generate_key(&self, payload: &[u8]) -> Option<String> {
        match self {
            PartitionKeyStrategy::ContentHash => {
                let mut hasher = Md5::new();
                hasher.update(payload);
                Some(hex::encode(hasher.finalize()))
            }

            PartitionKeyStrategy::Random => {
                // Thread-local generator: concurrent tailing threads draw
                // independent streams, no shared lock on the hot path.
                Some(rand::rng().random::<u64>().to_string())
            }

            PartitionKeyStrategy::FieldExtraction(identifier) => {
                extract_field_value(payload, identifier)
            }

            PartitionKeyStrategy::None => None,
        }
    }
}

/// Scans `payload` as a stream of concatenated JSON values and returns the
/// textual value of the top-level field `identifier` in the first value.
///
/// The payload may be a fragment cut out of a larger stream, so trailing
/// garbage after the first complete value is ignored. Only the first value
/// is inspected; if it is not an object, or the field is absent, the key is
/// absent.
fn extract_field_value(payload: &[u8], identifier: &str) -> Option<String> {
    let mut values = serde_json::Deserializer::from_slice(payload).into_iter::<Value>();

    let first = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            warn!(error = %e, "failed to generate partition key: payload is not valid JSON");
            return None;
        }
        None => {
            debug!("empty payload, no partition key");
            return None;
        }
    };

    let object = match first {
        Value::Object(object) => object,
        other => {
            debug!(
                "payload is a JSON {} rather than an object, no partition key",
                json_type_name(&other)
            );
            return None;
        }
    };

    match object.get(identifier) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null) | None => {
            debug!("field '{}' not found in payload", identifier);
            None
        }
        Some(other) => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
