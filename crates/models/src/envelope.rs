//! Collection payload shapes returned by `GET /<collection>`.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Known response envelopes, tried in order; anything else is `Unknown`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Bare(Vec<Value>),
    Data { data: Vec<Value> },
    Content { content: Vec<Value> },
    Unknown(IgnoredAny),
}

impl Envelope {
    pub fn decode(payload: Value) -> Self {
        serde_json::from_value(payload).unwrap_or(Envelope::Unknown(IgnoredAny))
    }

    /// Records carried by the envelope; an unknown shape carries none.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Envelope::Bare(items) => items,
            Envelope::Data { data } => data,
            Envelope::Content { content } => content,
            Envelope::Unknown(_) => {
                warn!("unrecognized collection payload; treating as empty");
                Vec::new()
            }
        }
    }
}

pub fn decode_records(payload: Value) -> Vec<Value> {
    Envelope::decode(payload).into_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        assert_eq!(decode_records(json!([{"id": 1}, {"id": 2}])).len(), 2);
    }

    #[test]
    fn data_envelope_with_paging_metadata() {
        let payload = json!({"first": 1, "pages": 1, "items": 1, "data": [{"id": "a"}]});
        assert_eq!(decode_records(payload), vec![json!({"id": "a"})]);
    }

    #[test]
    fn content_envelope() {
        assert_eq!(decode_records(json!({"content": [{"id": 1}]})).len(), 1);
    }

    #[test]
    fn unknown_shapes_degrade_to_empty() {
        assert!(decode_records(json!({"data": "oops"})).is_empty());
        assert!(decode_records(json!({"items": []})).is_empty());
        assert!(decode_records(json!("text")).is_empty());
        assert!(decode_records(Value::Null).is_empty());
    }
}
