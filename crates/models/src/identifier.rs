//! Record identifiers and the two normalization policies.
//!
//! Backends in the wild return ids as numbers, numeric strings or short
//! hashes (`"f8e6"`). Everything that crosses the service boundary is
//! passed through one [`IdentifierPolicy`] first.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use configs::IdentifierPolicy;

/// Upper bound (exclusive) for hash-derived numeric ids.
pub const HASHED_ID_RANGE: i64 = 10_000;

/// Canonical identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Not created yet. Serializes as `null`.
    #[default]
    New,
    Number(i64),
    Text(String),
}

impl RecordId {
    pub fn is_new(&self) -> bool { matches!(self, RecordId::New) }

    pub fn to_value(&self) -> Value {
        match self {
            RecordId::New => Value::Null,
            RecordId::Number(n) => Value::from(*n),
            RecordId::Text(s) => Value::String(s.clone()),
        }
    }

    /// Compare by textual form, so `7` and `"7"` refer to the same record.
    pub fn matches(&self, other: &RecordId) -> bool {
        !self.is_new() && !other.is_new() && self.to_string() == other.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::New => Ok(()),
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self { RecordId::Number(n) }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self { RecordId::Text(s.to_string()) }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self { RecordId::Text(s) }
}

/// Canonicalization of raw identifier values. Total, pure and idempotent.
pub trait Normalize {
    fn normalize(&self, raw: Option<&Value>) -> RecordId;

    fn normalize_id(&self, id: &RecordId) -> RecordId {
        self.normalize(Some(&id.to_value()))
    }
}

impl Normalize for IdentifierPolicy {
    fn normalize(&self, raw: Option<&Value>) -> RecordId {
        match self {
            IdentifierPolicy::Numeric => normalize_numeric(raw),
            IdentifierPolicy::Preserving => normalize_preserving(raw),
        }
    }
}

/// Everything becomes a number. Absent ids map to `0`.
pub fn normalize_numeric(raw: Option<&Value>) -> RecordId {
    let n = match raw {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| stable_hash(&n.to_string())),
        Some(Value::String(s)) => s.parse::<i64>().unwrap_or_else(|_| stable_hash(s)),
        Some(other) => stable_hash(&other.to_string()),
    };
    RecordId::Number(n)
}

/// Keep the native shape. Absent or blank ids become [`RecordId::New`].
pub fn normalize_preserving(raw: Option<&Value>) -> RecordId {
    match raw {
        None | Some(Value::Null) => RecordId::New,
        Some(Value::String(s)) if s.trim().is_empty() => RecordId::New,
        Some(Value::String(s)) => RecordId::Text(s.clone()),
        Some(Value::Number(n)) => n.as_i64().map(RecordId::Number).unwrap_or_else(|| RecordId::Text(n.to_string())),
        Some(other) => RecordId::Text(other.to_string()),
    }
}

/// 31-polynomial string hash over UTF-16 code units with 32-bit wrap-around,
/// folded into `0..HASHED_ID_RANGE`.
pub fn stable_hash(s: &str) -> i64 {
    let h = s
        .encode_utf16()
        .fold(0i32, |h, unit| (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit)));
    i64::from(h).abs() % HASHED_ID_RANGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples() -> Vec<Option<Value>> {
        vec![
            None,
            Some(Value::Null),
            Some(json!(42)),
            Some(json!(-3)),
            Some(json!(1.5)),
            Some(json!(u64::MAX)),
            Some(json!("17")),
            Some(json!("f8e6")),
            Some(json!("")),
            Some(json!("   ")),
            Some(json!("São Paulo")),
            Some(json!(true)),
            Some(json!({"nested": 1})),
            Some(json!([1, 2])),
        ]
    }

    #[test]
    fn hash_is_deterministic_and_bounded() {
        assert_eq!(stable_hash("abc"), 6354);
        assert_eq!(stable_hash("f8e6"), 5683);
        assert_eq!(stable_hash(""), 0);
        let long = "x".repeat(500);
        let h = stable_hash(&long);
        assert!((0..HASHED_ID_RANGE).contains(&h));
        assert_eq!(h, stable_hash(&long));
    }

    #[test]
    fn numeric_policy_coerces_every_shape() {
        assert_eq!(normalize_numeric(None), RecordId::Number(0));
        assert_eq!(normalize_numeric(Some(&json!(9))), RecordId::Number(9));
        assert_eq!(normalize_numeric(Some(&json!("12"))), RecordId::Number(12));
        assert_eq!(normalize_numeric(Some(&json!("f8e6"))), RecordId::Number(5683));
        // partial numerics are hashed, not truncated
        assert_eq!(normalize_numeric(Some(&json!("12abc"))), RecordId::Number(stable_hash("12abc")));
    }

    #[test]
    fn preserving_policy_keeps_native_shape() {
        assert_eq!(normalize_preserving(None), RecordId::New);
        assert_eq!(normalize_preserving(Some(&json!(""))), RecordId::New);
        assert_eq!(normalize_preserving(Some(&json!(3))), RecordId::Number(3));
        assert_eq!(normalize_preserving(Some(&json!("3"))), RecordId::Text("3".into()));
        assert_eq!(normalize_preserving(Some(&json!("f8e6"))), RecordId::Text("f8e6".into()));
    }

    #[test]
    fn both_policies_are_idempotent() {
        for policy in [IdentifierPolicy::Numeric, IdentifierPolicy::Preserving] {
            for raw in samples() {
                let once = policy.normalize(raw.as_ref());
                assert_eq!(policy.normalize_id(&once), once, "{policy:?} on {raw:?}");
            }
        }
    }

    #[test]
    fn new_sentinel_serializes_as_null() {
        assert_eq!(serde_json::to_value(RecordId::New).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(RecordId::from("ab")).unwrap(), json!("ab"));
        let back: RecordId = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(back, RecordId::Number(5));
        let back: RecordId = serde_json::from_value(Value::Null).unwrap();
        assert!(back.is_new());
    }

    #[test]
    fn matches_across_shapes_by_text() {
        assert!(RecordId::Number(7).matches(&RecordId::from("7")));
        assert!(!RecordId::Number(7).matches(&RecordId::from("8")));
        assert!(!RecordId::New.matches(&RecordId::New));
    }
}
