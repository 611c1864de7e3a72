use serde::Serialize;
use serde_json::Value;

use crate::identifier::{IdentifierPolicy, RecordId};
use crate::validation::Validate;

/// A record type exposed by the backend under `/<COLLECTION>`.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    /// Fields submitted on creation; never carries an id.
    type Draft: Clone + Serialize + Validate + Send + Sync;

    const COLLECTION: &'static str;
    const NOT_FOUND_MESSAGE: &'static str;

    fn id(&self) -> &RecordId;

    /// Field used for searching and for labels.
    fn display_field(&self) -> &str;

    /// Build from a raw backend record, normalizing identifiers with `policy`.
    /// Returns `None` when the record fails the shape check.
    fn from_raw(raw: &Value, policy: IdentifierPolicy) -> Option<Self>;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    fn with_id(self, id: RecordId) -> Self;
}

/// Non-empty string field of a raw record.
pub(crate) fn text_field<'a>(raw: &'a Value, field: &str) -> Option<&'a str> {
    raw.get(field).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}
