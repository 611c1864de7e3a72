use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifier::{IdentifierPolicy, Normalize, RecordId};
use crate::resource::{text_field, Resource};
use crate::validation::{has_min_length, FieldErrors, Validate};

pub const MIN_NAME_LENGTH: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub id: RecordId,
    pub nome: String,
}

/// Creation input: the backend assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
    pub nome: String,
}

impl NewCity {
    pub fn new(nome: impl Into<String>) -> Self { Self { nome: nome.into() } }
}

impl Validate for NewCity {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errs = FieldErrors::new();
        if !has_min_length(&self.nome, MIN_NAME_LENGTH) {
            errs.add("nome", "Nome deve ter pelo menos 3 caracteres");
        }
        errs.into_result()
    }
}

impl Resource for City {
    type Draft = NewCity;

    const COLLECTION: &'static str = "cidades";
    const NOT_FOUND_MESSAGE: &'static str = "Cidade não encontrada.";

    fn id(&self) -> &RecordId { &self.id }

    fn display_field(&self) -> &str { &self.nome }

    fn from_raw(raw: &Value, policy: IdentifierPolicy) -> Option<Self> {
        let nome = text_field(raw, "nome")?;
        Some(City { id: policy.normalize(raw.get("id")), nome: nome.to_string() })
    }

    fn from_draft(id: RecordId, draft: NewCity) -> Self { City { id, nome: draft.nome } }

    fn with_id(self, id: RecordId) -> Self { City { id, ..self } }
}
