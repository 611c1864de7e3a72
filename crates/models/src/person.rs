use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifier::{IdentifierPolicy, Normalize, RecordId};
use crate::resource::{text_field, Resource};
use crate::validation::{has_min_length, is_valid_email, FieldErrors, Validate};

pub const MIN_FULL_NAME_LENGTH: usize = 3;

/// A person registered in a city. `cidade_id` is not checked against the
/// cities collection here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: RecordId,
    pub nome_completo: String,
    pub email: String,
    #[serde(default)]
    pub cidade_id: RecordId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub nome_completo: String,
    pub email: String,
    pub cidade_id: RecordId,
}

impl Validate for NewPerson {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errs = FieldErrors::new();
        if !has_min_length(&self.nome_completo, MIN_FULL_NAME_LENGTH) {
            errs.add("nomeCompleto", "Nome completo deve ter pelo menos 3 caracteres");
        }
        if !is_valid_email(&self.email) {
            errs.add("email", "E-mail inválido");
        }
        if self.cidade_id.is_new() {
            errs.add("cidadeId", "Cidade é obrigatória");
        }
        errs.into_result()
    }
}

impl Resource for Person {
    type Draft = NewPerson;

    const COLLECTION: &'static str = "pessoas";
    const NOT_FOUND_MESSAGE: &'static str = "Pessoa não encontrada.";

    fn id(&self) -> &RecordId { &self.id }

    fn display_field(&self) -> &str { &self.nome_completo }

    fn from_raw(raw: &Value, policy: IdentifierPolicy) -> Option<Self> {
        let nome_completo = text_field(raw, "nomeCompleto")?;
        Some(Person {
            id: policy.normalize(raw.get("id")),
            nome_completo: nome_completo.to_string(),
            email: raw.get("email").and_then(Value::as_str).unwrap_or_default().to_string(),
            cidade_id: policy.normalize(raw.get("cidadeId")),
        })
    }

    fn from_draft(id: RecordId, draft: NewPerson) -> Self {
        Person { id, nome_completo: draft.nome_completo, email: draft.email, cidade_id: draft.cidade_id }
    }

    fn with_id(self, id: RecordId) -> Self { Person { id, ..self } }
}
