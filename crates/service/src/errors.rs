use common::errors::CONNECTION_ERROR_MESSAGE;
use common::HttpError;
use models::{FieldErrors, Resource};
use thiserror::Error;

/// Operation a [`ServiceError::Request`] failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message shown when the backend rejected the call for an unspecific reason.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Erro ao listar os registros.",
            Operation::Get => "Erro ao consultar o registro.",
            Operation::Create => "Erro ao registrar.",
            Operation::Update => "Erro ao atualizar.",
            Operation::Delete => "Erro ao deletar.",
        }
    }
}

/// Every failure a caller of the service layer has to handle.
/// `Display` is the text meant for the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("{}", CONNECTION_ERROR_MESSAGE)]
    Connection,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("{}", .operation.failure_message())]
    Request { operation: Operation, detail: String },
    #[error("Já existe um salvamento em andamento.")]
    Busy,
}

impl ServiceError {
    pub fn not_found<R: Resource>() -> Self { Self::NotFound(R::NOT_FOUND_MESSAGE.to_string()) }

    pub fn request(operation: Operation, detail: impl ToString) -> Self {
        Self::Request { operation, detail: detail.to_string() }
    }

    /// Map a transport error. A 404 on a single record is the entity's not-found.
    pub fn from_http<R: Resource>(operation: Operation, err: HttpError) -> Self {
        match err {
            HttpError::Connection => Self::Connection,
            e if e.is_not_found() && operation != Operation::List => Self::not_found::<R>(),
            e => Self::request(operation, e),
        }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, ServiceError::NotFound(_)) }

    pub fn user_message(&self) -> String { self.to_string() }
}
