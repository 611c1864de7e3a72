use thiserror::Error;

/// User-facing text for any failure where no response was received.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão.";

/// Transport errors, already translated by [`crate::http::interceptors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("{}", CONNECTION_ERROR_MESSAGE)]
    Connection,
    #[error("backend respondeu com status {status}")]
    Status { status: u16, body: String },
    #[error("resposta inválida do backend: {0}")]
    Decode(String),
    #[error("requisição inválida: {0}")]
    Request(String),
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool { self.status() == Some(404) }
}
