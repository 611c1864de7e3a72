//! Shared plumbing for talking to the cadastro REST backend.
//! - `http`: a single configured client plus the interceptor hooks every call goes through.
//! - `errors`: transport-level error values.
//! - `utils::logging`: tracing subscriber setup.

pub mod errors;
pub mod http;
pub mod utils;

pub use errors::HttpError;
pub use http::ApiClient;
