//! Hook points applied to every backend response.
//!
//! All transport failures are turned into [`HttpError`] here and nowhere else,
//! so the messages the UI shows come from a single place.

use reqwest::{Response, StatusCode};
use tracing::{debug, warn};

use crate::errors::HttpError;

/// Successful responses pass through unchanged.
pub fn on_response(resp: Response) -> Response {
    resp
}

/// Translate a failure where no usable response was received.
pub fn on_transport_error(err: reqwest::Error) -> HttpError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        warn!(error = %err, "backend unreachable");
        return HttpError::Connection;
    }
    if err.is_body() {
        return on_body_error(err);
    }
    if err.is_decode() {
        return HttpError::Decode(err.to_string());
    }
    HttpError::Request(err.to_string())
}

/// Translate a failure while reading a response body.
///
/// The status line already arrived, so this is a dropped or stalled
/// connection, never a malformed payload. JSON parse failures are reported
/// separately as [`HttpError::Decode`].
pub fn on_body_error(err: reqwest::Error) -> HttpError {
    warn!(error = %err, "connection lost while reading response body");
    HttpError::Connection
}

/// Translate a non-success status.
pub fn on_status(status: StatusCode, body: String) -> HttpError {
    if status == StatusCode::UNAUTHORIZED {
        // no authentication flow yet; propagate as a plain status error
        debug!(status = status.as_u16(), "unauthorized response from backend");
    }
    HttpError::Status { status: status.as_u16(), body }
}
