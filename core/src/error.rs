//! Error types for the courier executor.
//!
//! # Design
//! `Decode` and `Method` are both detected before any network activity, so a
//! caller that sees them knows no request went out. Everything the transport
//! itself reports (DNS, refused connections, TLS, aborted reads) lands in
//! `Network` with the client's own message. HTTP error statuses (4xx/5xx)
//! are never errors; they come back as ordinary responses.

use std::fmt;

/// Errors returned by the codec and by `Courier::execute`.
#[derive(Debug)]
pub enum CourierError {
    /// The payload is not valid base64 (bad padding or characters outside
    /// the standard alphabet).
    Decode(String),

    /// The request named an HTTP method this executor does not recognize.
    Method(String),

    /// The transport could not complete the request.
    Network(String),
}

impl fmt::Display for CourierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourierError::Decode(msg) => write!(f, "invalid base64 payload: {msg}"),
            CourierError::Method(name) => write!(f, "unsupported HTTP method: {name}"),
            CourierError::Network(msg) => write!(f, "network failure: {msg}"),
        }
    }
}

impl std::error::Error for CourierError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err = CourierError::Decode("Invalid padding".to_string());
        assert_eq!(err.to_string(), "invalid base64 payload: Invalid padding");

        let err = CourierError::Method("BREW".to_string());
        assert_eq!(err.to_string(), "unsupported HTTP method: BREW");

        let err = CourierError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network failure: connection refused");
    }
}
