//! The request executor: one HTTP round trip per call.
//!
//! # Design
//! `Courier` owns a single `reqwest::Client` (cheap to clone, pools
//! connections internally) and carries no other state. Each `execute` call
//! is independent: decode the body if the method permits one, perform the
//! round trip, re-encode the response body. Concurrent calls need no
//! coordination.
//!
//! The executor itself never retries, never logs, and never interprets
//! status codes; a 500 is as much a success as a 200. Bounding latency is
//! the caller's concern.

use crate::codec;
use crate::error::CourierError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes [`HttpRequest`] values against the network.
#[derive(Debug, Clone, Default)]
pub struct Courier {
    client: reqwest::Client,
}

impl Courier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Perform one HTTP round trip and normalize the result.
    ///
    /// The method name is matched case-insensitively. For GET, HEAD and
    /// OPTIONS any supplied body is ignored outright; for every other
    /// method a present body is base64-decoded before the request is built,
    /// so a malformed payload fails with `CourierError::Decode` without any
    /// network activity. Transport failures surface as
    /// `CourierError::Network`. HTTP-level error statuses are returned as
    /// ordinary responses.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, CourierError> {
        let method = HttpMethod::parse(&request.method)?;

        let body = if method.permits_body() {
            match request.body.as_deref() {
                Some(payload) => Some(codec::decode(payload)?),
                None => None,
            }
        } else {
            None
        };

        let mut builder = self.client.request(method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // Keep intermediary caches from answering for the origin. The
        // client itself has no cache layer, so every call reaches the
        // network regardless.
        builder = builder.header(reqwest::header::CACHE_CONTROL, "no-cache");
        if let Some(bytes) = body {
            builder = builder.body(bytes);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CourierError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CourierError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: codec::encode(&bytes),
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courier() -> Courier {
        Courier::new()
    }

    #[tokio::test]
    async fn unknown_method_fails_before_any_request() {
        // The URL is unroutable; reaching the network would fail with a
        // different variant than the one asserted here.
        let err = courier()
            .execute(HttpRequest {
                method: "BREW".to_string(),
                url: "http://127.0.0.1:1/".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::Method(_)));
    }

    #[tokio::test]
    async fn malformed_body_fails_before_any_request() {
        let err = courier()
            .execute(HttpRequest {
                method: "POST".to_string(),
                url: "http://127.0.0.1:1/".to_string(),
                headers: Vec::new(),
                body: Some("not-valid-base64!!".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::Decode(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_irrelevant_for_bodiless_methods() {
        // GET drops the body without decoding it, so the only failure left
        // is the unreachable host.
        let err = courier()
            .execute(HttpRequest {
                method: "GET".to_string(),
                url: "http://127.0.0.1:1/".to_string(),
                headers: Vec::new(),
                body: Some("not-valid-base64!!".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::Network(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let err = courier()
            .execute(HttpRequest {
                method: "GET".to_string(),
                url: "http://127.0.0.1:1/".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::Network(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_a_network_error() {
        let err = courier()
            .execute(HttpRequest {
                method: "GET".to_string(),
                url: "not a url".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CourierError::Network(_)));
    }
}
