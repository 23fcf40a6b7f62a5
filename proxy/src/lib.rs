//! Plain-HTTP forward proxy over the courier executor.
//!
//! # Overview
//! Every request that reaches the proxy is marshalled into the boundary
//! types (body base64-encoded, headers as pairs), handed to
//! `Courier::execute`, and reassembled into an HTTP reply. The target is
//! taken from the absolute-form request target that proxy clients send, or
//! from the `Host` header for origin-form requests.
//!
//! # Design
//! Failures anywhere in the pipeline collapse to a plain 500 reply; the
//! proxy never retries. Response headers pass through except
//! `content-encoding`, `content-length` and `transfer-encoding`: the body
//! is re-materialized from the boundary payload, so the original framing
//! headers no longer describe what actually goes out. CONNECT tunnelling
//! is not supported.

use anyhow::Context;
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, request::Parts, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use courier_core::{codec, Courier, HttpRequest};
use tokio::net::TcpListener;

pub fn app(courier: Courier) -> Router {
    Router::new().fallback(forward).with_state(courier)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app(Courier::new())).await
}

async fn forward(State(courier): State<Courier>, request: Request<Body>) -> Response {
    match relay(&courier, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!("relay failed: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

/// Marshal one incoming request across the string boundary and back.
async fn relay(courier: &Courier, request: Request<Body>) -> anyhow::Result<Response> {
    let (parts, body) = request.into_parts();

    let method = parts.method.as_str().to_string();
    let url = target_url(&parts)?;
    let headers = parts
        .headers
        .iter()
        .filter(|(name, _)| *name != header::HOST)
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .context("could not read request body")?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(codec::encode(&bytes))
    };

    tracing::info!("-> {method} {url}");

    let result = courier
        .execute(HttpRequest {
            method,
            url,
            headers,
            body,
        })
        .await?;

    let payload = codec::decode(&result.body)?;
    tracing::info!("<- {} {}B", result.status, payload.len());

    let mut response = Response::builder().status(result.status);
    for (name, value) in &result.headers {
        if matches!(
            name.as_str(),
            "content-encoding" | "content-length" | "transfer-encoding"
        ) {
            continue;
        }
        response = response.header(name.as_str(), value.as_str());
    }
    Ok(response.body(Body::from(payload))?)
}

/// Resolve the URL to fetch: the absolute-form target proxy clients send,
/// or scheme + Host header for origin-form requests.
fn target_url(parts: &Parts) -> anyhow::Result<String> {
    if parts.uri.scheme().is_some() {
        return Ok(parts.uri.to_string());
    }
    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .context("origin-form request without a Host header")?;
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Ok(format!("http://{host}{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn parts_for(uri: &str, host: Option<&str>) -> Parts {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(host) = host {
            builder = builder.header(header::HOST, host);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn absolute_form_target_is_used_verbatim() {
        let parts = parts_for("http://example.com/path?q=1", None);
        assert_eq!(target_url(&parts).unwrap(), "http://example.com/path?q=1");
    }

    #[test]
    fn origin_form_target_falls_back_to_host() {
        let parts = parts_for("/path?q=1", Some("example.com:8080"));
        assert_eq!(
            target_url(&parts).unwrap(),
            "http://example.com:8080/path?q=1"
        );
    }

    #[test]
    fn origin_form_without_host_is_an_error() {
        let parts = parts_for("/path", None);
        assert!(target_url(&parts).is_err());
    }
}
