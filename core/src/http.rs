//! Wire types for requests and responses crossing the string boundary.
//!
//! # Design
//! These types describe one HTTP exchange as plain data. All fields are
//! owned (`String`, `Vec`) and serde-derived so values can be serialized
//! across a message channel or mapped onto a C ABI without lifetime
//! concerns. The method stays a free-form string in `HttpRequest` because
//! the far side of the channel is untyped; [`HttpMethod::parse`] normalizes
//! it inside the executor.
//!
//! Headers are ordered name/value pairs. A name occurring several times
//! yields one pair per occurrence; nothing is collapsed or joined here.

use serde::{Deserialize, Serialize};

use crate::error::CourierError;

/// HTTP method, normalized from the caller's free-form spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Options,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Parse a method name, ignoring case. Unknown names fail with
    /// `CourierError::Method`.
    pub fn parse(name: &str) -> Result<Self, CourierError> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(CourierError::Method(other.to_string())),
        }
    }

    /// Canonical uppercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether a request body may be attached for this method.
    ///
    /// GET, HEAD and OPTIONS never carry one; any body supplied alongside
    /// them is dropped before the request goes out.
    pub fn permits_body(self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head | HttpMethod::Options)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One HTTP request described as plain data.
///
/// `body`, when present, is a base64 payload produced by
/// [`crate::codec::encode`] on the far side of the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// One HTTP response described as plain data.
///
/// `body` is the full response payload, base64-encoded. Header names arrive
/// lowercased by the underlying client; multiplicity is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(HttpMethod::parse("get").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("GET").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("gEt").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("patch").unwrap(), HttpMethod::Patch);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = HttpMethod::parse("BREW").unwrap_err();
        assert!(matches!(err, CourierError::Method(name) if name == "BREW"));
    }

    #[test]
    fn bodiless_methods() {
        assert!(!HttpMethod::Get.permits_body());
        assert!(!HttpMethod::Head.permits_body());
        assert!(!HttpMethod::Options.permits_body());

        assert!(HttpMethod::Post.permits_body());
        assert!(HttpMethod::Put.permits_body());
        assert!(HttpMethod::Delete.permits_body());
        assert!(HttpMethod::Patch.permits_body());
    }

    #[test]
    fn as_str_is_canonical_uppercase() {
        assert_eq!(HttpMethod::parse("options").unwrap().as_str(), "OPTIONS");
        assert_eq!(HttpMethod::parse("Delete").unwrap().as_str(), "DELETE");
    }

    #[test]
    fn request_omits_absent_body_when_serialized() {
        let req = HttpRequest {
            method: "GET".to_string(),
            url: "http://example.com/".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("body").is_none());
    }

    #[test]
    fn response_round_trips_through_json() {
        let resp = HttpResponse {
            status: 404,
            body: "SGVsbG8=".to_string(),
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: HttpResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, 404);
        assert_eq!(back.body, "SGVsbG8=");
        assert_eq!(back.headers, resp.headers);
    }
}
