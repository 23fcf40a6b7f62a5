use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// What the server observed about a request hitting `/inspect`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeenRequest {
    pub method: String,
    pub body_len: usize,
}

pub type Seen = Arc<RwLock<Option<SeenRequest>>>;

pub fn app() -> Router {
    let seen: Seen = Arc::new(RwLock::new(None));
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/inspect", any(inspect))
        .route("/last", get(last))
        .with_state(seen)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reflect the request body, echoing the request's content-type.
async fn echo(headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Reply with the requested status code and an empty body.
async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

/// Record method and body length, and report them back as JSON.
async fn inspect(State(seen): State<Seen>, method: Method, body: Bytes) -> Json<SeenRequest> {
    let record = SeenRequest {
        method: method.to_string(),
        body_len: body.len(),
    };
    *seen.write().await = Some(record.clone());
    Json(record)
}

/// The most recent `/inspect` record. Lets tests observe requests whose
/// own responses cannot carry a body (HEAD).
async fn last(State(seen): State<Seen>) -> Result<Json<SeenRequest>, StatusCode> {
    seen.read().await.clone().map(Json).ok_or(StatusCode::NOT_FOUND)
}
