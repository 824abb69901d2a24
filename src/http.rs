//! Strata - HTTP Front End
//! Thin routing layer mapping verbs and paths onto engine calls.
//!
//! `GET /:key` returns `200` with a `{"value": ...}` body or `404` when the
//! key is absent everywhere. `PUT /:key` takes the same envelope and returns
//! `200`. A malformed body is rejected by the JSON extractor with a client
//! error and never reaches the engine.

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::engine::store::Store;
use crate::error::StrataError;

/// JSON envelope carrying a value on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValueBody {
    pub value: String,
}

/// Build the router over a shared engine handle.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/:key", get(get_key).put(put_key))
        .layer(middleware::from_fn(log_request))
        .with_state(store)
}

async fn log_request(req: Request, next: Next) -> Response {
    log::info!("{} {}", req.method(), req.uri().path());
    next.run(req).await
}

async fn get_key(State(store): State<Store>, Path(key): Path<String>) -> Response {
    match store.get(&key) {
        Ok(Some(value)) => (StatusCode::OK, Json(ValueBody { value })).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => fatal(err),
    }
}

async fn put_key(
    State(store): State<Store>,
    Path(key): Path<String>,
    Json(body): Json<ValueBody>,
) -> Response {
    match store.put(key, body.value) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => fatal(err),
    }
}

/// Every error the engine surfaces here is storage-integrity class
/// (corruption, failed segment or manifest write). Stop the process rather
/// than keep serving over state that can no longer be trusted.
fn fatal(err: StrataError) -> Response {
    log::error!("unrecoverable storage error: {}", err);
    std::process::exit(1);
}
