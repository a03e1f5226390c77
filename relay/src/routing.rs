use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, FromRef, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{ApiError, Reply};
use crate::mail::Mailer;

pub const SEND_PATH: &str = "/cgi-bin/webhook/send";

/// Shared, immutable request state.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: Config, mailer: impl Mailer) -> Self {
        AppState {
            config: Arc::new(config),
            mailer: Arc::new(mailer),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.body_limit;

    Router::new()
        .route("/health", get(health))
        .route(SEND_PATH, post(send))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}

// Extractor rejections are taken as values so every failure gets the JSON reply.
async fn send(
    State(mailer): State<Arc<dyn Mailer>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Reply>, ApiError> {
    let key = query.ok().and_then(|Query(pairs)| first_key(pairs));
    let body = body?;

    crate::relay::relay(mailer.as_ref(), key.as_deref(), &body).await?;
    Ok(Json(Reply::ok()))
}

/// The first `key` parameter; repeats are ignored.
fn first_key(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find_map(|(name, value)| (name == "key").then_some(value))
}
