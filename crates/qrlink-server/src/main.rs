use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, info};

mod config;
mod page;

use config::load_settings;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Default)]
struct AppState {
    codes: RwLock<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: &'static str,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn bad_request(error: &'static str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let app = build_router(Arc::new(AppState::default()));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "collector listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/qr", post(receive_qr))
        .route("/qr-codes", get(list_codes))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn receive_qr(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    if !is_json_request(&headers) {
        return Err(bad_request("Request body is not JSON"));
    }

    let data = match serde_json::from_slice::<Value>(&body) {
        Ok(data) if !is_empty_json(&data) => data,
        Ok(_) => return Err(bad_request("Empty JSON body")),
        Err(e) => {
            debug!("unparseable body: {e}");
            return Err(bad_request("Empty JSON body"));
        }
    };

    let Some(content) = data.get("content") else {
        return Err(bad_request("Missing 'content' field in JSON"));
    };
    let content = match content {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    info!(%content, "QR received");
    state.codes.write().await.push(content);
    Ok(Json(StatusBody { status: "ok" }))
}

async fn list_codes(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.codes.read().await.clone())
}

async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render_codes(&state.codes.read().await))
}

/// `application/json` or any `application/*+json` media type.
fn is_json_request(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Values that carry nothing: `null`, `false`, `0`, `""`, `[]` and `{}`.
fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
