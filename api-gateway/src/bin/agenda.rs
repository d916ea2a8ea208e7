//! Agenda Lambda - Relays agenda entries to a Notion database.
//!
//! Endpoints:
//! - GET /health - Liveness probe (no API key)
//! - POST /agenda - Normalize an entry and create it as a Notion page
//!
//! Every request except the liveness probe must carry `x-api-key`.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{from_error, json_response, parse_json_body, text_response};
use shared::{
    AgendaRequest, AgendaResponse, ApiKeyGate, Config, Entry, NotionClient, PageCreator,
    Vocabulary,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState<C> {
    gate: ApiKeyGate,
    status_vocab: Vocabulary,
    category_vocab: Vocabulary,
    pages: C,
}

impl AppState<NotionClient> {
    fn from_config(config: &Config) -> shared::Result<Self> {
        Ok(Self {
            gate: ApiKeyGate::new(config.api_key.clone()),
            status_vocab: config.status_vocabulary()?,
            category_vocab: config.category_vocabulary()?,
            pages: NotionClient::new(config),
        })
    }
}

/// Strip the API Gateway stage prefix and any trailing slash.
fn route_path(raw_path: &str) -> &str {
    let path = raw_path
        .strip_prefix("/api")
        .filter(|p| p.starts_with('/'))
        .unwrap_or(raw_path);
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

async fn handler<C: PageCreator>(state: Arc<AppState<C>>, event: Request) -> Result<Response<Body>, Error> {
    let raw_path = event.uri().path();
    let path = route_path(raw_path);
    let method = event.method();

    info!("Received request: method={}, path={} (raw: {})", method, path, raw_path);

    if let Err(e) = state.gate.admit(method, path, event.headers()) {
        warn!("Rejected request to {}: missing or invalid API key", path);
        return from_error(&e);
    }

    match (method.as_str(), path) {
        ("GET", "/health") | ("HEAD", "/health") => text_response(200, "ok"),
        ("POST", "/agenda") => create_agenda(&state, event.body()).await,
        _ => from_error(&shared::Error::NotFound(path.to_string())),
    }
}

async fn create_agenda<C: PageCreator>(state: &AppState<C>, body: &Body) -> Result<Response<Body>, Error> {
    let request: AgendaRequest = match parse_json_body(body) {
        Ok(req) => req,
        Err(e) => {
            info!("Rejected request body: {}", e);
            return from_error(&e);
        }
    };

    let entry = match Entry::from_request(request, &state.status_vocab, &state.category_vocab) {
        Ok(entry) => entry,
        Err(e) => {
            info!("Validation failed: {}", e);
            return from_error(&e);
        }
    };

    match state.pages.create_page(&entry).await {
        Ok(page_id) => {
            info!("Created Notion page {} ({})", page_id, entry.name);
            json_response(200, &AgendaResponse::created(page_id, entry.normalized()))
        }
        Err(e) => {
            error!("Notion page creation failed: {}", e);
            from_error(&e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = match Config::from_env().and_then(|config| AppState::from_config(&config)) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
