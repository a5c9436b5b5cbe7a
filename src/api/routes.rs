use crate::api::model::Credentials;
use crate::api::outcome::{ResultCode, UpdateOutcome};
use crate::api::server::AppState;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::net::{Ipv4Addr, SocketAddr};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .fallback(update)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[derive(Deserialize, Debug, Default)]
struct UpdateQuery {
    hostname: Option<String>,
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn update(
    State(state): State<AppState>,
    remote: Option<ConnectInfo<SocketAddr>>,
    uri: Uri,
    query: Option<Query<UpdateQuery>>,
    headers: HeaderMap,
) -> Response {
    // Routers disagree on the exact update path, so anything mentioning
    // /update counts.
    if !uri.path().contains("/update") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let remote = remote.map_or_else(
        || "unknown".to_string(),
        |ConnectInfo(addr)| addr.to_string(),
    );
    tracing::info!("update request {uri} from {remote}");

    let hostname = query.and_then(|Query(q)| q.hostname);
    let outcome = handle_update(&state, &headers, hostname.as_deref()).await;
    tracing::info!("outcome: {} {}", outcome.status.as_u16(), outcome.code);
    outcome.into_response(&headers, uri.path(), &remote)
}

/// The linear update pipeline: client IP, optional staleness check,
/// credentials, provider call. Always comes back with an outcome; nothing
/// here fails past the handler.
async fn handle_update(
    state: &AppState,
    headers: &HeaderMap,
    hostname: Option<&str>,
) -> UpdateOutcome {
    let Some(client_ip) = client_ip(headers, &state.config.client_ip_header) else {
        tracing::warn!("{} header missing or empty", state.config.client_ip_header);
        return UpdateOutcome::new(StatusCode::PAYMENT_REQUIRED, ResultCode::NoFqdn);
    };

    if let Some(hostname) = hostname {
        if record_is_current(state, hostname, &client_ip).await {
            tracing::info!("\"{hostname}\" already resolves to {client_ip}, skipping update");
            return UpdateOutcome::new(StatusCode::OK, ResultCode::NoChg);
        }
    }

    let credentials = match Credentials::from_headers(headers) {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::warn!("rejected update: {err}");
            return UpdateOutcome::new(err.status(), ResultCode::BadAuth);
        }
    };

    match state
        .provider
        .modify_record(&credentials.token, &client_ip)
        .await
    {
        Ok(status) if status == StatusCode::OK => {
            UpdateOutcome::new(StatusCode::OK, ResultCode::Good)
        }
        Ok(status) => {
            tracing::warn!("provider rejected update with {status}");
            UpdateOutcome::new(status, ResultCode::ServerErr)
        }
        Err(err) => {
            tracing::error!("provider call failed: {err}");
            UpdateOutcome::new(StatusCode::BAD_GATEWAY, ResultCode::DnsErr)
        }
    }
}

/// First value of the forwarded-IP header, if present and non-empty.
fn client_ip(headers: &HeaderMap, header_name: &str) -> Option<String> {
    // HeaderMap::get yields the first value when the header arrived more
    // than once.
    let value = headers.get(header_name)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Whether `hostname` currently resolves to the caller's address. Lookup
/// failures count as "current IP unknown" and the update proceeds.
async fn record_is_current(state: &AppState, hostname: &str, client_ip: &str) -> bool {
    let Ok(claimed) = client_ip.parse::<Ipv4Addr>() else {
        tracing::debug!("client IP {client_ip} is not IPv4, skipping staleness check");
        return false;
    };
    match state.resolver.lookup_v4(hostname).await {
        Ok(addrs) => addrs.contains(&claimed),
        Err(err) => {
            tracing::warn!("lookup for \"{hostname}\" failed: {err}");
            false
        }
    }
}
