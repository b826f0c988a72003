use crate::core::proxy::{ProxyOutcome, ProxyService};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyService>,
}

impl IntoResponse for ProxyOutcome {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (
            status,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            self.body.to_string(),
        )
            .into_response()
    }
}

/// 建立代理路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/clients", get(list_clients).post(create_client))
        .route("/api/v1/clients/active", get(list_active_clients))
        .route(
            "/api/v1/clients/{client_id}",
            put(update_client).delete(delete_client),
        )
        .route("/api/v1/standards", get(list_standards))
        .route("/api/v1/mappings", post(create_mapping))
        .route(
            "/api/v1/mappings/client/{client_id}",
            get(mappings_for_client),
        )
        .route("/api/v1/mappings/{mapping_id}", delete(delete_mapping))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_clients(State(state): State<AppState>) -> ProxyOutcome {
    state.proxy.list_clients().await
}

async fn list_active_clients(State(state): State<AppState>) -> ProxyOutcome {
    state.proxy.list_active_clients().await
}

async fn create_client(State(state): State<AppState>, body: Bytes) -> ProxyOutcome {
    state.proxy.create_client(&body).await
}

async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    body: Bytes,
) -> ProxyOutcome {
    state.proxy.update_client(&client_id, &body).await
}

async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ProxyOutcome {
    state.proxy.delete_client(&client_id).await
}

async fn list_standards(State(state): State<AppState>) -> ProxyOutcome {
    state.proxy.list_standards().await
}

async fn mappings_for_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ProxyOutcome {
    state.proxy.mappings_for_client(&client_id).await
}

async fn create_mapping(State(state): State<AppState>, body: Bytes) -> ProxyOutcome {
    state.proxy.create_mapping(&body).await
}

async fn delete_mapping(
    State(state): State<AppState>,
    Path(mapping_id): Path<String>,
) -> ProxyOutcome {
    state.proxy.delete_mapping(&mapping_id).await
}
