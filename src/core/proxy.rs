use crate::domain::ports::{ConfigProvider, ProxyMethod, Upstream, UpstreamRequest};
use crate::utils::validation::is_numeric_id;
use serde_json::{json, Value};
use std::sync::Arc;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_BAD_GATEWAY: u16 = 502;

/// 轉發結果：回給呼叫端的狀態碼與 JSON 內容
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyOutcome {
    pub status: u16,
    pub body: Value,
}

impl ProxyOutcome {
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "success": false, "message": message.into() }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamTargets {
    pub clients: String,
    pub standards: String,
    pub mappings: String,
}

impl UpstreamTargets {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            clients: config.clients_base_url().to_string(),
            standards: config.standards_base_url().to_string(),
            mappings: config.mappings_base_url().to_string(),
        }
    }
}

/// Forwards console API calls to the backend services.
pub struct ProxyService {
    upstream: Arc<dyn Upstream>,
    targets: UpstreamTargets,
}

impl ProxyService {
    pub fn new(upstream: Arc<dyn Upstream>, targets: UpstreamTargets) -> Self {
        Self { upstream, targets }
    }

    pub async fn list_clients(&self) -> ProxyOutcome {
        let url = format!("{}/clients", self.targets.clients);
        self.forward(ProxyMethod::Get, url, None).await
    }

    pub async fn list_active_clients(&self) -> ProxyOutcome {
        let url = format!("{}/clients/active", self.targets.clients);
        self.forward(ProxyMethod::Get, url, None).await
    }

    pub async fn create_client(&self, body: &[u8]) -> ProxyOutcome {
        let payload = match parse_body(body) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let url = format!("{}/clients", self.targets.clients);
        self.forward(ProxyMethod::Post, url, Some(payload)).await
    }

    pub async fn update_client(&self, raw_id: &str, body: &[u8]) -> ProxyOutcome {
        let client_id = match path_id(raw_id, "clientId") {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let payload = match parse_body(body) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let url = format!("{}/clients/{}", self.targets.clients, client_id);
        self.forward(ProxyMethod::Put, url, Some(payload)).await
    }

    pub async fn delete_client(&self, raw_id: &str) -> ProxyOutcome {
        let client_id = match path_id(raw_id, "clientId") {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let url = format!("{}/clients/{}", self.targets.clients, client_id);
        self.forward(ProxyMethod::Delete, url, None).await
    }

    pub async fn list_standards(&self) -> ProxyOutcome {
        let url = format!("{}/standards", self.targets.standards);
        self.forward(ProxyMethod::Get, url, None).await
    }

    pub async fn mappings_for_client(&self, raw_id: &str) -> ProxyOutcome {
        let client_id = match path_id(raw_id, "clientId") {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let url = format!("{}/mappings/client/{}", self.targets.mappings, client_id);
        self.forward(ProxyMethod::Get, url, None).await
    }

    pub async fn create_mapping(&self, body: &[u8]) -> ProxyOutcome {
        let payload = match parse_body(body) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let url = format!("{}/mappings", self.targets.mappings);
        self.forward(ProxyMethod::Post, url, Some(payload)).await
    }

    pub async fn delete_mapping(&self, raw_id: &str) -> ProxyOutcome {
        let mapping_id = match path_id(raw_id, "mappingId") {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let url = format!("{}/mappings/{}", self.targets.mappings, mapping_id);
        self.forward(ProxyMethod::Delete, url, None).await
    }

    async fn forward(&self, method: ProxyMethod, url: String, body: Option<Value>) -> ProxyOutcome {
        tracing::debug!("Forwarding {} {}", method.as_str(), url);

        let request = UpstreamRequest {
            method,
            url: url.clone(),
            body,
        };

        match self.upstream.send(request).await {
            Ok(reply) => {
                tracing::info!(
                    method = method.as_str(),
                    url = %url,
                    status = reply.status,
                    "Proxied request"
                );
                ProxyOutcome {
                    status: reply.status,
                    body: interpret_body(reply.status, &reply.body),
                }
            }
            Err(e) => {
                tracing::warn!(method = method.as_str(), url = %url, "Upstream unreachable: {}", e);
                ProxyOutcome::failure(STATUS_BAD_GATEWAY, e.to_string())
            }
        }
    }
}

fn path_id<'a>(raw: &'a str, name: &str) -> Result<&'a str, ProxyOutcome> {
    let trimmed = raw.trim();
    if is_numeric_id(trimmed) {
        Ok(trimmed)
    } else {
        Err(ProxyOutcome::failure(
            STATUS_BAD_REQUEST,
            format!("Invalid {}", name),
        ))
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ProxyOutcome> {
    serde_json::from_slice(body)
        .map_err(|_| ProxyOutcome::failure(STATUS_BAD_REQUEST, "Invalid JSON body"))
}

/// 上游內容為空回傳 `null`，非 JSON 文字包成 `{ success, message }`
pub fn interpret_body(status: u16, text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => json!({
            "success": (200..300).contains(&status),
            "message": text,
        }),
    }
}
