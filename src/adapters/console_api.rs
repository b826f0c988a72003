use crate::core::forms::normalize_numeric_id;
use crate::domain::model::{Client, IsoStandardDefinition, MappingCreatePayload, MappingRecord};
use crate::utils::error::{ConsoleError, Result};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Typed client for the proxy routes (`/api/v1/...`).
pub struct ConsoleApi {
    base_url: String,
    client: reqwest::Client,
}

struct ApiReply {
    status: StatusCode,
    payload: Option<Value>,
}

impl ApiReply {
    fn message(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    }

    fn success(&self) -> Option<bool> {
        self.payload
            .as_ref()
            .and_then(|value| value.get("success"))
            .and_then(Value::as_bool)
    }

    fn data(&self) -> Option<&Value> {
        self.payload
            .as_ref()
            .and_then(|value| value.get("data"))
            .filter(|data| !data.is_null())
    }

    /// 非 2xx 只回報狀態碼；外層 success 必須為 true
    fn require_ok_strict(&self, fallback: &str) -> Result<()> {
        if !self.status.is_success() {
            return Err(ConsoleError::HttpStatusError {
                status: self.status.as_u16(),
            });
        }
        self.require_success(fallback)
    }

    /// 非 2xx 時優先使用後端訊息
    fn require_ok_with_message(&self, fallback: &str) -> Result<()> {
        if !self.status.is_success() {
            return Err(match self.message() {
                Some(message) => ConsoleError::api(message),
                None => ConsoleError::HttpStatusError {
                    status: self.status.as_u16(),
                },
            });
        }
        self.require_success(fallback)
    }

    /// 非 2xx 或 success 明確為 false 時失敗
    fn reject_failure(&self, fallback: &str) -> Result<()> {
        if !self.status.is_success() || self.success() == Some(false) {
            return Err(ConsoleError::api(
                self.message().unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(())
    }

    fn require_success(&self, fallback: &str) -> Result<()> {
        if self.success() != Some(true) {
            return Err(ConsoleError::api(
                self.message().unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(serde_json::from_value(value.clone())?)
}

/// 依序嘗試 `data.mappings`、`data`、頂層陣列
pub fn extract_mapping_rows(payload: &Value) -> Result<Vec<MappingRecord>> {
    let candidates = [
        payload.get("data").and_then(|data| data.get("mappings")),
        payload.get("data"),
        Some(payload),
    ];

    match candidates.into_iter().flatten().find(|value| value.is_array()) {
        Some(rows) => decode(rows),
        None => Ok(Vec::new()),
    }
}

impl ConsoleApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiReply> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Console API {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store");
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let payload = serde_json::from_str::<Value>(&text).ok();

        tracing::debug!("Console API responded {}", status);
        Ok(ApiReply { status, payload })
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let reply = self.call(Method::GET, "/clients", None).await?;
        reply.require_ok_strict("Failed to fetch clients")?;
        reply.data().map(decode).unwrap_or_else(|| Ok(Vec::new()))
    }

    pub async fn list_active_clients(&self) -> Result<Vec<Client>> {
        let reply = self.call(Method::GET, "/clients/active", None).await?;
        reply.require_ok_strict("Failed to fetch active clients")?;
        reply.data().map(decode).unwrap_or_else(|| Ok(Vec::new()))
    }

    pub async fn create_client(&self, client: &Client) -> Result<Client> {
        let body = serde_json::to_value(client)?;
        let reply = self.call(Method::POST, "/clients", Some(body)).await?;
        reply.require_ok_with_message("Failed to create client")?;
        reply
            .data()
            .map(decode)
            .unwrap_or_else(|| Ok(client.clone()))
    }

    pub async fn update_client(&self, client: &Client) -> Result<Client> {
        let client_id = client.client_id.filter(|id| *id != 0).ok_or_else(|| {
            ConsoleError::api("clientId is required to update a client")
        })?;

        let body = serde_json::to_value(client)?;
        let path = format!("/clients/{}", client_id);
        let reply = self.call(Method::PUT, &path, Some(body)).await?;
        reply.require_ok_with_message("Failed to update client")?;
        reply
            .data()
            .map(decode)
            .unwrap_or_else(|| Ok(client.clone()))
    }

    pub async fn delete_client(&self, client_id: u64) -> Result<()> {
        let path = format!("/clients/{}", client_id);
        let reply = self.call(Method::DELETE, &path, None).await?;
        reply.reject_failure("Failed to delete client")
    }

    pub async fn list_standards(&self) -> Result<Vec<IsoStandardDefinition>> {
        let reply = self.call(Method::GET, "/standards", None).await?;
        reply.reject_failure("Failed to load standards")?;
        match reply.data() {
            Some(data) if data.is_array() => decode(data),
            _ => Ok(Vec::new()),
        }
    }

    pub async fn mappings_for_client(&self, raw_client_id: &str) -> Result<Vec<MappingRecord>> {
        let client_id = normalize_numeric_id(raw_client_id).ok_or_else(|| {
            ConsoleError::validation(
                "Client ID required",
                "Please enter a client ID before searching.",
            )
        })?;

        let path = format!("/mappings/client/{}", client_id);
        let reply = self.call(Method::GET, &path, None).await?;
        reply.reject_failure("Failed to load mappings")?;
        match &reply.payload {
            Some(payload) => extract_mapping_rows(payload),
            None => Ok(Vec::new()),
        }
    }

    pub async fn create_mapping(&self, payload: &MappingCreatePayload) -> Result<()> {
        let body = serde_json::to_value(payload)?;
        let reply = self.call(Method::POST, "/mappings", Some(body)).await?;
        reply.reject_failure("Failed to create mapping")
    }

    pub async fn delete_mapping(&self, mapping_id: u64) -> Result<()> {
        let path = format!("/mappings/{}", mapping_id);
        let reply = self.call(Method::DELETE, &path, None).await?;
        reply.reject_failure("Failed to delete mapping")
    }
}
