use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ProxyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyMethod::Get => "GET",
            ProxyMethod::Post => "POST",
            ProxyMethod::Put => "PUT",
            ProxyMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: ProxyMethod,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// 上游原始回應：狀態碼與未解析的內容
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply>;
}

pub trait ConfigProvider: Send + Sync {
    fn clients_base_url(&self) -> &str;
    fn standards_base_url(&self) -> &str;
    fn mappings_base_url(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn upstream_headers(&self) -> HashMap<String, String>;
}
