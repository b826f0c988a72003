use crate::domain::ports::{ConfigProvider, ProxyMethod, Upstream, UpstreamReply, UpstreamRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::collections::HashMap;

impl From<ProxyMethod> for Method {
    fn from(method: ProxyMethod) -> Self {
        match method {
            ProxyMethod::Get => Method::GET,
            ProxyMethod::Post => Method::POST,
            ProxyMethod::Put => Method::PUT,
            ProxyMethod::Delete => Method::DELETE,
        }
    }
}

/// 以 reqwest 轉發到後端服務，共用同一個連線池
pub struct ReqwestUpstream {
    client: Client,
    headers: HashMap<String, String>,
}

impl ReqwestUpstream {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            headers: config.upstream_headers(),
        })
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store");

        for (key, value) in &self.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("Upstream responded {} ({} bytes)", status, body.len());

        Ok(UpstreamReply { status, body })
    }
}
