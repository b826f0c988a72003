use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "atm-console.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub console: ConsoleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    pub clients_base_url: Option<String>,
    pub standards_base_url: Option<String>,
    pub mappings_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleSection {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    pub page_size: Option<usize>,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_upstream_base_url() -> String {
    "http://127.0.0.1:8182/mapper/api/v1".to_string()
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:3000/api/v1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            clients_base_url: None,
            standards_base_url: None,
            mappings_base_url: None,
            timeout_seconds: None,
            headers: None,
        }
    }
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: None,
        }
    }
}

impl ConsoleConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConsoleError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案存在時載入，否則使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 明確指定的路徑必須存在，未指定時才退回預設路徑或預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConsoleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAPPER_HOST})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConsoleError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_url("upstream.base_url", &self.upstream.base_url)?;

        let overrides = [
            ("upstream.clients_base_url", &self.upstream.clients_base_url),
            ("upstream.standards_base_url", &self.upstream.standards_base_url),
            ("upstream.mappings_base_url", &self.upstream.mappings_base_url),
        ];
        for (field, value) in overrides {
            if let Some(url) = value {
                validation::validate_url(field, url)?;
            }
        }

        if let Some(timeout) = self.upstream.timeout_seconds {
            validation::validate_positive_number("upstream.timeout_seconds", timeout, 1)?;
        }

        if let Some(headers) = &self.upstream.headers {
            for name in headers.keys() {
                validation::validate_non_empty_string("upstream.headers", name)?;
            }
        }

        if let Some(format) = &self.logging.format {
            validation::validate_one_of("logging.format", format, &["compact", "json"])?;
        }

        validation::validate_url("console.api_base_url", &self.console.api_base_url)?;

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }

    pub fn page_size(&self) -> usize {
        self.console.page_size.unwrap_or(10)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format.as_deref() == Some("json")
    }
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

impl ConfigProvider for ConsoleConfig {
    fn clients_base_url(&self) -> &str {
        trim_base(
            self.upstream
                .clients_base_url
                .as_deref()
                .unwrap_or(&self.upstream.base_url),
        )
    }

    fn standards_base_url(&self) -> &str {
        trim_base(
            self.upstream
                .standards_base_url
                .as_deref()
                .unwrap_or(&self.upstream.base_url),
        )
    }

    fn mappings_base_url(&self) -> &str {
        trim_base(
            self.upstream
                .mappings_base_url
                .as_deref()
                .unwrap_or(&self.upstream.base_url),
        )
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.upstream.timeout_seconds.map(Duration::from_secs)
    }

    fn upstream_headers(&self) -> HashMap<String, String> {
        self.upstream.headers.clone().unwrap_or_default()
    }
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
