pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{ConsoleApi, ReqwestUpstream};
pub use app::{create_router, AppState};
pub use config::{CliConfig, ConsoleConfig};
pub use core::proxy::{ProxyOutcome, ProxyService, UpstreamTargets};
pub use utils::error::{ConsoleError, Result};
