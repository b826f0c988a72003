// Adapters layer: concrete HTTP implementations for the backend and the console API.

pub mod console_api;
pub mod http;

pub use console_api::ConsoleApi;
pub use http::ReqwestUpstream;
