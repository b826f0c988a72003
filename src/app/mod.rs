pub mod console;
pub mod routes;
pub mod server;

pub use routes::{create_router, AppState};
