pub mod config;
pub mod error;
mod http_layers;
pub mod metrics;
pub mod server;
pub(crate) mod session;
pub mod state;
pub mod stats;

pub use config::ServerConfig;
pub use http_layers::*;
#[allow(unused_imports)] // Used by main.rs
pub use server::run_server;
