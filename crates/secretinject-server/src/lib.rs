//! Converter extension server.
//!
//! Receives signed conversion requests from the CI server and answers with
//! the pipeline definition extended by secret resource documents.

pub mod config;
pub mod error;
pub mod routes;
pub mod signature;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
