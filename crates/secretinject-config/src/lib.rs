//! Pipeline conversion for Drone-style CI servers.
//!
//! This crate handles:
//! - Splitting multi-document pipeline definitions
//! - Scanning YAML documents for `from_secret` references
//! - Rendering secret resource documents for every referenced secret
//! - Host request/response types for the converter extension

pub mod convert;
pub mod error;
pub mod node;
pub mod render;
pub mod request;
pub mod scan;
pub mod split;

pub use convert::{Converter, convert};
pub use error::{ConfigError, ConfigResult};
pub use node::Node;
pub use request::{Build, Config, ConvertRequest, ConvertResponse, Repository};
pub use scan::{SecretSet, find_secrets};
pub use split::split_documents;
