//! Converter extension request and response types.

use serde::{Deserialize, Serialize};

/// A conversion request sent by the CI server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertRequest {
    /// Repository the pipeline belongs to.
    pub repo: Repository,
    /// Build the pipeline is being converted for.
    pub build: Build,
    /// The pipeline definition to convert.
    pub config: Config,
}

/// Repository details. Only the slug is used, for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub id: i64,
    pub namespace: String,
    pub name: String,
    pub slug: String,
    pub branch: String,
    pub config_path: String,
}

/// Build details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    pub number: i64,
    pub event: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub after: String,
}

/// A pipeline definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: String,
}

/// The converted pipeline definition returned to the CI server.
pub type ConvertResponse = Config;
