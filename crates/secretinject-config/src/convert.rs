//! Pipeline conversion.

use crate::ConfigResult;
use crate::render::render_secrets;
use crate::request::{ConvertRequest, ConvertResponse};
use crate::scan::{SecretSet, find_secrets};
use crate::split::split_documents;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// A line reading exactly `...`, with its line break.
static DOCUMENT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\.\.\.\r?(?:\n|$)").unwrap());

/// Convert a pipeline definition, appending a secret resource document for
/// every distinct `from_secret` reference.
///
/// `repo_slug` is only used for logging. If any document fails to parse the
/// whole conversion fails.
pub fn convert(repo_slug: &str, input: &str) -> ConfigResult<String> {
    let mut secrets = SecretSet::new();
    for document in split_documents(input) {
        secrets.extend(find_secrets(document)?);
    }
    debug!(repo = %repo_slug, secrets = ?secrets, "injected secrets");

    let mut output = DOCUMENT_END.replace_all(input, "").into_owned();
    output.push_str(&render_secrets(&secrets));
    Ok(output)
}

/// Converter extension answering host conversion requests.
#[derive(Debug, Clone, Default)]
pub struct Converter;

impl Converter {
    pub fn new() -> Self {
        Self
    }

    /// Convert the pipeline definition carried by a host request.
    pub fn convert(&self, req: &ConvertRequest) -> ConfigResult<ConvertResponse> {
        let data = convert(&req.repo.slug, &req.config.data)?;
        Ok(ConvertResponse { data })
    }
}
