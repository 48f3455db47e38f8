//! Splitting of multi-document pipeline definitions.

use regex::Regex;
use std::sync::LazyLock;

// A `---` line, optionally followed by a space and a directive.
static DOCUMENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---(?: [^\r\n]*)?\r?$").unwrap());

/// Split a pipeline definition into its documents.
///
/// Separator lines are dropped, including any trailing directive text, and
/// every document is trimmed. Input without a separator comes back as a
/// single document.
pub fn split_documents(input: &str) -> Vec<&str> {
    DOCUMENT_SEPARATOR.split(input).map(str::trim).collect()
}
