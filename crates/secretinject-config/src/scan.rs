//! Secret reference scanning.

use crate::ConfigResult;
use crate::node::{Node, parse_document};
use indexmap::IndexSet;

/// Mapping key marking a value that is sourced from a named secret.
pub const FROM_SECRET: &str = "from_secret";

/// Distinct secret names, in the order they were first found.
pub type SecretSet = IndexSet<String>;

/// Find every secret referenced by a pipeline document.
pub fn find_secrets(document: &str) -> ConfigResult<SecretSet> {
    let mut secrets = SecretSet::new();
    for root in parse_document(document)? {
        collect_secrets(&root, &mut secrets);
    }
    Ok(secrets)
}

/// Walk a node tree, adding the value of every `from_secret` key to `out`.
///
/// A `from_secret` whose value is not a scalar is not a reference; its value
/// is walked like any other. Mapping keys and aliases are never walked.
pub fn collect_secrets(node: &Node, out: &mut SecretSet) {
    match node {
        Node::Document(child) => collect_secrets(child, out),
        Node::Sequence(items) => {
            for item in items {
                collect_secrets(item, out);
            }
        }
        Node::Mapping(entries) => {
            for (key, value) in entries {
                match (key.as_scalar(), value.as_scalar()) {
                    (Some(FROM_SECRET), Some(name)) => {
                        out.insert(name.to_string());
                    }
                    _ => collect_secrets(value, out),
                }
            }
        }
        Node::Scalar(_) | Node::Alias(_) => {}
    }
}
