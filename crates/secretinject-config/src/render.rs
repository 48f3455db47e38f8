//! Secret resource rendering.

use crate::scan::SecretSet;

/// Render the secret resource document for one secret name.
///
/// The block starts with a line break and a `---` separator so it can be
/// appended directly after existing documents.
pub fn render_secret(name: &str) -> String {
    let name = quote(name);
    format!("\n---\nkind: secret\nname: {name}\nget:\n  name: {name}\n  path: \"\"")
}

/// Render one secret resource document per name, in set order.
pub fn render_secrets(secrets: &SecretSet) -> String {
    secrets.iter().map(|name| render_secret(name)).collect()
}

/// Quote a value as a YAML double-quoted scalar.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\0' => quoted.push_str("\\0"),
            c if c.is_control() && (c as u32) <= 0xff => {
                quoted.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                quoted.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
