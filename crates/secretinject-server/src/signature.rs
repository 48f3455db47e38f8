//! HTTP request signature verification.
//!
//! The CI server signs every extension request with the shared secret using
//! HTTP Signatures (`hmac-sha256`):
//!
//! ```text
//! Signature: keyId="hmac-key",algorithm="hmac-sha256",headers="(request-target) date digest",signature="<base64>"
//! ```
//!
//! The signing string holds one `name: value` line per listed header, where
//! `(request-target)` stands for the lowercase method and the request path.
//! The `digest` header must be among the signed headers and its
//! `SHA-256=<base64>` value must match the body.

use axum::http::{HeaderMap, Method, Uri};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const ALGORITHM: &str = "hmac-sha256";
const REQUEST_TARGET: &str = "(request-target)";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("missing signature")]
    Missing,

    #[error("malformed signature: {0}")]
    Malformed(String),

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("signed header not present: {0}")]
    MissingHeader(String),

    #[error("invalid signature")]
    Invalid,

    #[error("body digest mismatch")]
    DigestMismatch,

    #[error("request body is not signed")]
    UnsignedBody,
}

/// Parsed `Signature` header.
#[derive(Debug, Clone)]
pub struct Signature {
    pub key_id: String,
    pub algorithm: String,
    pub headers: Vec<String>,
    pub signature: Vec<u8>,
}

impl Signature {
    /// Read the signature from the `Signature` header, falling back to
    /// `Authorization: Signature ...`.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, SignatureError> {
        let value = headers
            .get("signature")
            .and_then(|v| v.to_str().ok())
            .or_else(|| {
                headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Signature "))
            })
            .ok_or(SignatureError::Missing)?;

        Self::parse(value)
    }

    /// Parse the `key="value",...` parameter list of a signature.
    pub fn parse(value: &str) -> Result<Self, SignatureError> {
        let mut key_id = None;
        let mut algorithm = None;
        let mut headers = None;
        let mut signature = None;

        for param in value.split(',') {
            let Some((name, raw)) = param.trim().split_once('=') else {
                return Err(SignatureError::Malformed(param.to_string()));
            };
            let raw = raw.trim_matches('"');
            match name {
                "keyId" => key_id = Some(raw.to_string()),
                "algorithm" => algorithm = Some(raw.to_string()),
                "headers" => {
                    let names: Vec<String> =
                        raw.split_whitespace().map(str::to_lowercase).collect();
                    if names.is_empty() {
                        return Err(SignatureError::Malformed("empty headers".to_string()));
                    }
                    headers = Some(names);
                }
                "signature" => {
                    let decoded = STANDARD
                        .decode(raw)
                        .map_err(|e| SignatureError::Malformed(format!("signature: {}", e)))?;
                    signature = Some(decoded);
                }
                _ => {} // Ignore unknown parameters
            }
        }

        Ok(Self {
            key_id: key_id.ok_or_else(|| SignatureError::Malformed("missing keyId".to_string()))?,
            algorithm: algorithm.unwrap_or_else(|| ALGORITHM.to_string()),
            headers: headers.unwrap_or_else(|| vec!["date".to_string()]),
            signature: signature
                .ok_or_else(|| SignatureError::Malformed("missing signature".to_string()))?,
        })
    }

    /// Check the signature against the request using the shared secret.
    pub fn verify(
        &self,
        secret: &str,
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
    ) -> Result<(), SignatureError> {
        if !self.algorithm.eq_ignore_ascii_case(ALGORITHM) {
            return Err(SignatureError::UnsupportedAlgorithm(self.algorithm.clone()));
        }

        let signing_string = signing_string(&self.headers, method, uri, headers)?;
        let mut mac = new_mac(secret);
        mac.update(signing_string.as_bytes());
        mac.verify_slice(&self.signature)
            .map_err(|_| SignatureError::Invalid)
    }
}

/// Verify the signature and body digest of an incoming request.
pub fn verify_request(
    secret: &str,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), SignatureError> {
    let signature = Signature::from_headers(headers)?;
    if !signature.headers.iter().any(|h| h == "digest") {
        return Err(SignatureError::UnsignedBody);
    }
    signature.verify(secret, method, uri, headers)?;
    verify_digest(headers, body)
}

/// Check the `Digest: SHA-256=...` header against the body.
pub fn verify_digest(headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
    let digest = headers
        .get("digest")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SignatureError::MissingHeader("digest".to_string()))?;

    let expected = STANDARD.encode(Sha256::digest(body));
    let matches = digest
        .split(',')
        .filter_map(|d| d.trim().split_once('='))
        .any(|(algorithm, value)| algorithm.eq_ignore_ascii_case("SHA-256") && value == expected);
    if matches {
        Ok(())
    } else {
        Err(SignatureError::DigestMismatch)
    }
}

/// `Digest` header value for a body.
pub fn body_digest(body: &[u8]) -> String {
    format!("SHA-256={}", STANDARD.encode(Sha256::digest(body)))
}

/// Build the `Signature` header value for a request.
///
/// `headers` must already hold every header named in `signed_headers`.
pub fn sign(
    secret: &str,
    key_id: &str,
    signed_headers: &[&str],
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<String, SignatureError> {
    let names: Vec<String> = signed_headers.iter().map(|h| h.to_lowercase()).collect();
    let signing_string = signing_string(&names, method, uri, headers)?;
    let mut mac = new_mac(secret);
    mac.update(signing_string.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    Ok(format!(
        r#"keyId="{}",algorithm="{}",headers="{}",signature="{}""#,
        key_id,
        ALGORITHM,
        names.join(" "),
        signature
    ))
}

fn signing_string(
    names: &[String],
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<String, SignatureError> {
    let mut lines = Vec::with_capacity(names.len());
    for name in names {
        if name == REQUEST_TARGET {
            let target = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
            lines.push(format!(
                "{}: {} {}",
                REQUEST_TARGET,
                method.as_str().to_lowercase(),
                target
            ));
            continue;
        }

        let value = headers
            .get(name.as_str())
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SignatureError::MissingHeader(name.clone()))?;
        lines.push(format!("{}: {}", name, value));
    }
    Ok(lines.join("\n"))
}

fn new_mac(secret: &str) -> Hmac<Sha256> {
    Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC can take any size key")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "bea26a2221fd8090ea38720fc445eca6";

    fn signed_headers(body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("Tue, 07 Jun 2014 20:51:35 GMT"));
        headers.insert("digest", HeaderValue::from_str(&body_digest(body)).unwrap());

        let uri: Uri = "/".parse().unwrap();
        let signature = sign(
            SECRET,
            "hmac-key",
            &["(request-target)", "date", "digest"],
            &Method::POST,
            &uri,
            &headers,
        )
        .unwrap();
        headers.insert("signature", HeaderValue::from_str(&signature).unwrap());
        headers
    }

    #[test]
    fn test_verify_signed_request() {
        let body = br#"{"config":{"data":"a: 1"}}"#;
        let headers = signed_headers(body);
        let uri: Uri = "/".parse().unwrap();

        verify_request(SECRET, &Method::POST, &uri, &headers, body).unwrap();
    }

    #[test]
    fn test_wrong_secret() {
        let body = b"{}";
        let headers = signed_headers(body);
        let uri: Uri = "/".parse().unwrap();

        let result = verify_request("other", &Method::POST, &uri, &headers, body);
        assert!(matches!(result, Err(SignatureError::Invalid)));
    }

    #[test]
    fn test_tampered_body() {
        let headers = signed_headers(b"{}");
        let uri: Uri = "/".parse().unwrap();

        let result = verify_request(SECRET, &Method::POST, &uri, &headers, b"{\"x\":1}");
        assert!(matches!(result, Err(SignatureError::DigestMismatch)));
    }

    #[test]
    fn test_request_target_is_signed() {
        let body = b"{}";
        let headers = signed_headers(body);
        let uri: Uri = "/other".parse().unwrap();

        let result = verify_request(SECRET, &Method::POST, &uri, &headers, body);
        assert!(matches!(result, Err(SignatureError::Invalid)));
    }

    #[test]
    fn test_missing_signature() {
        let uri: Uri = "/".parse().unwrap();
        let result = verify_request(SECRET, &Method::POST, &uri, &HeaderMap::new(), b"");
        assert!(matches!(result, Err(SignatureError::Missing)));
    }

    #[test]
    fn test_parse_signature() {
        let sig = Signature::parse(
            r#"keyId="hmac-key",algorithm="hmac-sha256",headers="(request-target) Date",signature="c2lnbmF0dXJl""#,
        )
        .unwrap();

        assert_eq!(sig.key_id, "hmac-key");
        assert_eq!(sig.headers, vec!["(request-target)", "date"]);
        assert_eq!(sig.signature, b"signature");
    }

    #[test]
    fn test_parse_defaults_to_date_header() {
        let sig = Signature::parse(r#"keyId="k",signature="c2ln""#).unwrap();
        assert_eq!(sig.algorithm, ALGORITHM);
        assert_eq!(sig.headers, vec!["date"]);
    }

    #[test]
    fn test_parse_rejects_empty_headers() {
        let result = Signature::parse(r#"keyId="k",headers="",signature="c2ln""#);
        assert!(matches!(result, Err(SignatureError::Malformed(_))));
    }

    #[test]
    fn test_body_must_be_signed() {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("Tue, 07 Jun 2014 20:51:35 GMT"));
        let uri: Uri = "/".parse().unwrap();
        let signature = sign(SECRET, "hmac-key", &["date"], &Method::POST, &uri, &headers).unwrap();
        headers.insert("signature", HeaderValue::from_str(&signature).unwrap());

        let result = verify_request(SECRET, &Method::POST, &uri, &headers, b"{}");
        assert!(matches!(result, Err(SignatureError::UnsignedBody)));
    }

    #[test]
    fn test_missing_digest_header() {
        let result = verify_digest(&HeaderMap::new(), b"{}");
        assert!(matches!(result, Err(SignatureError::MissingHeader(_))));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Signature::parse("garbage").is_err());
        assert!(Signature::parse(r#"keyId="k",signature="!!!""#).is_err());
        assert!(Signature::parse(r#"keyId="k""#).is_err());
    }

    #[test]
    fn test_unsupported_algorithm() {
        let sig = Signature::parse(r#"keyId="k",algorithm="rsa-sha256",signature="c2ln""#).unwrap();
        let uri: Uri = "/".parse().unwrap();
        let result = sig.verify(SECRET, &Method::POST, &uri, &HeaderMap::new());
        assert!(matches!(result, Err(SignatureError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_missing_signed_header() {
        let sig = Signature::parse(r#"keyId="k",headers="digest",signature="c2ln""#).unwrap();
        let uri: Uri = "/".parse().unwrap();
        let result = sig.verify(SECRET, &Method::POST, &uri, &HeaderMap::new());
        assert!(matches!(result, Err(SignatureError::MissingHeader(_))));
    }
}
