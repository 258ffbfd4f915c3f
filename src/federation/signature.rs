//! HTTP Signatures for ActivityPub delivery
//!
//! Implements the signing side of the HTTP Signatures draft
//! (draft-cavage-http-signatures), which remote servers such as Mastodon
//! require before accepting inbox POSTs. Incoming signatures are not
//! verified by this server.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha2::Sha256;

use crate::error::AppError;

/// Build the canonical signing string for a set of covered headers.
///
/// One `<lowercased-name>: <value>` line per header, newline-joined with
/// no trailing newline, in exactly the order the caller supplies. Any
/// deviation here breaks verification on the remote side.
pub fn signing_string(headers: &[(&str, &str)]) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name.to_ascii_lowercase(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sign a string with RSA-SHA256 (PKCS#1 v1.5) and base64-encode the result.
pub fn sign_string(private_key_pem: &str, content: &str) -> Result<String, AppError> {
    let private_key = rsa::RsaPrivateKey::from_pkcs8_pem(private_key_pem)
        .map_err(|e| AppError::Signing(format!("Invalid private key: {}", e)))?;

    let signing_key = rsa::pkcs1v15::SigningKey::<Sha256>::new(private_key);
    let signature = signing_key
        .try_sign(content.as_bytes())
        .map_err(|e| AppError::Signing(format!("RSA signing failed: {}", e)))?;

    Ok(BASE64.encode(signature.to_bytes()))
}

/// Build a complete `Signature` header value for the covered headers.
///
/// Format (quoting and field order are validated by consumers):
/// `keyId="...",algorithm="rsa-sha256",headers="...",signature="..."`
pub fn signature_header(
    private_key_pem: &str,
    key_id: &str,
    headers: &[(&str, &str)],
) -> Result<String, AppError> {
    let to_sign = signing_string(headers);
    let signature = sign_string(private_key_pem, &to_sign)?;

    let header_names = headers
        .iter()
        .map(|(name, _)| name.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!(
        "keyId=\"{}\",algorithm=\"rsa-sha256\",headers=\"{}\",signature=\"{}\"",
        key_id, header_names, signature
    ))
}
