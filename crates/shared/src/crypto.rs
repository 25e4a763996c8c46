//! Cryptographic utilities for webhook payload signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs a payload with HMAC-SHA256 and returns a `sha256=<hex>` signature.
///
/// Used by the email provider callback endpoint: the provider signs the raw
/// request body with the shared webhook secret and sends the result in the
/// `X-Webhook-Signature` header.
pub fn sign_payload(payload: &[u8], secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a `sha256=<hex>` signature against a payload.
///
/// Comparison is constant-time via the HMAC verify path.
pub fn verify_signature(payload: &[u8], secret: &str, signature: &str) -> bool {
    let Some(hex_part) = signature.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_part) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_payload_format() {
        let sig = sign_payload(b"{\"event\":\"bounced\"}", "secret");
        assert!(sig.starts_with("sha256="));
        // SHA256 produces 32 bytes = 64 hex chars
        assert_eq!(sig.len(), "sha256=".len() + 64);
    }

    #[test]
    fn test_sign_is_deterministic() {
        assert_eq!(sign_payload(b"same", "secret"), sign_payload(b"same", "secret"));
        assert_ne!(sign_payload(b"same", "a"), sign_payload(b"same", "b"));
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let payload = b"{\"event\":\"opened\",\"invitation_id\":\"abc\"}";
        let sig = sign_payload(payload, "webhook-secret");
        assert!(verify_signature(payload, "webhook-secret", &sig));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let payload = b"payload";
        let sig = sign_payload(payload, "secret-a");
        assert!(!verify_signature(payload, "secret-b", &sig));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let sig = sign_payload(b"original", "secret");
        assert!(!verify_signature(b"tampered", "secret", &sig));
    }

    #[test]
    fn test_verify_rejects_malformed_signature() {
        assert!(!verify_signature(b"payload", "secret", "not-a-signature"));
        assert!(!verify_signature(b"payload", "secret", "sha256=zzzz"));
        assert!(!verify_signature(b"payload", "secret", ""));
    }
}
