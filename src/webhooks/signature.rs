//! Notion webhook signature verification using HMAC-SHA256.
//!
//! Notion signs each delivery with a shared secret. The signed message is the
//! `notion-timestamp` header value, a colon, then the raw request body:
//!
//! ```text
//! HMAC-SHA256(secret, timestamp + ":" + body)
//! ```
//!
//! The digest arrives in the `notion-signature` header. Verification runs before
//! the body is parsed; a delivery that fails it is rejected without being logged.
//!
//! When no secret is configured, verification is skipped and every delivery
//! passes. That mode exists for local development only.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// A webhook signing secret.
///
/// `Debug` is redacted so the secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    /// Wraps a secret. Returns `None` for an empty secret, which means
    /// "verification disabled".
    pub fn new(secret: impl Into<Vec<u8>>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            None
        } else {
            Some(WebhookSecret(secret))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret([redacted])")
    }
}

/// Decodes a `notion-signature` header value into raw digest bytes.
///
/// Accepts lowercase or uppercase hex, optionally prefixed with `sha256=`, or
/// standard base64. Returns `None` for anything else. Never panics.
///
/// # Examples
///
/// ```
/// use notion_webhooks::webhooks::parse_signature_header;
///
/// assert_eq!(parse_signature_header("abcd"), Some(vec![0xab, 0xcd]));
/// assert_eq!(parse_signature_header("sha256=abcd"), Some(vec![0xab, 0xcd]));
/// assert_eq!(parse_signature_header("q80="), Some(vec![0xab, 0xcd]));
/// assert!(parse_signature_header("sha1=abcd").is_none());
/// assert!(parse_signature_header("").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let header = header.trim();
    let encoded = header.strip_prefix("sha256=").unwrap_or(header);

    if encoded.is_empty() {
        return None;
    }

    hex::decode(encoded)
        .ok()
        .or_else(|| BASE64.decode(encoded).ok())
        .filter(|sig| !sig.is_empty())
}

/// Builds the MAC over `timestamp ":" payload`.
fn signed_mac(timestamp: &[u8], payload: &[u8], secret: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp);
    mac.update(b":");
    mac.update(payload);
    mac
}

/// Computes the HMAC-SHA256 signature of a delivery.
///
/// Used to produce expected signatures in tests and tooling.
pub fn compute_signature(timestamp: impl AsRef<[u8]>, payload: &[u8], secret: &[u8]) -> Vec<u8> {
    signed_mac(timestamp.as_ref(), payload, secret)
        .finalize()
        .into_bytes()
        .to_vec()
}

/// Formats a signature as a `notion-signature` header value (`sha256=<hex>`).
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Verifies a delivery signature.
///
/// * `secret` - the configured secret; `None` disables verification
/// * `timestamp` - the raw `notion-timestamp` header bytes, used verbatim
/// * `payload` - the raw request body
/// * `signature_header` - the `notion-signature` header value
///
/// With a secret configured, a missing timestamp, a missing or undecodable
/// signature, or a digest mismatch all return `false`. The digest comparison is
/// constant-time.
///
/// # Examples
///
/// ```
/// use notion_webhooks::webhooks::{
///     WebhookSecret, compute_signature, format_signature_header, verify_signature,
/// };
///
/// let secret = WebhookSecret::new("test_secret_key").unwrap();
/// let body = br#"{"test": "data"}"#;
/// let header = format_signature_header(&compute_signature("1234567890", body, secret.as_bytes()));
///
/// assert!(verify_signature(Some(&secret), Some(b"1234567890".as_slice()), body, Some(&header)));
/// assert!(!verify_signature(Some(&secret), Some(b"wrong_timestamp".as_slice()), body, Some(&header)));
///
/// // No secret configured: everything passes.
/// assert!(verify_signature(None, None, body, Some("garbage")));
/// ```
pub fn verify_signature(
    secret: Option<&WebhookSecret>,
    timestamp: Option<&[u8]>,
    payload: &[u8],
    signature_header: Option<&str>,
) -> bool {
    let Some(secret) = secret else {
        return true;
    };

    let (Some(timestamp), Some(signature_header)) = (timestamp, signature_header) else {
        return false;
    };

    let Some(provided) = parse_signature_header(signature_header) else {
        return false;
    };

    signed_mac(timestamp, payload, secret.as_bytes())
        .verify_slice(&provided)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secret(s: &str) -> WebhookSecret {
        WebhookSecret::new(s).unwrap()
    }

    fn sign(timestamp: &str, payload: &[u8], secret: &WebhookSecret) -> String {
        format_signature_header(&compute_signature(timestamp, payload, secret.as_bytes()))
    }

    #[test]
    fn empty_secret_means_disabled() {
        assert!(WebhookSecret::new("").is_none());
        assert!(WebhookSecret::new(Vec::<u8>::new()).is_none());
        assert!(WebhookSecret::new("s").is_some());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let s = secret("hunter2");
        assert!(!format!("{s:?}").contains("hunter2"));
    }

    #[test]
    fn parse_accepts_bare_and_prefixed_hex() {
        assert_eq!(
            parse_signature_header("1234abcd"),
            Some(vec![0x12, 0x34, 0xab, 0xcd])
        );
        assert_eq!(
            parse_signature_header("sha256=ABCD1234"),
            Some(vec![0xab, 0xcd, 0x12, 0x34])
        );
    }

    #[test]
    fn parse_accepts_base64() {
        let sig = [7u8; 32];
        let encoded = BASE64.encode(sig);
        assert_eq!(parse_signature_header(&encoded), Some(sig.to_vec()));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_signature_header(""), None);
        assert_eq!(parse_signature_header("sha256="), None);
        assert_eq!(parse_signature_header("sha1=abc123"), None);
        assert_eq!(parse_signature_header("invalid_signature"), None);
    }

    /// The signed message is the literal concatenation `timestamp:body`.
    #[test]
    fn matches_reference_construction() {
        let s = secret("test_secret_key");
        let body = br#"{"test": "data"}"#;

        let mut mac = HmacSha256::new_from_slice(b"test_secret_key").unwrap();
        mac.update(br#"1234567890:{"test": "data"}"#);
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(
            hex::encode(compute_signature("1234567890", body, s.as_bytes())),
            expected
        );
        assert!(verify_signature(
            Some(&s),
            Some(b"1234567890".as_slice()),
            body,
            Some(&expected)
        ));
    }

    #[test]
    fn rejects_invalid_signature_and_wrong_timestamp() {
        let s = secret("test_secret_key");
        let body = br#"{"test": "data"}"#;
        let header = sign("1234567890", body, &s);

        assert!(verify_signature(Some(&s), Some(b"1234567890".as_slice()), body, Some(&header)));
        assert!(!verify_signature(
            Some(&s),
            Some(b"1234567890".as_slice()),
            body,
            Some("invalid_signature")
        ));
        assert!(!verify_signature(
            Some(&s),
            Some(b"wrong_timestamp".as_slice()),
            body,
            Some(&header)
        ));
    }

    #[test]
    fn non_ascii_timestamp_is_signed_verbatim() {
        let s = secret("secret");
        let timestamp = b"1757000000\x80\xff".as_slice();
        let header = format_signature_header(&compute_signature(timestamp, b"body", s.as_bytes()));

        assert!(verify_signature(Some(&s), Some(timestamp), b"body", Some(&header)));
        assert!(!verify_signature(
            Some(&s),
            Some(b"1757000000".as_slice()),
            b"body",
            Some(&header)
        ));
    }

    #[test]
    fn missing_headers_fail_when_secret_configured() {
        let s = secret("secret");
        let header = sign("1", b"body", &s);

        assert!(!verify_signature(Some(&s), None, b"body", Some(&header)));
        assert!(!verify_signature(Some(&s), Some(b"1".as_slice()), b"body", None));
        assert!(!verify_signature(Some(&s), None, b"body", None));
    }

    #[test]
    fn no_secret_skips_verification() {
        assert!(verify_signature(None, None, b"anything", None));
        assert!(verify_signature(None, Some(b"1".as_slice()), b"anything", Some("garbage")));
    }

    #[test]
    fn truncated_signature_fails() {
        let s = secret("secret");
        let sig = compute_signature("1", b"body", s.as_bytes());
        let header = hex::encode(&sig[..16]);

        assert!(!verify_signature(Some(&s), Some(b"1".as_slice()), b"body", Some(&header)));
    }

    proptest! {
        #[test]
        fn prop_sign_verify(
            timestamp in "[0-9]{1,12}",
            payload: Vec<u8>,
            key in prop::collection::vec(any::<u8>(), 1..64)
        ) {
            let s = WebhookSecret::new(key).unwrap();
            let header = sign(&timestamp, &payload, &s);
            prop_assert!(verify_signature(Some(&s), Some(timestamp.as_bytes()), &payload, Some(&header)));
        }

        #[test]
        fn prop_single_byte_flip_fails(
            timestamp in "[0-9]{1,12}",
            payload in prop::collection::vec(any::<u8>(), 1..256),
            index: prop::sample::Index,
            flip in 1u8..=255,
            key in prop::collection::vec(any::<u8>(), 1..64)
        ) {
            let s = WebhookSecret::new(key).unwrap();
            let header = sign(&timestamp, &payload, &s);

            let mut tampered = payload.clone();
            let i = index.index(tampered.len());
            tampered[i] ^= flip;

            prop_assert!(!verify_signature(Some(&s), Some(timestamp.as_bytes()), &tampered, Some(&header)));
        }

        #[test]
        fn prop_wrong_secret_fails(
            payload: Vec<u8>,
            key1: [u8; 32],
            key2: [u8; 32]
        ) {
            // Equal-length keys: HMAC zero-pads short keys, so [1] and [1, 0] collide.
            prop_assume!(key1 != key2);
            let s1 = WebhookSecret::new(key1.to_vec()).unwrap();
            let s2 = WebhookSecret::new(key2.to_vec()).unwrap();

            let header = sign("1700000000", &payload, &s1);
            prop_assert!(!verify_signature(Some(&s2), Some(b"1700000000".as_slice()), &payload, Some(&header)));
        }

        #[test]
        fn prop_malformed_header_no_panic(header: String, payload: Vec<u8>) {
            let s = secret("secret");
            let _ = parse_signature_header(&header);
            let _ = verify_signature(Some(&s), Some(b"1".as_slice()), &payload, Some(&header));
        }
    }
}
