//! Signed Cookie Tokens
//!
//! Both the session cookie and the pending sign-in cookie carry a
//! "uuid.signature" token: the record ID plus an HMAC-SHA256 signature
//! over it. Verification never touches the database; an invalid token
//! is rejected before any lookup.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Sign an ID into a cookie token
pub fn sign(id: Uuid, secret: &[u8; 32]) -> String {
    let id_str = id.to_string();

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(id_str.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", id_str, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a cookie token and extract the ID
///
/// Returns None for any malformed or tampered token.
pub fn verify(token: &str, secret: &[u8; 32]) -> Option<Uuid> {
    let (id_str, signature_b64) = token.split_once('.')?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac.verify_slice(&signature).ok()?;

    id_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_verify_round_trip() {
        let id = Uuid::new_v4();
        let token = sign(id, &SECRET);
        assert_eq!(verify(&token, &SECRET), Some(id));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let id = Uuid::new_v4();
        let token = sign(id, &SECRET);

        let other = Uuid::new_v4();
        let signature = token.split_once('.').unwrap().1;
        let forged = format!("{}.{}", other, signature);
        assert_eq!(verify(&forged, &SECRET), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let id = Uuid::new_v4();
        let token = sign(id, &SECRET);
        assert_eq!(verify(&token, &[9u8; 32]), None);
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(verify("", &SECRET), None);
        assert_eq!(verify("no-dot-here", &SECRET), None);
        assert_eq!(verify("a.b.c", &SECRET), None);
    }
}
