//! Signed Token Codec
//!
//! Compact HMAC-SHA256-signed bearer tokens for the access/renewal pair.
//!
//! Wire layout (before base64):
//! ```text
//! token_id (16) || account_id (16) || kind (1) || expires_at_ms (8, BE) || hmac (32)
//! ```
//!
//! The backend is the sole authority for token contents; clients treat
//! tokens as opaque strings.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use uuid::Uuid;

use crate::crypto::{constant_time_eq, from_base64, hmac_sha256, to_base64};

const PAYLOAD_LEN: usize = 16 + 16 + 1 + 8;
const TOKEN_LEN: usize = PAYLOAD_LEN + 32;

/// Token kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived token presented on every authenticated request
    Access,
    /// Long-lived token exchanged for fresh access tokens
    Renewal,
}

impl TokenKind {
    fn tag(self) -> u8 {
        match self {
            TokenKind::Access => 1,
            TokenKind::Renewal => 2,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(TokenKind::Access),
            2 => Some(TokenKind::Renewal),
            _ => None,
        }
    }
}

/// Token decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not base64, wrong length, or unknown kind tag
    #[error("Token is malformed")]
    Malformed,

    /// HMAC verification failed
    #[error("Token signature is invalid")]
    BadSignature,

    /// Structurally valid but of the wrong kind
    #[error("Token is of the wrong kind")]
    WrongKind,

    /// Past its embedded expiry
    #[error("Token has expired")]
    Expired,
}

/// Decoded token contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub token_id: Uuid,
    pub account_id: Uuid,
    pub kind: TokenKind,
    pub expires_at_ms: i64,
}

impl TokenClaims {
    /// Mint fresh claims for an account with a random token id
    pub fn new(account_id: Uuid, kind: TokenKind, ttl_ms: i64) -> Self {
        Self {
            token_id: Uuid::new_v4(),
            account_id,
            kind,
            expires_at_ms: now_ms() + ttl_ms,
        }
    }
}

/// Current wall-clock time in Unix milliseconds
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Encode and sign claims into an opaque token string
pub fn issue(claims: &TokenClaims, secret: &[u8; 32]) -> String {
    let mut data = Vec::with_capacity(TOKEN_LEN);
    data.extend_from_slice(claims.token_id.as_bytes());
    data.extend_from_slice(claims.account_id.as_bytes());
    data.push(claims.kind.tag());
    data.extend_from_slice(&claims.expires_at_ms.to_be_bytes());

    let signature = hmac_sha256(secret, &data);
    data.extend_from_slice(&signature);
    to_base64(&data)
}

/// Decode a token, verifying structure, signature, kind, and expiry
///
/// Checks run in that order so a tampered token never reports `Expired`.
pub fn decode(
    token: &str,
    expected: TokenKind,
    secret: &[u8; 32],
) -> Result<TokenClaims, TokenError> {
    let data = from_base64(token).map_err(|_| TokenError::Malformed)?;
    if data.len() != TOKEN_LEN {
        return Err(TokenError::Malformed);
    }

    let (payload, signature) = data.split_at(PAYLOAD_LEN);
    let expected_sig = hmac_sha256(secret, payload);
    if !constant_time_eq(signature, &expected_sig) {
        return Err(TokenError::BadSignature);
    }

    let token_id = Uuid::from_slice(&payload[0..16]).map_err(|_| TokenError::Malformed)?;
    let account_id = Uuid::from_slice(&payload[16..32]).map_err(|_| TokenError::Malformed)?;
    let kind = TokenKind::from_tag(payload[32]).ok_or(TokenError::Malformed)?;

    let mut expiry_bytes = [0u8; 8];
    expiry_bytes.copy_from_slice(&payload[33..41]);
    let expires_at_ms = i64::from_be_bytes(expiry_bytes);

    if kind != expected {
        return Err(TokenError::WrongKind);
    }
    if expires_at_ms <= now_ms() {
        return Err(TokenError::Expired);
    }

    Ok(TokenClaims {
        token_id,
        account_id,
        kind,
        expires_at_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let account_id = Uuid::new_v4();
        let claims = TokenClaims::new(account_id, TokenKind::Access, 60_000);
        let token = issue(&claims, &SECRET);

        let decoded = decode(&token, TokenKind::Access, &SECRET).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let claims = TokenClaims::new(Uuid::new_v4(), TokenKind::Renewal, 60_000);
        let token = issue(&claims, &SECRET);

        assert_eq!(
            decode(&token, TokenKind::Access, &SECRET),
            Err(TokenError::WrongKind)
        );
        assert!(decode(&token, TokenKind::Renewal, &SECRET).is_ok());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let claims = TokenClaims::new(Uuid::new_v4(), TokenKind::Access, 60_000);
        let token = issue(&claims, &SECRET);

        let mut bytes = from_base64(&token).unwrap();
        bytes[20] ^= 0xff;
        let tampered = to_base64(&bytes);

        assert_eq!(
            decode(&tampered, TokenKind::Access, &SECRET),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = TokenClaims::new(Uuid::new_v4(), TokenKind::Access, 60_000);
        let token = issue(&claims, &SECRET);

        let other = [9u8; 32];
        assert_eq!(
            decode(&token, TokenKind::Access, &other),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = TokenClaims::new(Uuid::new_v4(), TokenKind::Access, -1_000);
        let token = issue(&claims, &SECRET);

        assert_eq!(
            decode(&token, TokenKind::Access, &SECRET),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(
            decode("not-base64!!!", TokenKind::Access, &SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            decode(&to_base64(b"too short"), TokenKind::Access, &SECRET),
            Err(TokenError::Malformed)
        );
    }
}
