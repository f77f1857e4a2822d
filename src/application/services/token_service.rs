//! Self-issued bearer tokens for outbound click notifications.
//!
//! The external restaurant endpoints accept an HS256-signed JWT built from a
//! shared secret. Tokens are minted locally by [`mint`], a pure function, and
//! reused across notification batches through a single-slot cache that treats
//! a token as expired a few seconds before its real `exp` so an in-flight
//! request never races true expiry.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use std::sync::Mutex;

type HmacSha256 = Hmac<Sha256>;

/// Seconds subtracted from a token's `exp` to form its usable lifetime.
pub const TOKEN_SAFETY_MARGIN_SECS: u64 = 5;

/// Fixed JOSE header for every minted token.
const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Failure to produce a signed token.
///
/// Fatal for the notification batch that requested it: without a valid token
/// no notification may be attempted.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("signing key rejected: {0}")]
    InvalidKey(String),
    #[error("claims serialization failed: {0}")]
    Claims(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    iat: i64,
    exp: i64,
}

/// Mints a compact HS256 JWS.
///
/// Pure function: header and claims are serialized, base64url-encoded without
/// padding, joined with `.`, and signed with HMAC-SHA256 over the joined
/// string; the encoded signature becomes the third segment. No caching, no
/// clock access.
///
/// # Errors
///
/// Returns [`MintError::InvalidKey`] if the HMAC implementation rejects the
/// key material.
pub fn mint(issuer: &str, secret: &str, now_epoch: i64, ttl_secs: u64) -> Result<String, MintError> {
    let claims = Claims {
        iss: issuer,
        iat: now_epoch,
        exp: now_epoch + ttl_secs as i64,
    };

    let header_b64 = URL_SAFE_NO_PAD.encode(JWT_HEADER.as_bytes());
    let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_string(&claims)?.as_bytes());
    let signing_input = format!("{}.{}", header_b64, payload_b64);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| MintError::InvalidKey(e.to_string()))?;
    mac.update(signing_input.as_bytes());
    let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature_b64))
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    /// Real `exp` minus [`TOKEN_SAFETY_MARGIN_SECS`]; gates cache reuse.
    effective_exp: i64,
}

/// Issues and caches bearer tokens for the outbound notification endpoint.
///
/// Holds at most one token at a time. The cache slot is guarded by a mutex,
/// so concurrent callers during a miss serialize on the mint and never
/// observe a half-built token.
pub struct TokenService {
    issuer: String,
    secret: String,
    ttl_secs: u64,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenService {
    /// Creates a token service for the given issuer and shared secret.
    pub fn new(issuer: String, secret: String, ttl_secs: u64) -> Self {
        Self {
            issuer,
            secret,
            ttl_secs,
            cached: Mutex::new(None),
        }
    }

    /// Returns a token valid for at least the safety margin from now.
    ///
    /// Reuses the cached token while it has usable lifetime left; otherwise
    /// mints a replacement and overwrites the slot.
    ///
    /// # Errors
    ///
    /// Returns [`MintError`] if a replacement cannot be signed. Nothing is
    /// cached on failure.
    pub fn bearer_token(&self) -> Result<String, MintError> {
        self.bearer_token_at(Utc::now().timestamp())
    }

    /// Clock-injected variant of [`TokenService::bearer_token`].
    pub fn bearer_token_at(&self, now_epoch: i64) -> Result<String, MintError> {
        let mut slot = self.cached.lock().expect("token cache mutex poisoned");

        if let Some(cached) = slot.as_ref() {
            if now_epoch < cached.effective_exp {
                return Ok(cached.token.clone());
            }
        }

        let token = mint(&self.issuer, &self.secret, now_epoch, self.ttl_secs)?;
        let effective_exp =
            now_epoch + self.ttl_secs as i64 - TOKEN_SAFETY_MARGIN_SECS as i64;

        *slot = Some(CachedToken {
            token: token.clone(),
            effective_exp,
        });

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SECRET: &str = "test-signing-secret";

    fn decode_segment(segment: &str) -> Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_mint_produces_three_segments() {
        let token = mint("promo-relay", SECRET, 1_700_000_000, 300).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));
        // base64url without padding
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_mint_header_and_claims() {
        let token = mint("promo-relay", SECRET, 1_700_000_000, 300).unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        let header = decode_segment(segments[0]);
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let claims = decode_segment(segments[1]);
        assert_eq!(claims["iss"], "promo-relay");
        assert_eq!(claims["iat"], 1_700_000_000i64);
        assert_eq!(claims["exp"], 1_700_000_300i64);
    }

    #[test]
    fn test_mint_signature_verifies() {
        let token = mint("promo-relay", SECRET, 1_700_000_000, 300).unwrap();
        let (signing_input, signature_b64) = token.rsplit_once('.').unwrap();

        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).unwrap();

        assert!(mac.verify_slice(&signature).is_ok());
    }

    #[test]
    fn test_mint_secret_matters() {
        let a = mint("promo-relay", "secret-a", 1_700_000_000, 300).unwrap();
        let b = mint("promo-relay", "secret-b", 1_700_000_000, 300).unwrap();

        // Same signing input, different signatures
        assert_eq!(
            a.rsplit_once('.').unwrap().0,
            b.rsplit_once('.').unwrap().0
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_cache_reuse_within_window() {
        let service = TokenService::new("promo-relay".into(), SECRET.into(), 300);

        let now = 1_700_000_000;
        let first = service.bearer_token_at(now).unwrap();
        let second = service.bearer_token_at(now + 200).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_expires_at_safety_margin() {
        let service = TokenService::new("promo-relay".into(), SECRET.into(), 300);

        let now = 1_700_000_000;
        let margin = TOKEN_SAFETY_MARGIN_SECS as i64;

        let first = service.bearer_token_at(now).unwrap();
        // One second inside the usable window: still reused
        let reused = service.bearer_token_at(now + 300 - margin - 1).unwrap();
        assert_eq!(first, reused);

        // At the effective expiry: re-minted with fresh claims
        let reminted = service.bearer_token_at(now + 300 - margin).unwrap();
        assert_ne!(first, reminted);
    }

    #[test]
    fn test_cache_survives_concurrent_callers() {
        use std::sync::Arc;

        let service = Arc::new(TokenService::new("promo-relay".into(), SECRET.into(), 300));
        let now = 1_700_000_000;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.bearer_token_at(now).unwrap())
            })
            .collect();

        let tokens: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Every caller observes a complete token for the same claims
        assert!(tokens.iter().all(|t| t == &tokens[0]));
    }
}
