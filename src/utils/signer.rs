use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::types::token::ConfirmationClaims;

/// Salt separating confirmation links from anything else signed with the same secret.
pub const CONFIRMATION_SALT: &str = "email-confirm-salt";

/// Confirmation and approval links stay valid for 30 days.
pub const CONFIRMATION_MAX_AGE: i64 = 2_592_000;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired ({age}s > {max_age}s)")]
    Expired { age: i64, max_age: i64 },
    #[error("token issued in the future")]
    NotYetValid,
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

type HmacSha256 = Hmac<Sha256>;

/// Signed, timestamped tokens carrying [`ConfirmationClaims`].
///
/// Layout: `payload.timestamp.signature`, each segment base64url without padding.
/// The timestamp is the issue time in unix seconds, big endian.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: &str, salt: &str) -> Self {
        let key = Sha256::new()
            .chain_update(salt.as_bytes())
            .chain_update(b"signer")
            .chain_update(secret.as_bytes())
            .finalize();
        Self { key: key.to_vec() }
    }

    pub fn confirmation(secret: &str) -> Self {
        Self::new(secret, CONFIRMATION_SALT)
    }

    pub fn issue(&self, claims: &ConfirmationClaims) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now().timestamp())
    }

    pub fn issue_at(&self, claims: &ConfirmationClaims, issued_at: i64) -> Result<String, TokenError> {
        let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let issued_at = u64::try_from(issued_at).map_err(|_| TokenError::Malformed)?;
        let ts_b64 = URL_SAFE_NO_PAD.encode(issued_at.to_be_bytes());
        let signing_input = format!("{payload_b64}.{ts_b64}");

        let signature = self.mac(&signing_input)?.finalize().into_bytes();
        Ok(format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Returns the claims when the token is authentic and no older than `max_age` seconds.
    ///
    /// Every failure collapses to `None`.
    pub fn verify(&self, token: &str, max_age: i64) -> Option<ConfirmationClaims> {
        self.verify_at(token, max_age, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, max_age: i64, now: i64) -> Option<ConfirmationClaims> {
        match self.decode(token, max_age, now) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!("rejected confirmation token: {e}");
                None
            }
        }
    }

    pub fn decode(&self, token: &str, max_age: i64, now: i64) -> Result<ConfirmationClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(payload_b64), Some(ts_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let sig = URL_SAFE_NO_PAD
            .decode(sig_b64.as_bytes())
            .map_err(|_| TokenError::Malformed)?;
        self.mac(&format!("{payload_b64}.{ts_b64}"))?
            .verify_slice(&sig)
            .map_err(|_| TokenError::BadSignature)?;

        let ts_raw = URL_SAFE_NO_PAD
            .decode(ts_b64.as_bytes())
            .map_err(|_| TokenError::Malformed)?;
        let ts_bytes: [u8; 8] = ts_raw.try_into().map_err(|_| TokenError::Malformed)?;
        let issued_at = i64::try_from(u64::from_be_bytes(ts_bytes)).map_err(|_| TokenError::Malformed)?;

        let age = now - issued_at;
        if age < 0 {
            return Err(TokenError::NotYetValid);
        }
        if age > max_age {
            return Err(TokenError::Expired { age, max_age });
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64.as_bytes())
            .map_err(|_| TokenError::Malformed)?;
        Ok(serde_json::from_slice(&payload)?)
    }

    fn mac(&self, signing_input: &str) -> Result<HmacSha256, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|_| TokenError::Malformed)?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_750_000_000;

    fn claims() -> ConfirmationClaims {
        ConfirmationClaims { user_id: 7, email: "ada@example.com".to_string() }
    }

    #[test]
    fn fresh_token_verifies() {
        let signer = TokenSigner::confirmation("secret");
        let token = signer.issue_at(&claims(), T0).unwrap();
        assert_eq!(signer.verify_at(&token, CONFIRMATION_MAX_AGE, T0), Some(claims()));
    }

    #[test]
    fn max_age_boundary_is_inclusive() {
        let signer = TokenSigner::confirmation("secret");
        let token = signer.issue_at(&claims(), T0).unwrap();
        assert!(signer.verify_at(&token, CONFIRMATION_MAX_AGE, T0 + CONFIRMATION_MAX_AGE).is_some());
        assert!(signer.verify_at(&token, CONFIRMATION_MAX_AGE, T0 + CONFIRMATION_MAX_AGE + 1).is_none());
        assert!(matches!(
            signer.decode(&token, CONFIRMATION_MAX_AGE, T0 + CONFIRMATION_MAX_AGE + 1),
            Err(TokenError::Expired { .. })
        ));
    }

    #[test]
    fn future_issue_time_is_rejected() {
        let signer = TokenSigner::confirmation("secret");
        let token = signer.issue_at(&claims(), T0 + 60).unwrap();
        assert!(matches!(signer.decode(&token, CONFIRMATION_MAX_AGE, T0), Err(TokenError::NotYetValid)));
    }

    #[test]
    fn other_secret_or_salt_fails() {
        let token = TokenSigner::confirmation("secret").issue_at(&claims(), T0).unwrap();
        assert!(TokenSigner::confirmation("other").verify_at(&token, CONFIRMATION_MAX_AGE, T0).is_none());
        assert!(TokenSigner::new("secret", "password-reset").verify_at(&token, CONFIRMATION_MAX_AGE, T0).is_none());
    }

    #[test]
    fn tampered_payload_fails() {
        let signer = TokenSigner::confirmation("secret");
        let token = signer.issue_at(&claims(), T0).unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&ConfirmationClaims { user_id: 1, email: "ada@example.com".into() }).unwrap(),
        );
        let rest = token.split_once('.').unwrap().1;
        let forged = format!("{forged_payload}.{rest}");
        assert!(matches!(signer.decode(&forged, CONFIRMATION_MAX_AGE, T0), Err(TokenError::BadSignature)));
    }

    #[test]
    fn garbage_is_invalid_not_a_panic() {
        let signer = TokenSigner::confirmation("secret");
        for junk in ["", "a", "a.b", "a.b.c", "a.b.c.d", "!!.??.##"] {
            assert!(signer.verify_at(junk, CONFIRMATION_MAX_AGE, T0).is_none(), "{junk}");
        }
    }

    #[test]
    fn twin_tokens_are_identical_within_a_second() {
        let signer = TokenSigner::confirmation("secret");
        let a = signer.issue_at(&claims(), T0).unwrap();
        let b = signer.issue_at(&claims(), T0).unwrap();
        assert_eq!(a, b);
    }
}
