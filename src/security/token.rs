/// Bearer token codec
///
/// Encodes signed claims into a compact URL-safe token and decodes them
/// back. The algorithm is pinned to HS256 with a symmetric secret; it is
/// never read from the token, so "alg: none" and cross-algorithm tokens are
/// rejected at signature verification.
use anyhow::{anyhow, Result as AnyResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::security::scopes::Scope;

/// Minimum signing-secret length, 256 bits.
const MIN_SECRET_LENGTH: usize = 32;

/// Claims carried by an issued token.
///
/// `exp` is optional: tokens issued by this service carry one, but a token
/// without it is accepted indefinitely by `decode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Scopes granted to this token, exactly as requested at login
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp), enforced only when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: Option<i64>,
}

impl TokenCodec {
    /// Create a codec from the configured secret.
    ///
    /// Rejects secrets shorter than 256 bits; weak HMAC keys make every
    /// token forgeable.
    pub fn new(secret: &str, ttl_secs: Option<i64>) -> AnyResult<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(anyhow!(
                "JWT secret too short - minimum {} bytes required",
                MIN_SECRET_LENGTH
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        })
    }

    /// Issue a token for `subject` carrying exactly `scopes`.
    pub fn issue(&self, subject: &str, scopes: &[Scope]) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            scopes: scopes.iter().map(|s| s.as_str().to_string()).collect(),
            iat: now,
            exp: self.ttl_secs.map(|ttl| now + ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AppError::Internal("Failed to sign token".to_string()))
    }

    /// Verify the signature and return the claims.
    ///
    /// The signature is checked before any payload field is trusted. A
    /// missing `exp` means the token never expires; a present one is
    /// enforced.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is optional in the claims, checked by hand below.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding, &validation)?;

        if data.claims.sub.is_empty() {
            return Err(AppError::InvalidToken {
                challenge: "Bearer".to_string(),
            });
        }

        if let Some(exp) = data.claims.exp {
            if exp < Utc::now().timestamp() {
                return Err(AppError::TokenExpired);
            }
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-0123456789-0123456789-0123456789";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Some(3600)).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(TokenCodec::new("short", Some(3600)).is_err());
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        let token = codec
            .issue("alice", &[Scope::TaskRead, Scope::TaskWrite])
            .unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.scopes, vec!["task:read", "task:write"]);
        assert!(claims.exp.is_some());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = codec();
        let token = codec.issue("alice", &[Scope::TaskRead]).unwrap();

        let (rest, signature) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = signature.chars().collect();
        sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", rest, sig.into_iter().collect::<String>());

        assert!(matches!(
            codec.decode(&tampered),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec();
        let token = codec.issue("alice", &[]).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = "eyJzdWIiOiJtYWxsb3J5IiwiaWF0IjowfQ";
        parts[1] = forged_payload;
        let forged = parts.join(".");

        assert!(matches!(
            codec.decode(&forged),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_foreign_key_rejected() {
        let codec = codec();
        let other = TokenCodec::new("another-secret-9876543210-9876543210", Some(3600)).unwrap();

        let token = other.issue("alice", &[Scope::TaskRead]).unwrap();
        assert!(matches!(
            codec.decode(&token),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        // Signed with the right secret but the wrong algorithm; the pinned
        // HS256 validation must refuse it.
        let claims = Claims {
            sub: "alice".to_string(),
            scopes: vec![],
            iat: Utc::now().timestamp(),
            exp: None,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec().decode(&token),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_missing_subject_rejected() {
        let payload = serde_json::json!({ "scopes": ["task:read"], "iat": 0 });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec().decode(&token),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let codec = codec();
        for garbage in ["", "abc", "a.b", "a.b.c.d", "not a token at all"] {
            assert!(
                matches!(codec.decode(garbage), Err(AppError::InvalidToken { .. })),
                "{:?} should be rejected",
                garbage
            );
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            scopes: vec!["task:read".to_string()],
            iat: Utc::now().timestamp() - 7200,
            exp: Some(Utc::now().timestamp() - 3600),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec().decode(&token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_without_expiry_accepted() {
        let codec = TokenCodec::new(SECRET, None).unwrap();
        let token = codec.issue("alice", &[Scope::TaskRead]).unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = codec().issue("alice", &Scope::ALL).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'));
    }
}
