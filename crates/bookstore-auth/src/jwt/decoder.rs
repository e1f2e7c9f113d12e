//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use bookstore_core::config::auth::AuthConfig;
use bookstore_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates signed tokens.
///
/// Only HS256 is accepted; tokens signed with any other algorithm are
/// rejected before the signature is trusted.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized(
                "Invalid token type: expected access token",
            ));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthorized(
                "Invalid token type: expected refresh token",
            ));
        }
        Ok(claims)
    }

    /// Internal decode without type checking.
    ///
    /// Every failure maps to `Unauthorized` with a distinct internal
    /// message; the HTTP boundary collapses these to one generic response so
    /// callers cannot probe which check failed.
    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        AppError::unauthorized("Unexpected signing algorithm")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::unauthorized("Invalid token issuer")
                    }
                    _ => AppError::unauthorized("Malformed token"),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use bookstore_core::config::auth::AuthConfig;
    use chrono::{Duration, Utc};

    fn make_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
            ..AuthConfig::default()
        }
    }

    fn make_codec() -> (JwtEncoder, JwtDecoder) {
        let config = make_config();
        (JwtEncoder::new(&config), JwtDecoder::new(&config))
    }

    #[test]
    fn test_access_token_roundtrip() {
        let (encoder, decoder) = make_codec();
        let roles = vec!["admin".to_string(), "editor".to_string()];
        let (token, _) = encoder.issue_access(42, "alice", &roles, Utc::now()).unwrap();

        let claims = decoder.decode_access(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.roles, roles);
        assert_eq!(claims.iss, "bookstore-api");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_omits_roles() {
        let (encoder, decoder) = make_codec();
        let (token, _) = encoder.issue_refresh(42, "alice", Utc::now()).unwrap();

        let claims = decoder.decode_refresh(&token).unwrap();
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn test_expired_token_rejected() {
        let (encoder, decoder) = make_codec();
        let issued = Utc::now() - Duration::hours(1);
        let (token, _) = encoder.issue_access(42, "alice", &[], issued).unwrap();

        let err = decoder.decode_access(&token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_tampered_token_rejected() {
        let (encoder, decoder) = make_codec();
        let (token, _) = encoder.issue_access(42, "alice", &[], Utc::now()).unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(decoder.decode_access(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (encoder, _) = make_codec();
        let (token, _) = encoder.issue_access(42, "alice", &[], Utc::now()).unwrap();

        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        let decoder = JwtDecoder::new(&other);
        assert!(decoder.decode_access(&token).is_err());
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let (_, decoder) = make_codec();
        let claims = Claims {
            user_id: 42,
            username: "alice".to_string(),
            roles: Vec::new(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
            iss: "bookstore-api".to_string(),
            token_type: TokenType::Access,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS384),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret-key"),
        )
        .unwrap();

        assert!(decoder.decode_access(&token).is_err());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let (encoder, decoder) = make_codec();
        let (token, _) = encoder.issue_refresh(42, "alice", Utc::now()).unwrap();
        assert!(decoder.decode_access(&token).is_err());

        let (token, _) = encoder.issue_access(42, "alice", &[], Utc::now()).unwrap();
        assert!(decoder.decode_refresh(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let other = AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
            issuer: "some-other-service".to_string(),
            ..AuthConfig::default()
        };
        let encoder = JwtEncoder::new(&other);
        let (_, decoder) = make_codec();

        let (token, _) = encoder.issue_access(42, "alice", &[], Utc::now()).unwrap();
        assert!(decoder.decode_access(&token).is_err());
    }
}
