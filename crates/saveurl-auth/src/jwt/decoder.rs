//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use saveurl_core::config::AuthConfig;
use saveurl_core::error::AppError;

use super::claims::Claims;
use super::revocation::RevocationList;

/// Validates session tokens and checks revocation.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: RevocationList,
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
    pub fn new(config: &AuthConfig, revocations: RevocationList) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks the signature, the expiry, and that the token was not revoked.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid session token signature")
                }
                _ => AppError::unauthorized("Invalid session token"),
            })?
            .claims;

        if self.revocations.is_revoked(&claims.jti) {
            return Err(AppError::unauthorized("Session has been signed out"));
        }

        Ok(claims)
    }

    /// Revokes the token identified by these claims.
    pub async fn revoke(&self, claims: &Claims) {
        self.revocations.revoke(claims.jti).await;
    }
}
