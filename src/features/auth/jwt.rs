use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Validates HS256 bearer tokens issued by the external identity provider.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.leeway = config.jwt_leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify the token signature and standard claims, then lift the payload
    /// into an [`AuthenticatedUser`].
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;

        let claims = token_data.claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid subject claim".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            full_name: claims.name,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            issuer: "stagelink".to_string(),
            audience: "stagelink-api".to_string(),
            jwt_leeway: Duration::from_secs(60),
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Claims {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "amal@example.com".to_string(),
            name: "Amal Ben Salah".to_string(),
            role: UserRole::Stagiaire,
            iss: "stagelink".to_string(),
            aud: "stagelink-api".to_string(),
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_valid_token_is_accepted() {
        let validator = JwtValidator::new(&test_config());
        let claims = valid_claims();
        let token = sign(&claims, "test-secret");

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.email, "amal@example.com");
        assert_eq!(user.role, UserRole::Stagiaire);
        assert_eq!(user.user_id.to_string(), claims.sub);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let validator = JwtValidator::new(&test_config());
        let token = sign(&valid_claims(), "other-secret");

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let validator = JwtValidator::new(&test_config());
        let mut claims = valid_claims();
        claims.iss = "someone-else".to_string();
        let token = sign(&claims, "test-secret");

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let validator = JwtValidator::new(&test_config());
        let mut claims = valid_claims();
        claims.exp = claims.iat - 7200;
        let token = sign(&claims, "test-secret");

        assert!(validator.validate_token(&token).is_err());
    }
}
