use std::time::Duration;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Validates HS256 bearer tokens issued by the identity provider.
///
/// Token issuance lives outside this service; only signature and expiry
/// are checked here.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: String, leeway: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(data.claims.into())
    }
}

/// Mint a short-lived token for router-level tests
#[cfg(test)]
pub fn test_token(
    secret: &str,
    sub: &str,
    role: crate::features::auth::model::UserRole,
    department: Option<&str>,
) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600;

    let claims = Claims {
        sub: sub.to_string(),
        role,
        department: department.map(String::from),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;

    #[test]
    fn round_trips_claims() {
        let validator = JwtValidator::new("secret".to_string(), Duration::from_secs(60));
        let token = test_token("secret", "staff-1", UserRole::DepartmentStaff, Some("Roads"));

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.sub, "staff-1");
        assert_eq!(user.role, UserRole::DepartmentStaff);
        assert_eq!(user.department.as_deref(), Some("Roads"));
    }

    #[test]
    fn rejects_garbage_token() {
        let validator = JwtValidator::new("secret".to_string(), Duration::from_secs(60));
        assert!(validator.validate_token("not-a-jwt").is_err());
    }
}
