use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for registering a push delivery token
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterPushTokenDto {
    #[validate(length(min = 1, max = 512, message = "Token is required"))]
    pub token: String,
}
