//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User fields safe to expose past the auth boundary.
/// The stored secret hash is dropped before a record becomes one of these.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Per-field validation/authentication detail. Both keys are always
/// serialized (as `null` when clean) so clients can bind form errors
/// without probing for key presence.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
    pub details: FieldErrors,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn login_request_round_trips() -> Result<()> {
        let request = LoginRequest {
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
        };
        let value = serde_json::to_value(&request)?;
        let email = value
            .get("email")
            .and_then(serde_json::Value::as_str)
            .context("missing email")?;
        assert_eq!(email, "alice@example.com");
        let decoded: LoginRequest = serde_json::from_value(value)?;
        assert_eq!(decoded.password, "password123");
        Ok(())
    }

    #[test]
    fn field_errors_serialize_null_fields() -> Result<()> {
        let details = FieldErrors {
            email: Some("Invalid email format".to_string()),
            password: None,
        };
        let value = serde_json::to_value(&details)?;
        assert_eq!(
            value.get("email").and_then(serde_json::Value::as_str),
            Some("Invalid email format")
        );
        // password key present, explicitly null
        assert!(value.get("password").is_some_and(serde_json::Value::is_null));
        Ok(())
    }

    #[test]
    fn public_user_has_no_secret_material() -> Result<()> {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@test.com".to_string(),
        };
        let value = serde_json::to_value(&user)?;
        let keys: Vec<&String> = value
            .as_object()
            .context("expected object")?
            .keys()
            .collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("password_hash").is_none());
        Ok(())
    }
}
