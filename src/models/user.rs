//! User model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::Role;
use crate::error::{AppError, AppResult};

/// Registered identity. The credential is kept as an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Create user request, as typed in by a caller
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateUser {
    /// Login (username) - required and unique, used for authentication
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// `admin` or `user`; blank selects `user`
    #[serde(default)]
    pub role: String,
}

impl CreateUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    /// Strip surrounding whitespace from username and password
    pub fn trimmed(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
            role: self.role,
        }
    }

    pub fn parse_role(&self) -> AppResult<Role> {
        self.role.parse().map_err(AppError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let request = CreateUser::new(" alice ", " secret", "").trimmed();
        assert!(request.validate().is_ok());
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "secret");
        assert_eq!(request.parse_role(), Ok(Role::User));

        let blank = CreateUser::new("   ", "secret", "user").trimmed();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let request = CreateUser::new("mallory", "secret", "superuser");
        assert!(matches!(request.parse_role(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User {
            username: "admin".to_string(),
            password: "$argon2id$...".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "admin", "role": "admin" }));
    }
}
