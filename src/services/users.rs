//! Authentication and user directory service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use indexmap::IndexMap;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{CreateUser, User},
    },
};

/// Registered identities keyed by username, in registration order
#[derive(Clone)]
pub struct UsersService {
    users: IndexMap<String, User>,
    argon2: Argon2<'static>,
}

impl UsersService {
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            users: IndexMap::new(),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Register an identity; the username must be free
    pub fn register(&mut self, username: &str, password: &str, role: Role) -> AppResult<()> {
        if self.users.contains_key(username) {
            tracing::warn!("User register: {} already exists", username);
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            username: username.to_string(),
            password: self.hash_password(password)?,
            role,
        };
        self.users.insert(user.username.clone(), user);
        tracing::info!("User register: {} ({})", username, role);
        Ok(())
    }

    /// Validate a registration request, parse its role and register it
    pub fn create_user(&mut self, request: CreateUser) -> AppResult<User> {
        let request = request.trimmed();
        request.validate()?;
        let role = request.parse_role()?;

        self.register(&request.username, &request.password, role)?;
        self.get(&request.username)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("User {} missing after register", request.username)))
    }

    /// Return the identity when the username exists and the password matches
    /// exactly. A failed login is a normal outcome, not an error.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let user = self.users.get(username)?;
        if self.verify_password(user, password) {
            tracing::info!("User login: {}", username);
            Some(user.clone())
        } else {
            tracing::debug!("User login rejected: {}", username);
            None
        }
    }

    /// Get user by username
    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Verify user password against the stored hash
    fn verify_password(&self, user: &User, password: &str) -> bool {
        match PasswordHash::new(&user.password) {
            Ok(parsed_hash) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(e) => {
                tracing::error!("Invalid password hash for {}: {}", user.username, e);
                false
            }
        }
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheapest parameters Argon2 accepts, to keep the tests fast
    fn directory() -> UsersService {
        UsersService::new(&AuthConfig {
            argon2_memory_kib: Params::MIN_M_COST,
            argon2_iterations: Params::MIN_T_COST,
            argon2_parallelism: Params::MIN_P_COST,
        })
        .unwrap()
    }

    #[test]
    fn test_register_and_authenticate() {
        let mut users = directory();
        users.register("admin", "admin123", Role::Admin).unwrap();

        let user = users.authenticate("admin", "admin123").unwrap();
        assert_eq!(user.username, "admin");
        assert!(user.is_admin());
        assert_ne!(user.password, "admin123");
    }

    #[test]
    fn test_duplicate_username_keeps_first() {
        let mut users = directory();
        users.register("x", "first", Role::Admin).unwrap();

        let err = users.register("x", "second", Role::User).unwrap_err();
        assert_eq!(err, AppError::DuplicateUsername("x".to_string()));
        assert_eq!(users.len(), 1);
        assert_eq!(users.authenticate("x", "first").unwrap().role, Role::Admin);
        assert!(users.authenticate("x", "second").is_none());
    }

    #[test]
    fn test_authenticate_no_match() {
        let mut users = directory();
        users.register("x", "right", Role::User).unwrap();

        assert!(users.authenticate("x", "wrong").is_none());
        assert!(users.authenticate("x", "Right").is_none());
        assert!(users.authenticate("X", "right").is_none());
        assert!(users.authenticate("ghost", "anything").is_none());
    }

    #[test]
    fn test_create_user() {
        let mut users = directory();
        let user = users
            .create_user(CreateUser::new(" user1 ", "pass1 ", "USER"))
            .unwrap();
        assert_eq!(user.username, "user1");
        assert_eq!(user.role, Role::User);
        assert!(users.authenticate("user1", "pass1").is_some());

        let err = users
            .create_user(CreateUser::new("root", "toor", "superuser"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(users.get("root").is_none());

        let err = users.create_user(CreateUser::new("", "toor", "")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = users
            .create_user(CreateUser::new("user1", "other", "admin"))
            .unwrap_err();
        assert_eq!(err, AppError::DuplicateUsername("user1".to_string()));
    }

    #[test]
    fn test_invalid_params() {
        let result = UsersService::new(&AuthConfig {
            argon2_memory_kib: 0,
            argon2_iterations: 0,
            argon2_parallelism: 0,
        });
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
