//! Business logic services

pub mod catalog;
pub mod clock;
pub mod users;

use crate::{
    config::{AppConfig, SeedConfig},
    error::AppResult,
    models::{item::CreateItem, user::CreateUser},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services and register the configured seed data
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let mut services = Self {
            catalog: catalog::CatalogService::new(&config.loans)?,
            users: users::UsersService::new(&config.auth)?,
        };
        services.seed(&config.seed)?;
        Ok(services)
    }

    fn seed(&mut self, seed: &SeedConfig) -> AppResult<()> {
        for user in &seed.users {
            self.users.create_user(CreateUser::new(
                user.username.as_str(),
                user.password.as_str(),
                user.role.as_str(),
            ))?;
        }

        for item in &seed.items {
            self.catalog.create_item(CreateItem {
                title: item.title.clone(),
                author: item.author.clone(),
                identifier: item.identifier.clone(),
                ebook_url: item.ebook_url.clone(),
            })?;
        }

        tracing::info!(
            "Seeded {} user(s) and {} item(s)",
            seed.users.len(),
            seed.items.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, SeedItem, SeedUser};
    use crate::error::AppError;
    use crate::models::Role;

    fn fast_config() -> AppConfig {
        AppConfig {
            auth: AuthConfig {
                argon2_memory_kib: argon2::Params::MIN_M_COST,
                argon2_iterations: argon2::Params::MIN_T_COST,
                argon2_parallelism: argon2::Params::MIN_P_COST,
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_seed_accounts() {
        let services = Services::new(&fast_config()).unwrap();

        assert_eq!(services.users.len(), 2);
        assert_eq!(services.users.authenticate("admin", "admin123").unwrap().role, Role::Admin);
        assert_eq!(services.users.authenticate("user1", "pass1").unwrap().role, Role::User);
        assert!(services.catalog.is_empty());
    }

    #[test]
    fn test_seed_items() {
        let mut config = fast_config();
        config.seed.items = vec![
            SeedItem {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                identifier: "111".to_string(),
                ebook_url: None,
            },
            SeedItem {
                title: "Neuromancer".to_string(),
                author: "William Gibson".to_string(),
                identifier: "222".to_string(),
                ebook_url: Some("https://ebooks.example/neuromancer".to_string()),
            },
        ];

        let services = Services::new(&config).unwrap();
        assert_eq!(services.catalog.available_items().len(), 2);
    }

    #[test]
    fn test_invalid_seed_user() {
        let mut config = fast_config();
        config.seed.users.push(SeedUser {
            username: "librarian".to_string(),
            password: "books".to_string(),
            role: "librarian".to_string(),
        });

        assert!(matches!(Services::new(&config), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_invalid_loan_duration() {
        let mut config = fast_config();
        config.loans.duration_days = -3;

        assert!(matches!(Services::new(&config), Err(AppError::Validation(_))));
    }
}
