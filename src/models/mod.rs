//! Data models for the library core

pub mod enums;
pub mod item;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use enums::Role;
pub use item::{CreateItem, Item, ItemKind, LendingState};
pub use loan::Loan;
pub use user::{CreateUser, User};
