//! Item (catalog entry) model and its lending state machine.
//!
//! An item is either a physical book or an e-book with a resource URL. It
//! cycles between `Available` and `Lent` for as long as it stays in the
//! catalog; the transitions are the only way its state changes.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use validator::Validate;

use super::loan::Loan;
use crate::error::{AppError, AppResult};

static EBOOK_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+\.\S+$").expect("valid regex"));

/// Physical copy or electronic resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    Physical,
    Electronic { url: String },
}

impl ItemKind {
    pub fn ebook_url(&self) -> Option<&str> {
        match self {
            ItemKind::Physical => None,
            ItemKind::Electronic { url } => Some(url.as_str()),
        }
    }
}

/// Whether an item can be borrowed right now
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LendingState {
    #[default]
    Available,
    Lent(Loan),
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub author: String,
    /// Unique key within a catalog (usually the ISBN)
    pub identifier: String,
    pub kind: ItemKind,
    #[serde(default)]
    state: LendingState,
}

impl Item {
    pub fn physical(
        title: impl Into<String>,
        author: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            identifier: identifier.into(),
            kind: ItemKind::Physical,
            state: LendingState::Available,
        }
    }

    pub fn electronic(
        title: impl Into<String>,
        author: impl Into<String>,
        identifier: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind: ItemKind::Electronic { url: url.into() },
            ..Self::physical(title, author, identifier)
        }
    }

    pub fn state(&self) -> &LendingState {
        &self.state
    }

    pub fn loan(&self) -> Option<&Loan> {
        match &self.state {
            LendingState::Available => None,
            LendingState::Lent(loan) => Some(loan),
        }
    }

    pub fn is_available(&self) -> bool {
        self.loan().is_none()
    }

    pub fn borrower(&self) -> Option<&str> {
        self.loan().map(|loan| loan.borrower.as_str())
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.loan().map(Loan::due_day)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.loan().is_some_and(|loan| loan.is_overdue(now))
    }

    /// Compare the author against a name, ignoring case and Unicode composition
    pub fn has_author(&self, name: &str) -> bool {
        normalize_name(&self.author) == normalize_name(name)
    }

    /// Lend the item to `borrower`, due back `duration` after `now`
    pub fn lend(&mut self, borrower: &str, now: DateTime<Utc>, duration: Duration) -> AppResult<()> {
        if !self.is_available() {
            return Err(AppError::AlreadyLent(self.identifier.clone()));
        }
        self.state = LendingState::Lent(Loan::new(borrower, now, duration)?);
        Ok(())
    }

    /// Take the item back, clearing borrower and due date
    pub fn return_item(&mut self) -> AppResult<()> {
        if self.is_available() {
            return Err(AppError::NotLent(self.identifier.clone()));
        }
        self.state = LendingState::Available;
        Ok(())
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {} (ID: {}) - ", self.title, self.author, self.identifier)?;
        match &self.state {
            LendingState::Available => write!(f, "Available")?,
            LendingState::Lent(loan) => {
                write!(f, "Lent to {} (Due {})", loan.borrower, loan.due_day())?
            }
        }
        if let Some(url) = self.kind.ebook_url() {
            write!(f, " [eBook: {}]", url)?;
        }
        Ok(())
    }
}

/// NFC-composed, lowercased form used for name matching
pub fn normalize_name(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

/// Add item request. `ebook_url` set means the item is an e-book.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(regex(
        path = *EBOOK_URL,
        message = "Enter a valid eBook URL (starting with http:// or https://)"
    ))]
    pub ebook_url: Option<String>,
}

impl CreateItem {
    /// Strip surrounding whitespace from every field
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            identifier: self.identifier.trim().to_string(),
            ebook_url: self.ebook_url.map(|url| url.trim().to_string()),
        }
    }

    pub fn into_item(self) -> Item {
        match self.ebook_url {
            Some(url) => Item::electronic(self.title, self.author, self.identifier, url),
            None => Item::physical(self.title, self.author, self.identifier),
        }
    }
}
