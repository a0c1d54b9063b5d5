//! Catalog management service

use std::sync::Arc;

use chrono::Duration;
use validator::Validate;

use super::clock::{Clock, SystemClock};
use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, Item},
        loan::Loan,
    },
};

/// Ordered collection of items plus the lending operations on them.
///
/// Queries hand out owned snapshots; the only way to change an item is
/// through the methods below.
#[derive(Clone)]
pub struct CatalogService {
    items: Vec<Item>,
    loan_duration: Duration,
    clock: Arc<dyn Clock>,
}

/// Longest loan the catalog accepts, in days
pub const MAX_LOAN_DAYS: i64 = 366;

impl CatalogService {
    pub fn new(config: &LoansConfig) -> AppResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &LoansConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let days = config.duration_days;
        let loan_duration = Duration::try_days(days)
            .filter(|_| (1..=MAX_LOAN_DAYS).contains(&days))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Loan duration must be between 1 and {} days, got {}",
                    MAX_LOAN_DAYS, days
                ))
            })?;

        Ok(Self {
            items: Vec::new(),
            loan_duration,
            clock,
        })
    }

    /// Append an item; its identifier must not already be in the catalog and
    /// it must not carry a loan
    pub fn add_item(&mut self, item: Item) -> AppResult<()> {
        if !item.is_available() {
            tracing::warn!("Catalog add: {} is still lent", item.identifier);
            return Err(AppError::Validation(format!(
                "Item {} must be available when added",
                item.identifier
            )));
        }
        if self.get_item(&item.identifier).is_some() {
            tracing::warn!("Catalog add: identifier {} already present", item.identifier);
            return Err(AppError::DuplicateIdentifier(item.identifier));
        }
        tracing::info!("Catalog add: {} ({})", item.title, item.identifier);
        self.items.push(item);
        Ok(())
    }

    /// Validate an add-item request and add the resulting item
    pub fn create_item(&mut self, request: CreateItem) -> AppResult<Item> {
        let request = request.trimmed();
        request.validate()?;
        let item = request.into_item();
        self.add_item(item.clone())?;
        Ok(item)
    }

    /// Remove every item with this identifier. Missing identifiers are ignored
    /// and lent items are removed like any other.
    pub fn remove_item(&mut self, identifier: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.identifier != identifier);
        tracing::info!(
            "Catalog remove: {} ({} item(s) removed)",
            identifier,
            before - self.items.len()
        );
    }

    /// Lend an item to `borrower` for the configured loan duration
    pub fn lend(&mut self, identifier: &str, borrower: &str) -> AppResult<Loan> {
        let now = self.clock.now();
        let duration = self.loan_duration;
        let item = self.find_mut(identifier)?;
        item.lend(borrower, now, duration)?;

        let loan = item.loan().cloned().ok_or_else(|| {
            AppError::Internal(format!("Item {} has no loan after lending", identifier))
        })?;
        tracing::info!(
            "Loan: {} lent to {} until {}",
            identifier,
            borrower,
            loan.due_day()
        );
        Ok(loan)
    }

    /// Return a lent item
    pub fn return_item(&mut self, identifier: &str) -> AppResult<()> {
        self.find_mut(identifier)?.return_item()?;
        tracing::info!("Loan: {} returned", identifier);
        Ok(())
    }

    /// Get an item by identifier
    pub fn get_item(&self, identifier: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.identifier == identifier)
    }

    /// Items that can be borrowed, in insertion order
    pub fn available_items(&self) -> Vec<Item> {
        self.collect(Item::is_available)
    }

    /// Items whose author matches `name`, ignoring case
    pub fn items_by_author(&self, name: &str) -> Vec<Item> {
        tracing::debug!("Catalog search: author {:?}", name);
        self.collect(|item| item.has_author(name))
    }

    /// Every item, in insertion order
    pub fn all_items(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Items currently lent to `borrower`
    pub fn loans_for(&self, borrower: &str) -> Vec<Item> {
        self.collect(|item| item.borrower() == Some(borrower))
    }

    /// Lent items whose due date has passed
    pub fn overdue_items(&self) -> Vec<Item> {
        let now = self.clock.now();
        self.collect(|item| item.is_overdue(now))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, identifier: &str) -> AppResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.identifier == identifier)
            .ok_or_else(|| AppError::ItemNotFound(identifier.to_string()))
    }

    fn collect(&self, filter: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.items.iter().filter(|item| filter(*item)).cloned().collect()
    }
}
