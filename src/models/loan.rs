//! Loan (borrow) model

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Standard loan length applied when no other duration is configured
pub const DEFAULT_LOAN_DAYS: i64 = 7;

/// An active loan: who holds the item and when it is due back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub borrower: String,
    pub lent_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl Loan {
    /// Start a loan at `lent_at`, due back `duration` later
    pub fn new(
        borrower: impl Into<String>,
        lent_at: DateTime<Utc>,
        duration: Duration,
    ) -> AppResult<Self> {
        let due_date = lent_at.checked_add_signed(duration).ok_or_else(|| {
            AppError::Validation(format!("Due date out of range: {} + {}", lent_at, duration))
        })?;
        Ok(Self {
            borrower: borrower.into(),
            lent_at,
            due_date,
        })
    }

    /// Due date without the time of day
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date_naive()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_due_date() {
        let lent_at = Utc.with_ymd_and_hms(2024, 3, 28, 23, 30, 0).unwrap();
        let loan = Loan::new("alice", lent_at, Duration::days(DEFAULT_LOAN_DAYS)).unwrap();

        assert_eq!(loan.due_day(), NaiveDate::from_ymd_opt(2024, 4, 4).unwrap());
        assert!(!loan.is_overdue(lent_at));
        assert!(!loan.is_overdue(loan.due_date));
        assert!(loan.is_overdue(loan.due_date + Duration::seconds(1)));
    }

    #[test]
    fn test_due_date_overflow() {
        let result = Loan::new("alice", DateTime::<Utc>::MAX_UTC, Duration::days(1));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
