//! Book instance (physical lendable copy) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::enums::LoanStatus;
use crate::error::{AppError, AppResult};

/// One physical copy of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
}

impl BookInstance {
    /// True while the copy is lent out past its due date
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.status == LoanStatus::OnLoan && self.due_back.map_or(false, |due| due < as_of)
    }

    /// Listing order: due date ascending, copies without one last
    pub fn sort_key(&self) -> (bool, Option<NaiveDate>, Uuid) {
        (self.due_back.is_none(), self.due_back, self.id)
    }
}

impl std::fmt::Display for BookInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.status)
    }
}

/// Row shape of the `book_instances` table
#[derive(Debug, Clone, FromRow)]
pub struct BookInstanceRow {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: String,
    pub borrower_id: Option<i32>,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> AppResult<Self> {
        let status = LoanStatus::from_code(&row.status).ok_or_else(|| {
            AppError::StoreFailure(format!(
                "Book instance {} has unknown status code {:?}",
                row.id, row.status
            ))
        })?;
        Ok(BookInstance {
            id: row.id,
            book_id: row.book_id,
            imprint: row.imprint,
            due_back: row.due_back,
            status,
            borrower_id: row.borrower_id,
        })
    }
}

/// Create book instance request. New copies start in maintenance.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1 to 200 characters"))]
    pub imprint: String,
}

/// Loan fields written together with a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanState {
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub due_back: Option<NaiveDate>,
}

impl LoanState {
    pub fn on_loan(borrower_id: i32, due_back: NaiveDate) -> Self {
        Self {
            status: LoanStatus::OnLoan,
            borrower_id: Some(borrower_id),
            due_back: Some(due_back),
        }
    }

    pub fn idle(status: LoanStatus) -> Self {
        Self {
            status,
            borrower_id: None,
            due_back: None,
        }
    }
}
