//! Loan lifecycle: status transitions of book copies

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{BookInstance, LoanState, LoanStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Move a copy to `status`.
    ///
    /// Lending requires both a borrower and a due date; every other status
    /// clears them. Fails with `InvalidState` if the copy changed status
    /// between the check and the write.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: LoanStatus,
        borrower_id: Option<i32>,
        due_back: Option<NaiveDate>,
    ) -> AppResult<BookInstance> {
        let current = self.repository.get_instance(id).await?;

        if !current.status.can_transition_to(status) {
            tracing::warn!(
                "Rejected transition of {} from {:?} to {:?}",
                id,
                current.status,
                status
            );
            return Err(AppError::InvalidTransition(format!(
                "Cannot move book instance {} from {} to {}",
                id, current.status, status
            )));
        }

        let next = match (status, borrower_id, due_back) {
            (LoanStatus::OnLoan, Some(borrower_id), Some(due_back)) => {
                LoanState::on_loan(borrower_id, due_back)
            }
            (LoanStatus::OnLoan, None, _) => {
                return Err(AppError::InvalidTransition(format!(
                    "Book instance {} cannot go on loan without a borrower",
                    id
                )));
            }
            (LoanStatus::OnLoan, Some(_), None) => {
                return Err(AppError::InvalidTransition(format!(
                    "Book instance {} cannot go on loan without a due date",
                    id
                )));
            }
            (other, _, _) => LoanState::idle(other),
        };

        let updated = self
            .repository
            .transition_instance(id, current.status, next)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState(format!(
                    "Book instance {} is no longer {}",
                    id, current.status
                ))
            })?;

        tracing::info!(
            "Book instance {} moved from {:?} to {:?}",
            id,
            current.status,
            updated.status
        );
        Ok(updated)
    }

    /// Whether the copy is on loan with a due date before `as_of`
    pub async fn is_overdue(&self, id: Uuid, as_of: NaiveDate) -> AppResult<bool> {
        let instance = self.repository.get_instance(id).await?;
        Ok(instance.is_overdue(as_of))
    }
}
