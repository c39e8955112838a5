//! Read-only catalog queries backing the listing pages

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{BookInstance, CatalogSummary, LoanStatus, SessionState, SummaryFilter, VisitTally},
    repository::Repository,
};

#[derive(Clone)]
pub struct QueryService {
    repository: Repository,
}

impl QueryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn count_books(&self) -> AppResult<i64> {
        self.repository.count_books().await
    }

    pub async fn count_instances(&self) -> AppResult<i64> {
        self.repository.count_instances(None).await
    }

    pub async fn count_available_instances(&self) -> AppResult<i64> {
        self.repository
            .count_instances(Some(LoanStatus::Available))
            .await
    }

    pub async fn count_authors(&self) -> AppResult<i64> {
        self.repository.count_authors().await
    }

    /// Case-insensitive exact match on genre name
    pub async fn count_genres_by_name(&self, name: &str) -> AppResult<i64> {
        self.repository.count_genres_by_name(name).await
    }

    /// Case-insensitive exact match on book title
    pub async fn count_books_by_title(&self, title: &str) -> AppResult<i64> {
        self.repository.count_books_by_title(title).await
    }

    /// Every index-page count, taken from the same snapshot
    pub async fn summary(&self, filter: &SummaryFilter) -> AppResult<CatalogSummary> {
        let summary = self.repository.summary(filter).await?;
        tracing::debug!("Catalog summary: {:?}", summary);
        Ok(summary)
    }

    /// Copies lent to `borrower_id`, soonest due first
    pub async fn list_loans_for_user(&self, borrower_id: i32) -> AppResult<Vec<BookInstance>> {
        self.repository.list_loans(Some(borrower_id)).await
    }

    /// Every copy on loan, soonest due first
    pub async fn list_all_loans(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.list_loans(None).await
    }

    pub async fn list_overdue(&self, as_of: NaiveDate) -> AppResult<Vec<BookInstance>> {
        self.repository.list_overdue(as_of).await
    }

    /// Count a page visit. The caller stores `next_state` back into the session.
    pub fn increment_and_get_visit_count(&self, session: &SessionState) -> VisitTally {
        VisitTally {
            current: session.num_visits,
            next_state: SessionState {
                num_visits: session.num_visits.saturating_add(1),
            },
        }
    }
}
