//! Catalog store: persistence for genres, prices, authors, books and copies
//!
//! `PgCatalogStore` is the production backend; `MemoryCatalogStore` keeps
//! everything in process and backs the test-suite.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, Book, BookInstance, CatalogSummary, CreateAuthor, CreateBook,
        CreateBookInstance, Genre, LoanState, LoanStatus, Price, SummaryFilter,
    },
};

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Shared handle on whichever store backs the services
pub type Repository = Arc<dyn CatalogStore>;

/// Storage operations used by the services.
///
/// Lookups by id fail with `AppError::NotFound`; deleting a row referenced by
/// books or copies clears the reference instead of cascading. Instance lists
/// are ordered by `due_back` ascending with missing dates last.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Genres
    async fn create_genre(&self, name: &str) -> AppResult<Genre>;
    async fn get_genre(&self, id: i32) -> AppResult<Genre>;
    async fn rename_genre(&self, id: i32, name: &str) -> AppResult<Genre>;
    async fn delete_genre(&self, id: i32) -> AppResult<()>;
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    /// Case-insensitive exact match. The memory store folds with Unicode
    /// lowercase; Postgres uses `LOWER()`, which only folds non-ASCII letters
    /// when the database collation is not `C`.
    async fn count_genres_by_name(&self, name: &str) -> AppResult<i64>;

    // Prices
    async fn create_price(&self, value: i32) -> AppResult<Price>;
    async fn get_price(&self, id: i32) -> AppResult<Price>;
    async fn delete_price(&self, id: i32) -> AppResult<()>;

    // Authors
    async fn create_author(&self, author: &CreateAuthor) -> AppResult<Author>;
    async fn get_author(&self, id: i32) -> AppResult<Author>;
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn delete_author(&self, id: i32) -> AppResult<()>;
    async fn count_authors(&self) -> AppResult<i64>;

    // Books
    async fn create_book(&self, book: &CreateBook) -> AppResult<Book>;
    async fn get_book(&self, id: i32) -> AppResult<Book>;
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn list_books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>>;
    async fn set_book_genres(&self, id: i32, genre_ids: &[i32]) -> AppResult<Book>;
    async fn delete_book(&self, id: i32) -> AppResult<()>;
    async fn count_books(&self) -> AppResult<i64>;
    /// Same folding rules as `count_genres_by_name`
    async fn count_books_by_title(&self, title: &str) -> AppResult<i64>;

    // Book instances
    async fn create_instance(&self, instance: &CreateBookInstance) -> AppResult<BookInstance>;
    async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance>;
    async fn list_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn list_instances_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>>;
    async fn delete_instance(&self, id: Uuid) -> AppResult<()>;
    /// Count copies, optionally only those in `status`
    async fn count_instances(&self, status: Option<LoanStatus>) -> AppResult<i64>;
    /// Copies on loan, optionally only those lent to `borrower_id`
    async fn list_loans(&self, borrower_id: Option<i32>) -> AppResult<Vec<BookInstance>>;
    async fn list_overdue(&self, as_of: NaiveDate) -> AppResult<Vec<BookInstance>>;

    /// Write status, borrower and due date in one step, only if the copy is
    /// still in `expected`. `Ok(None)` means the status moved underneath us.
    async fn transition_instance(
        &self,
        id: Uuid,
        expected: LoanStatus,
        next: LoanState,
    ) -> AppResult<Option<BookInstance>>;

    /// Move the due date of a copy that is still on loan. `Ok(None)` means the
    /// copy is no longer lent out.
    async fn renew_instance(&self, id: Uuid, due_back: NaiveDate)
        -> AppResult<Option<BookInstance>>;

    async fn summary(&self, filter: &SummaryFilter) -> AppResult<CatalogSummary>;
}
