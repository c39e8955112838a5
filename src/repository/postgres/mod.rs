//! PostgreSQL catalog store

mod authors;
mod books;
mod genres;
mod instances;
mod prices;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use uuid::Uuid;

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{
        Author, Book, BookInstance, CatalogSummary, CreateAuthor, CreateBook,
        CreateBookInstance, Genre, LoanState, LoanStatus, Price, SummaryFilter,
    },
};

use super::CatalogStore;

pub use authors::AuthorsRepository;
pub use books::BooksRepository;
pub use genres::GenresRepository;
pub use instances::InstancesRepository;
pub use prices::PricesRepository;

/// Catalog store holding the database connection pool
#[derive(Clone)]
pub struct PgCatalogStore {
    pub pool: Pool<Postgres>,
    pub genres: GenresRepository,
    pub prices: PricesRepository,
    pub authors: AuthorsRepository,
    pub books: BooksRepository,
    pub instances: InstancesRepository,
}

impl PgCatalogStore {
    /// Create a new store with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            genres: GenresRepository::new(pool.clone()),
            prices: PricesRepository::new(pool.clone()),
            authors: AuthorsRepository::new(pool.clone()),
            books: BooksRepository::new(pool.clone()),
            instances: InstancesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open a pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn create_genre(&self, name: &str) -> AppResult<Genre> {
        self.genres.create(name).await
    }

    async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.genres.get_by_id(id).await
    }

    async fn rename_genre(&self, id: i32, name: &str) -> AppResult<Genre> {
        self.genres.rename(id, name).await
    }

    async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.genres.delete(id).await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }

    async fn count_genres_by_name(&self, name: &str) -> AppResult<i64> {
        self.genres.count_by_name(name).await
    }

    async fn create_price(&self, value: i32) -> AppResult<Price> {
        self.prices.create(value).await
    }

    async fn get_price(&self, id: i32) -> AppResult<Price> {
        self.prices.get_by_id(id).await
    }

    async fn delete_price(&self, id: i32) -> AppResult<()> {
        self.prices.delete(id).await
    }

    async fn create_author(&self, author: &CreateAuthor) -> AppResult<Author> {
        self.authors.create(author).await
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.authors.get_by_id(id).await
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.authors.delete(id).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn create_book(&self, book: &CreateBook) -> AppResult<Book> {
        self.books.create(book).await
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    async fn list_books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        self.books.list_by_author(author_id).await
    }

    async fn set_book_genres(&self, id: i32, genre_ids: &[i32]) -> AppResult<Book> {
        self.books.set_genres(id, genre_ids).await
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.books.delete(id).await
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn count_books_by_title(&self, title: &str) -> AppResult<i64> {
        self.books.count_by_title(title).await
    }

    async fn create_instance(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        self.instances.create(instance).await
    }

    async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.instances.get_by_id(id).await
    }

    async fn list_instances(&self) -> AppResult<Vec<BookInstance>> {
        self.instances.list().await
    }

    async fn list_instances_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        self.instances.list_for_book(book_id).await
    }

    async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.instances.delete(id).await
    }

    async fn count_instances(&self, status: Option<LoanStatus>) -> AppResult<i64> {
        self.instances.count(status).await
    }

    async fn list_loans(&self, borrower_id: Option<i32>) -> AppResult<Vec<BookInstance>> {
        self.instances.list_loans(borrower_id).await
    }

    async fn list_overdue(&self, as_of: NaiveDate) -> AppResult<Vec<BookInstance>> {
        self.instances.list_overdue(as_of).await
    }

    async fn transition_instance(
        &self,
        id: Uuid,
        expected: LoanStatus,
        next: LoanState,
    ) -> AppResult<Option<BookInstance>> {
        self.instances.transition(id, expected, next).await
    }

    async fn renew_instance(
        &self,
        id: Uuid,
        due_back: NaiveDate,
    ) -> AppResult<Option<BookInstance>> {
        self.instances.renew(id, due_back).await
    }

    /// All counts come from one statement, so they share a snapshot
    async fn summary(&self, filter: &SummaryFilter) -> AppResult<CatalogSummary> {
        let summary = sqlx::query_as::<_, CatalogSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books) AS books,
                (SELECT COUNT(*) FROM book_instances) AS instances,
                (SELECT COUNT(*) FROM book_instances WHERE status = $1) AS available_instances,
                (SELECT COUNT(*) FROM authors) AS authors,
                (SELECT COUNT(*) FROM genres WHERE LOWER(name) = LOWER($2)) AS genres_matching,
                (SELECT COUNT(*) FROM books WHERE LOWER(title) = LOWER($3)) AS books_matching
            "#,
        )
        .bind(LoanStatus::Available.code())
        .bind(&filter.genre_name)
        .bind(&filter.book_title)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
