//! Catalog management service: validated CRUD and list/detail queries

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorDetail, Book, BookDetail, BookInstance, CreateAuthor, CreateBook,
        CreateBookInstance, Genre, GenreName, Price,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // Genres and prices
    // =========================================================================

    pub async fn create_genre(&self, request: &GenreName) -> AppResult<Genre> {
        request.validate()?;
        let genre = self.repository.create_genre(&request.name).await?;
        tracing::info!("Catalog: created genre {} ({})", genre.id, genre.name);
        Ok(genre)
    }

    pub async fn rename_genre(&self, id: i32, request: &GenreName) -> AppResult<Genre> {
        request.validate()?;
        self.repository.rename_genre(id, &request.name).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.delete_genre(id).await?;
        tracing::info!("Catalog: deleted genre {}", id);
        Ok(())
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.list_genres().await
    }

    /// Any integer is a valid price value
    pub async fn create_price(&self, value: i32) -> AppResult<Price> {
        self.repository.create_price(value).await
    }

    /// Books priced with it keep existing without a price
    pub async fn delete_price(&self, id: i32) -> AppResult<()> {
        self.repository.delete_price(id).await
    }

    // =========================================================================
    // Authors
    // =========================================================================

    pub async fn create_author(&self, request: &CreateAuthor) -> AppResult<Author> {
        request.validate()?;
        let author = self.repository.create_author(request).await?;
        tracing::info!("Catalog: created author {} ({})", author.id, author);
        Ok(author)
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.get_author(id).await
    }

    pub async fn author_detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.get_author(id).await?;
        let books = self.repository.list_books_by_author(id).await?;
        Ok(AuthorDetail { author, books })
    }

    /// Authors ordered by last name, then first name
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.list_authors().await
    }

    /// Their books stay in the catalog without an author
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.delete_author(id).await?;
        tracing::info!("Catalog: deleted author {}", id);
        Ok(())
    }

    // =========================================================================
    // Books
    // =========================================================================

    pub async fn create_book(&self, request: &CreateBook) -> AppResult<Book> {
        request.validate()?;
        if let Some(author_id) = request.author_id {
            self.repository.get_author(author_id).await?;
        }
        if let Some(price_id) = request.price_id {
            self.repository.get_price(price_id).await?;
        }
        self.check_genres(&request.genre_ids).await?;

        let book = self.repository.create_book(request).await?;
        tracing::info!("Catalog: created book {} ({})", book.id, book.title);
        Ok(book)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.get_book(id).await
    }

    /// Book with its author, price and every copy
    pub async fn book_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.repository.get_book(id).await?;
        let author = match book.author_id {
            Some(author_id) => Some(self.repository.get_author(author_id).await?),
            None => None,
        };
        let price = match book.price_id {
            Some(price_id) => Some(self.repository.get_price(price_id).await?),
            None => None,
        };
        let instances = self.repository.list_instances_for_book(id).await?;

        Ok(BookDetail {
            book,
            author,
            price,
            instances,
        })
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.list_books().await
    }

    pub async fn set_book_genres(&self, id: i32, genre_ids: &[i32]) -> AppResult<Book> {
        self.check_genres(genre_ids).await?;
        self.repository.set_book_genres(id, genre_ids).await
    }

    /// Its copies stay in the catalog without a book
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.delete_book(id).await?;
        tracing::info!("Catalog: deleted book {}", id);
        Ok(())
    }

    async fn check_genres(&self, genre_ids: &[i32]) -> AppResult<()> {
        for genre_id in genre_ids {
            self.repository.get_genre(*genre_id).await?;
        }
        Ok(())
    }

    // =========================================================================
    // Book instances
    // =========================================================================

    /// Register a copy; it starts in maintenance
    pub async fn create_instance(&self, request: &CreateBookInstance) -> AppResult<BookInstance> {
        request.validate()?;
        if let Some(book_id) = request.book_id {
            self.repository.get_book(book_id).await?;
        }
        let instance = self.repository.create_instance(request).await?;
        tracing::info!("Catalog: registered book instance {}", instance.id);
        Ok(instance)
    }

    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.get_instance(id).await
    }

    /// All copies, soonest due first, copies without a due date last
    pub async fn list_instances(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.list_instances().await
    }

    pub async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete_instance(id).await?;
        tracing::info!("Catalog: deleted book instance {}", id);
        Ok(())
    }
}
