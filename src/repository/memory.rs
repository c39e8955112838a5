//! In-process catalog store
//!
//! Every operation takes the table lock once, so each call observes and
//! produces a consistent state. Reference semantics follow the database
//! schema: deleting an author, price or book clears the pointers to it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookInstance, CatalogSummary, CreateAuthor, CreateBook,
        CreateBookInstance, Genre, LoanState, LoanStatus, Price, SummaryFilter,
    },
};

use super::CatalogStore;

#[derive(Default)]
struct Tables {
    next_id: i32,
    genres: BTreeMap<i32, Genre>,
    prices: BTreeMap<i32, Price>,
    authors: BTreeMap<i32, Author>,
    /// Books without their genres; see `book_genres`
    books: BTreeMap<i32, Book>,
    book_genres: BTreeSet<(i32, i32)>,
    instances: HashMap<Uuid, BookInstance>,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn materialize(&self, book: &Book) -> Book {
        let mut genres: Vec<Genre> = self
            .book_genres
            .range((book.id, i32::MIN)..=(book.id, i32::MAX))
            .filter_map(|(_, genre_id)| self.genres.get(genre_id).cloned())
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Book {
            genres,
            ..book.clone()
        }
    }

    fn books_where(&self, keep: impl Fn(&Book) -> bool) -> Vec<Book> {
        let mut books: Vec<Book> = self
            .books
            .values()
            .filter(|b| keep(*b))
            .map(|b| self.materialize(b))
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        books
    }

    fn instances_where(&self, keep: impl Fn(&BookInstance) -> bool) -> Vec<BookInstance> {
        let mut instances: Vec<BookInstance> =
            self.instances.values().filter(|i| keep(*i)).cloned().collect();
        instances.sort_by_key(|i| i.sort_key());
        instances
    }

    fn count_instances(&self, status: Option<LoanStatus>) -> i64 {
        self.instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count() as i64
    }

    fn count_genres_by_name(&self, name: &str) -> i64 {
        let name = name.to_lowercase();
        self.genres
            .values()
            .filter(|g| g.name.to_lowercase() == name)
            .count() as i64
    }

    fn count_books_by_title(&self, title: &str) -> i64 {
        let title = title.to_lowercase();
        self.books
            .values()
            .filter(|b| b.title.to_lowercase() == title)
            .count() as i64
    }
}

#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn genre_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Genre with id {} not found", id))
}

fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

fn instance_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book instance {} not found", id))
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn create_genre(&self, name: &str) -> AppResult<Genre> {
        let mut tables = self.tables.write().await;
        let genre = Genre {
            id: tables.allocate_id(),
            name: name.to_string(),
        };
        tables.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        let tables = self.tables.read().await;
        tables.genres.get(&id).cloned().ok_or_else(|| genre_not_found(id))
    }

    async fn rename_genre(&self, id: i32, name: &str) -> AppResult<Genre> {
        let mut tables = self.tables.write().await;
        let genre = tables.genres.get_mut(&id).ok_or_else(|| genre_not_found(id))?;
        genre.name = name.to_string();
        Ok(genre.clone())
    }

    async fn delete_genre(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.genres.remove(&id).ok_or_else(|| genre_not_found(id))?;
        tables.book_genres.retain(|(_, genre_id)| *genre_id != id);
        Ok(())
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let tables = self.tables.read().await;
        let mut genres: Vec<Genre> = tables.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(genres)
    }

    async fn count_genres_by_name(&self, name: &str) -> AppResult<i64> {
        Ok(self.tables.read().await.count_genres_by_name(name))
    }

    async fn create_price(&self, value: i32) -> AppResult<Price> {
        let mut tables = self.tables.write().await;
        let price = Price {
            id: tables.allocate_id(),
            value,
        };
        tables.prices.insert(price.id, price);
        Ok(price)
    }

    async fn get_price(&self, id: i32) -> AppResult<Price> {
        let tables = self.tables.read().await;
        tables
            .prices
            .get(&id)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Price with id {} not found", id)))
    }

    async fn delete_price(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .prices
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Price with id {} not found", id)))?;
        for book in tables.books.values_mut() {
            if book.price_id == Some(id) {
                book.price_id = None;
            }
        }
        Ok(())
    }

    async fn create_author(&self, author: &CreateAuthor) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let created = Author {
            id: tables.allocate_id(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        };
        tables.authors.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        let tables = self.tables.read().await;
        tables
            .authors
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        authors.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(authors)
    }

    async fn delete_author(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .authors
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;
        for book in tables.books.values_mut() {
            if book.author_id == Some(id) {
                book.author_id = None;
            }
        }
        Ok(())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn create_book(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let stored = Book {
            id,
            title: book.title.clone(),
            author_id: book.author_id,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genres: Vec::new(),
            price_id: book.price_id,
            language: book.language,
        };
        tables.books.insert(id, stored.clone());
        for genre_id in &book.genre_ids {
            tables.book_genres.insert((id, *genre_id));
        }
        Ok(tables.materialize(&stored))
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        let tables = self.tables.read().await;
        let book = tables.books.get(&id).ok_or_else(|| book_not_found(id))?;
        Ok(tables.materialize(book))
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.read().await.books_where(|_| true))
    }

    async fn list_books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        Ok(self
            .tables
            .read()
            .await
            .books_where(|b| b.author_id == Some(author_id)))
    }

    async fn set_book_genres(&self, id: i32, genre_ids: &[i32]) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Err(book_not_found(id));
        }
        tables.book_genres.retain(|(book_id, _)| *book_id != id);
        for genre_id in genre_ids {
            tables.book_genres.insert((id, *genre_id));
        }
        let book = tables.books.get(&id).ok_or_else(|| book_not_found(id))?;
        Ok(tables.materialize(book))
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.books.remove(&id).ok_or_else(|| book_not_found(id))?;
        tables.book_genres.retain(|(book_id, _)| *book_id != id);
        for instance in tables.instances.values_mut() {
            if instance.book_id == Some(id) {
                instance.book_id = None;
            }
        }
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }

    async fn count_books_by_title(&self, title: &str) -> AppResult<i64> {
        Ok(self.tables.read().await.count_books_by_title(title))
    }

    async fn create_instance(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        let mut tables = self.tables.write().await;
        let created = BookInstance {
            id: Uuid::new_v4(),
            book_id: instance.book_id,
            imprint: instance.imprint.clone(),
            due_back: None,
            status: LoanStatus::default(),
            borrower_id: None,
        };
        tables.instances.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        let tables = self.tables.read().await;
        tables
            .instances
            .get(&id)
            .cloned()
            .ok_or_else(|| instance_not_found(id))
    }

    async fn list_instances(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.tables.read().await.instances_where(|_| true))
    }

    async fn list_instances_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        Ok(self
            .tables
            .read()
            .await
            .instances_where(|i| i.book_id == Some(book_id)))
    }

    async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .instances
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| instance_not_found(id))
    }

    async fn count_instances(&self, status: Option<LoanStatus>) -> AppResult<i64> {
        Ok(self.tables.read().await.count_instances(status))
    }

    async fn list_loans(&self, borrower_id: Option<i32>) -> AppResult<Vec<BookInstance>> {
        Ok(self.tables.read().await.instances_where(|i| {
            i.status == LoanStatus::OnLoan
                && borrower_id.map_or(true, |b| i.borrower_id == Some(b))
        }))
    }

    async fn list_overdue(&self, as_of: NaiveDate) -> AppResult<Vec<BookInstance>> {
        Ok(self
            .tables
            .read()
            .await
            .instances_where(|i| i.is_overdue(as_of)))
    }

    async fn transition_instance(
        &self,
        id: Uuid,
        expected: LoanStatus,
        next: LoanState,
    ) -> AppResult<Option<BookInstance>> {
        let mut tables = self.tables.write().await;
        let instance = tables
            .instances
            .get_mut(&id)
            .ok_or_else(|| instance_not_found(id))?;
        if instance.status != expected {
            return Ok(None);
        }
        instance.status = next.status;
        instance.borrower_id = next.borrower_id;
        instance.due_back = next.due_back;
        Ok(Some(instance.clone()))
    }

    async fn renew_instance(
        &self,
        id: Uuid,
        due_back: NaiveDate,
    ) -> AppResult<Option<BookInstance>> {
        let mut tables = self.tables.write().await;
        let instance = tables
            .instances
            .get_mut(&id)
            .ok_or_else(|| instance_not_found(id))?;
        if instance.status != LoanStatus::OnLoan {
            return Ok(None);
        }
        instance.due_back = Some(due_back);
        Ok(Some(instance.clone()))
    }

    async fn summary(&self, filter: &SummaryFilter) -> AppResult<CatalogSummary> {
        let tables = self.tables.read().await;
        Ok(CatalogSummary {
            books: tables.books.len() as i64,
            instances: tables.count_instances(None),
            available_instances: tables.count_instances(Some(LoanStatus::Available)),
            authors: tables.authors.len() as i64,
            genres_matching: tables.count_genres_by_name(&filter.genre_name),
            books_matching: tables.count_books_by_title(&filter.book_title),
        })
    }
}
