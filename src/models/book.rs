//! Book (title-level record) model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{AppError, AppResult};

use super::{
    author::Author, book_instance::BookInstance, enums::Language, genre::Genre, price::Price,
};

static ISBN13_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{13}$").unwrap());

/// A title in the catalog, not a specific copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<Genre>,
    pub price_id: Option<i32>,
    pub language: Language,
}

/// Row shape of the `books` table; genres live in `book_genres`
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
    pub price_id: Option<i32>,
    pub language: String,
}

impl BookRow {
    pub fn into_book(self, genres: Vec<Genre>) -> AppResult<Book> {
        let language = Language::from_code(&self.language).ok_or_else(|| {
            AppError::StoreFailure(format!(
                "Book {} has unknown language code {:?}",
                self.id, self.language
            ))
        })?;
        Ok(Book {
            id: self.id,
            title: self.title,
            author_id: self.author_id,
            summary: self.summary,
            isbn: self.isbn,
            genres,
            price_id: self.price_id,
            language,
        })
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Book with everything its detail page shows
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub price: Option<Price>,
    pub instances: Vec<BookInstance>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    pub author_id: Option<i32>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    #[serde(default)]
    pub summary: String,
    #[validate(regex(path = *ISBN13_RE, message = "ISBN must be 13 digits"))]
    pub isbn: String,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    pub price_id: Option<i32>,
    #[serde(default)]
    pub language: Language,
}
