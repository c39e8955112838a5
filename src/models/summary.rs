//! Index page aggregates

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Case-insensitive filters for the name/title counts on the index page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryFilter {
    pub genre_name: String,
    pub book_title: String,
}

/// Counts read from one consistent snapshot of the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct CatalogSummary {
    pub books: i64,
    pub instances: i64,
    pub available_instances: i64,
    pub authors: i64,
    pub genres_matching: i64,
    pub books_matching: i64,
}
