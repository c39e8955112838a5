//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod enums;
pub mod genre;
pub mod price;
pub mod session;
pub mod summary;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, CreateAuthor};
pub use book::{Book, BookDetail, CreateBook};
pub use book_instance::{BookInstance, CreateBookInstance, LoanState};
pub use enums::{Language, LoanStatus};
pub use genre::{Genre, GenreName};
pub use price::Price;
pub use session::{SessionState, VisitTally};
pub use summary::{CatalogSummary, SummaryFilter};
pub use user::ActingUser;
