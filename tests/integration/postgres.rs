//! Round trip against a real database

use std::sync::Arc;

use locallibrary::{
    config::{AppConfig, DatabaseConfig},
    models::{ActingUser, GenreName, LoanStatus},
    repository::PgCatalogStore,
    AppState,
};

use crate::common::{author, book, date};

#[tokio::test]
#[ignore] // Run with: DATABASE_URL=postgres://... cargo test -- --ignored
async fn test_postgres_lending_round_trip() {
    let config = AppConfig::load().expect("Failed to load configuration");
    let database = DatabaseConfig {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        ..config.database.clone()
    };
    let store = PgCatalogStore::connect(&database)
        .await
        .expect("Failed to connect to database");
    let state = AppState::new(config, Arc::new(store));
    let services = &state.services;

    let dahl = services.catalog.create_author(&author("Roald", "Dahl")).await.unwrap();
    let genre = services
        .catalog
        .create_genre(&GenreName { name: "Novel".to_string() })
        .await
        .unwrap();
    let mut request = book("Matilda", Some(dahl.id));
    request.genre_ids = vec![genre.id];
    let matilda = services.catalog.create_book(&request).await.unwrap();
    assert_eq!(matilda.genres, vec![genre.clone()]);

    let copy = services
        .catalog
        .create_instance(&locallibrary::models::CreateBookInstance {
            book_id: Some(matilda.id),
            imprint: "Puffin Books, 2007".to_string(),
        })
        .await
        .unwrap();
    services
        .loans
        .set_status(copy.id, LoanStatus::Available, None, None)
        .await
        .unwrap();
    services
        .loans
        .set_status(copy.id, LoanStatus::OnLoan, Some(42), Some(date(2024, 1, 10)))
        .await
        .unwrap();

    let renewed = services
        .renewals
        .renew_on(date(2024, 1, 1), copy.id, date(2024, 1, 24), Some(&ActingUser::librarian(1)))
        .await
        .unwrap();
    assert_eq!(renewed.due_back, Some(date(2024, 1, 24)));

    services.catalog.delete_author(dahl.id).await.unwrap();
    services.catalog.delete_book(matilda.id).await.unwrap();
    let orphan = services.catalog.get_instance(copy.id).await.unwrap();
    assert_eq!(orphan.book_id, None);
    assert_eq!(orphan.status, LoanStatus::OnLoan);

    services.catalog.delete_instance(copy.id).await.unwrap();
    services.catalog.delete_genre(genre.id).await.unwrap();
}
