//! Catalog CRUD and reference semantics

use locallibrary::{
    error::AppError,
    models::{GenreName, LoanStatus},
};

use crate::common::{author, book, copy_of, date, loaned_copy, services, BORROWER};

#[tokio::test]
async fn test_deleting_author_keeps_books() {
    let services = services();
    let dahl = services.catalog.create_author(&author("Roald", "Dahl")).await.unwrap();
    let matilda = services.catalog.create_book(&book("Matilda", Some(dahl.id))).await.unwrap();

    services.catalog.delete_author(dahl.id).await.unwrap();

    let kept = services.catalog.get_book(matilda.id).await.unwrap();
    assert_eq!(kept.author_id, None);
    assert_eq!(kept.title, "Matilda");
    assert!(matches!(
        services.catalog.get_author(dahl.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_deleting_book_keeps_copies_and_loans() {
    let services = services();
    let matilda = services.catalog.create_book(&book("Matilda", None)).await.unwrap();
    let copy = copy_of(&services, Some(matilda.id)).await;

    services.catalog.delete_book(matilda.id).await.unwrap();

    let kept = services.catalog.get_instance(copy.id).await.unwrap();
    assert_eq!(kept.book_id, None);
    assert_eq!(kept.imprint, copy.imprint);
}

#[tokio::test]
async fn test_deleting_price_keeps_book() {
    let services = services();
    let price = services.catalog.create_price(15000).await.unwrap();
    let mut request = book("Matilda", None);
    request.price_id = Some(price.id);
    let matilda = services.catalog.create_book(&request).await.unwrap();
    assert_eq!(matilda.price_id, Some(price.id));

    services.catalog.delete_price(price.id).await.unwrap();

    assert_eq!(services.catalog.get_book(matilda.id).await.unwrap().price_id, None);
}

#[tokio::test]
async fn test_price_value_is_stored_as_given() {
    let services = services();
    for value in [0, -500, i32::MAX] {
        let price = services.catalog.create_price(value).await.unwrap();
        assert_eq!(price.value, value);
    }
}

#[tokio::test]
async fn test_authors_are_listed_by_last_then_first_name() {
    let services = services();
    services.catalog.create_author(&author("Ursula", "Le Guin")).await.unwrap();
    services.catalog.create_author(&author("Roald", "Dahl")).await.unwrap();
    services.catalog.create_author(&author("Anne", "Dahl")).await.unwrap();

    let names: Vec<String> = services
        .catalog
        .list_authors()
        .await
        .unwrap()
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(names, ["Dahl, Anne", "Dahl, Roald", "Le Guin, Ursula"]);
}

#[tokio::test]
async fn test_instances_listed_by_due_date_with_missing_dates_last() {
    let services = services();
    let shelved = copy_of(&services, None).await;
    let later = loaned_copy(&services, BORROWER, date(2024, 2, 1)).await;
    let sooner = loaned_copy(&services, BORROWER, date(2024, 1, 1)).await;

    let ids: Vec<_> = services
        .catalog
        .list_instances()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![sooner.id, later.id, shelved.id]);
}

#[tokio::test]
async fn test_copy_ids_are_unique() {
    let services = services();
    let a = copy_of(&services, None).await;
    let b = copy_of(&services, None).await;
    assert_ne!(a.id, b.id);
    assert_eq!(a.status, LoanStatus::Maintenance);
}

#[tokio::test]
async fn test_book_detail_gathers_author_price_and_copies() {
    let services = services();
    let dahl = services.catalog.create_author(&author("Roald", "Dahl")).await.unwrap();
    let price = services.catalog.create_price(12).await.unwrap();
    let novel = services
        .catalog
        .create_genre(&GenreName { name: "Novel".to_string() })
        .await
        .unwrap();
    let mut request = book("Matilda", Some(dahl.id));
    request.price_id = Some(price.id);
    request.genre_ids = vec![novel.id];
    let matilda = services.catalog.create_book(&request).await.unwrap();
    copy_of(&services, Some(matilda.id)).await;
    copy_of(&services, Some(matilda.id)).await;
    copy_of(&services, None).await;

    let detail = services.catalog.book_detail(matilda.id).await.unwrap();
    assert_eq!(detail.author, Some(dahl.clone()));
    assert_eq!(detail.price, Some(price));
    assert_eq!(detail.book.genres, vec![novel]);
    assert_eq!(detail.instances.len(), 2);

    let author_detail = services.catalog.author_detail(dahl.id).await.unwrap();
    assert_eq!(author_detail.books.len(), 1);
    assert_eq!(author_detail.books[0].id, matilda.id);
}

#[tokio::test]
async fn test_set_book_genres_replaces_set() {
    let services = services();
    let novel = services
        .catalog
        .create_genre(&GenreName { name: "Novel".to_string() })
        .await
        .unwrap();
    let fantasy = services
        .catalog
        .create_genre(&GenreName { name: "Fantasy".to_string() })
        .await
        .unwrap();
    let mut request = book("Matilda", None);
    request.genre_ids = vec![novel.id];
    let matilda = services.catalog.create_book(&request).await.unwrap();

    let updated = services
        .catalog
        .set_book_genres(matilda.id, &[fantasy.id])
        .await
        .unwrap();
    assert_eq!(updated.genres, vec![fantasy]);

    let err = services
        .catalog
        .set_book_genres(matilda.id, &[9999])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let services = services();

    let mut request = book("Matilda", None);
    request.isbn = "12345".to_string();
    assert!(matches!(
        services.catalog.create_book(&request).await,
        Err(AppError::Validation(_))
    ));

    assert!(matches!(
        services.catalog.create_book(&book("Matilda", Some(404))).await,
        Err(AppError::NotFound(_))
    ));

    let mut dead_before_born = author("Roald", "Dahl");
    dead_before_born.date_of_birth = Some(date(1916, 9, 13));
    dead_before_born.date_of_death = Some(date(1900, 1, 1));
    assert!(matches!(
        services.catalog.create_author(&dead_before_born).await,
        Err(AppError::Validation(_))
    ));

    assert!(matches!(
        services
            .catalog
            .create_genre(&GenreName { name: String::new() })
            .await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn test_rename_and_delete_genre() {
    let services = services();
    let genre = services
        .catalog
        .create_genre(&GenreName { name: "Novle".to_string() })
        .await
        .unwrap();

    let renamed = services
        .catalog
        .rename_genre(genre.id, &GenreName { name: "Novel".to_string() })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Novel");

    services.catalog.delete_genre(genre.id).await.unwrap();
    assert!(services.catalog.list_genres().await.unwrap().is_empty());
    assert!(matches!(
        services.catalog.delete_genre(genre.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_instance() {
    let services = services();
    let copy = copy_of(&services, None).await;
    services.catalog.delete_instance(copy.id).await.unwrap();
    assert!(matches!(
        services.catalog.get_instance(copy.id).await,
        Err(AppError::NotFound(_))
    ));
}
