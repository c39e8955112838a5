//! Loan lifecycle tests

use locallibrary::{error::AppError, models::LoanStatus};
use uuid::Uuid;

use crate::common::{copy_of, date, loaned_copy, services, BORROWER};

#[tokio::test]
async fn test_new_copy_starts_in_maintenance_without_loan() {
    let services = services();
    let copy = copy_of(&services, None).await;

    assert_eq!(copy.status, LoanStatus::Maintenance);
    assert_eq!(copy.borrower_id, None);
    assert_eq!(copy.due_back, None);
}

#[tokio::test]
async fn test_maintenance_to_available_to_on_loan() {
    let services = services();
    let copy = copy_of(&services, None).await;

    let available = services
        .loans
        .set_status(copy.id, LoanStatus::Available, None, None)
        .await
        .unwrap();
    assert_eq!(available.status, LoanStatus::Available);

    let lent = services
        .loans
        .set_status(copy.id, LoanStatus::OnLoan, Some(BORROWER), Some(date(2024, 1, 10)))
        .await
        .unwrap();
    assert_eq!(lent.status, LoanStatus::OnLoan);
    assert_eq!(lent.borrower_id, Some(BORROWER));
    assert_eq!(lent.due_back, Some(date(2024, 1, 10)));
}

#[tokio::test]
async fn test_on_loan_without_borrower_is_invalid_transition() {
    let services = services();
    let copy = copy_of(&services, None).await;
    services
        .loans
        .set_status(copy.id, LoanStatus::Available, None, None)
        .await
        .unwrap();

    let err = services
        .loans
        .set_status(copy.id, LoanStatus::OnLoan, None, Some(date(2024, 1, 10)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    let err = services
        .loans
        .set_status(copy.id, LoanStatus::OnLoan, Some(BORROWER), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    let unchanged = services.catalog.get_instance(copy.id).await.unwrap();
    assert_eq!(unchanged.status, LoanStatus::Available);
}

#[tokio::test]
async fn test_cannot_lend_from_maintenance_or_reserved() {
    let services = services();
    let copy = copy_of(&services, None).await;

    let err = services
        .loans
        .set_status(copy.id, LoanStatus::OnLoan, Some(BORROWER), Some(date(2024, 1, 10)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    services
        .loans
        .set_status(copy.id, LoanStatus::Available, None, None)
        .await
        .unwrap();
    services
        .loans
        .set_status(copy.id, LoanStatus::Reserved, None, None)
        .await
        .unwrap();

    let err = services
        .loans
        .set_status(copy.id, LoanStatus::OnLoan, Some(BORROWER), Some(date(2024, 1, 10)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_leaving_loan_clears_borrower_and_due_date() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    let returned = services
        .loans
        .set_status(copy.id, LoanStatus::Available, Some(BORROWER), Some(date(2024, 2, 1)))
        .await
        .unwrap();
    assert_eq!(returned.status, LoanStatus::Available);
    assert_eq!(returned.borrower_id, None);
    assert_eq!(returned.due_back, None);
}

#[tokio::test]
async fn test_maintenance_override_from_loan() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    let repaired = services
        .loans
        .set_status(copy.id, LoanStatus::Maintenance, None, None)
        .await
        .unwrap();
    assert_eq!(repaired.status, LoanStatus::Maintenance);
    assert_eq!(repaired.borrower_id, None);
    assert_eq!(repaired.due_back, None);
}

#[tokio::test]
async fn test_on_loan_iff_borrower_and_due_date_present() {
    let services = services();
    loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;
    let reserved = copy_of(&services, None).await;
    services
        .loans
        .set_status(reserved.id, LoanStatus::Available, None, None)
        .await
        .unwrap();
    services
        .loans
        .set_status(reserved.id, LoanStatus::Reserved, None, None)
        .await
        .unwrap();
    copy_of(&services, None).await;

    for instance in services.catalog.list_instances().await.unwrap() {
        let on_loan = instance.status == LoanStatus::OnLoan;
        assert_eq!(
            on_loan,
            instance.borrower_id.is_some() && instance.due_back.is_some(),
            "{:?}",
            instance
        );
    }
}

#[tokio::test]
async fn test_unknown_instance_is_not_found() {
    let services = services();
    let err = services
        .loans
        .set_status(Uuid::new_v4(), LoanStatus::Available, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services
        .loans
        .is_overdue(Uuid::new_v4(), date(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_is_overdue() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    assert!(!services.loans.is_overdue(copy.id, date(2024, 1, 9)).await.unwrap());
    assert!(!services.loans.is_overdue(copy.id, date(2024, 1, 10)).await.unwrap());
    assert!(services.loans.is_overdue(copy.id, date(2024, 1, 11)).await.unwrap());

    services
        .loans
        .set_status(copy.id, LoanStatus::Available, None, None)
        .await
        .unwrap();
    assert!(!services.loans.is_overdue(copy.id, date(2030, 1, 1)).await.unwrap());
}
