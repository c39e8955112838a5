//! Renewal workflow tests

use locallibrary::{
    error::{AppError, RenewalBound},
    models::{ActingUser, LoanStatus},
};
use uuid::Uuid;

use crate::common::{copy_of, date, loaned_copy, services, BORROWER};

const LIBRARIAN: ActingUser = ActingUser {
    id: 1,
    can_mark_returned: true,
};

#[tokio::test]
async fn test_renew_within_horizon() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    let renewed = services
        .renewals
        .renew_on(date(2024, 1, 1), copy.id, date(2024, 1, 24), Some(&LIBRARIAN))
        .await
        .unwrap();

    assert_eq!(renewed.due_back, Some(date(2024, 1, 24)));
    assert_eq!(renewed.status, LoanStatus::OnLoan);
    assert_eq!(renewed.borrower_id, Some(BORROWER));
    assert_eq!(services.catalog.get_instance(copy.id).await.unwrap(), renewed);
}

#[tokio::test]
async fn test_renew_window_edges() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;
    let today = date(2024, 1, 1);

    // Last day of the four-week horizon is accepted
    let renewed = services
        .renewals
        .renew_on(today, copy.id, date(2024, 1, 29), Some(&LIBRARIAN))
        .await
        .unwrap();
    assert_eq!(renewed.due_back, Some(date(2024, 1, 29)));

    let err = services
        .renewals
        .renew_on(today, copy.id, date(2024, 1, 30), Some(&LIBRARIAN))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidRenewalDate {
            bound: RenewalBound::BeyondHorizon { .. },
            ..
        }
    ));

    let err = services
        .renewals
        .renew_on(today, copy.id, today, Some(&LIBRARIAN))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidRenewalDate {
            bound: RenewalBound::Past,
            ..
        }
    ));
}

#[tokio::test]
async fn test_renew_beyond_horizon_keeps_due_date() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    let err = services
        .renewals
        .renew_on(date(2024, 1, 1), copy.id, date(2024, 3, 1), Some(&LIBRARIAN))
        .await
        .unwrap_err();
    match err {
        AppError::InvalidRenewalDate { bound, requested } => {
            assert_eq!(
                bound,
                RenewalBound::BeyondHorizon {
                    latest: date(2024, 1, 29)
                }
            );
            assert_eq!(requested, date(2024, 3, 1));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let unchanged = services.catalog.get_instance(copy.id).await.unwrap();
    assert_eq!(unchanged.due_back, Some(date(2024, 1, 10)));
}

#[tokio::test]
async fn test_renew_copy_not_on_loan_is_invalid_state() {
    let services = services();
    let copy = copy_of(&services, None).await;
    services
        .loans
        .set_status(copy.id, LoanStatus::Available, None, None)
        .await
        .unwrap();

    let err = services
        .renewals
        .renew_on(date(2024, 1, 1), copy.id, date(2024, 1, 24), Some(&LIBRARIAN))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_renew_requires_capable_acting_user() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    let err = services
        .renewals
        .renew_on(date(2024, 1, 1), copy.id, date(2024, 1, 24), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let patron = ActingUser::patron(BORROWER);
    let err = services
        .renewals
        .renew_on(date(2024, 1, 1), copy.id, date(2024, 1, 24), Some(&patron))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_renew_unknown_instance_is_not_found() {
    let services = services();
    let err = services
        .renewals
        .renew_on(date(2024, 1, 1), Uuid::new_v4(), date(2024, 1, 24), Some(&LIBRARIAN))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_proposal_is_three_weeks_out_and_not_applied() {
    let services = services();
    let copy = loaned_copy(&services, BORROWER, date(2024, 1, 10)).await;

    let proposal = services
        .renewals
        .proposal_on(date(2024, 1, 1), copy.id, Some(&LIBRARIAN))
        .await
        .unwrap();
    assert_eq!(proposal.proposed_due_back, date(2024, 1, 22));
    assert_eq!(proposal.latest_due_back, date(2024, 1, 29));
    assert_eq!(proposal.instance.id, copy.id);

    let unchanged = services.catalog.get_instance(copy.id).await.unwrap();
    assert_eq!(unchanged.due_back, Some(date(2024, 1, 10)));
}

#[tokio::test]
async fn test_renew_against_today() {
    let services = services();
    let today = chrono::Utc::now().date_naive();
    let copy = loaned_copy(&services, BORROWER, today).await;

    let proposal = services
        .renewals
        .proposal(copy.id, Some(&LIBRARIAN))
        .await
        .unwrap();
    let renewed = services
        .renewals
        .renew(copy.id, proposal.proposed_due_back, Some(&LIBRARIAN))
        .await
        .unwrap();
    assert_eq!(renewed.due_back, Some(proposal.proposed_due_back));
}
