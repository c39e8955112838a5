//! Renewal workflow: extending the due date of an active loan

use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult, RenewalBound},
    models::{ActingUser, BookInstance, LoanStatus},
    repository::Repository,
};

/// Initial values for a renewal form. Nothing is written until `renew`.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalProposal {
    pub instance: BookInstance,
    pub proposed_due_back: NaiveDate,
    pub latest_due_back: NaiveDate,
}

#[derive(Clone)]
pub struct RenewalService {
    repository: Repository,
    max_renewal: Days,
    proposed_renewal: Days,
}

impl RenewalService {
    /// Negative day counts count as zero; `AppConfig::load` rejects them
    pub fn new(repository: Repository, config: &LoansConfig) -> Self {
        Self {
            repository,
            max_renewal: days(config.max_renewal_days),
            proposed_renewal: days(config.proposed_renewal_days),
        }
    }

    /// Renew against today's date
    pub async fn renew(
        &self,
        instance_id: Uuid,
        requested: NaiveDate,
        acting_user: Option<&ActingUser>,
    ) -> AppResult<BookInstance> {
        self.renew_on(Utc::now().date_naive(), instance_id, requested, acting_user)
            .await
    }

    /// Set a new due date for a copy on loan.
    ///
    /// The date must fall after `today` and no later than the renewal horizon.
    pub async fn renew_on(
        &self,
        today: NaiveDate,
        instance_id: Uuid,
        requested: NaiveDate,
        acting_user: Option<&ActingUser>,
    ) -> AppResult<BookInstance> {
        let user = require_capability(acting_user)?;
        self.loaned_instance(instance_id).await?;
        self.check_window(today, requested)?;

        let renewed = self
            .repository
            .renew_instance(instance_id, requested)
            .await?
            .ok_or_else(|| not_on_loan(instance_id))?;

        tracing::info!(
            "Book instance {} renewed until {} by user {}",
            instance_id,
            requested,
            user.id
        );
        Ok(renewed)
    }

    pub async fn proposal(
        &self,
        instance_id: Uuid,
        acting_user: Option<&ActingUser>,
    ) -> AppResult<RenewalProposal> {
        self.proposal_on(Utc::now().date_naive(), instance_id, acting_user)
            .await
    }

    /// Default due date offered to the librarian for confirmation
    pub async fn proposal_on(
        &self,
        today: NaiveDate,
        instance_id: Uuid,
        acting_user: Option<&ActingUser>,
    ) -> AppResult<RenewalProposal> {
        require_capability(acting_user)?;
        let instance = self.loaned_instance(instance_id).await?;

        Ok(RenewalProposal {
            instance,
            proposed_due_back: offset(today, self.proposed_renewal),
            latest_due_back: offset(today, self.max_renewal),
        })
    }

    async fn loaned_instance(&self, instance_id: Uuid) -> AppResult<BookInstance> {
        let instance = self.repository.get_instance(instance_id).await?;
        if instance.status != LoanStatus::OnLoan {
            return Err(not_on_loan(instance_id));
        }
        Ok(instance)
    }

    fn check_window(&self, today: NaiveDate, requested: NaiveDate) -> AppResult<()> {
        let latest = offset(today, self.max_renewal);
        let bound = if requested <= today {
            RenewalBound::Past
        } else if requested > latest {
            RenewalBound::BeyondHorizon { latest }
        } else {
            return Ok(());
        };
        Err(AppError::InvalidRenewalDate { bound, requested })
    }
}

fn days(count: i64) -> Days {
    Days::new(count.max(0) as u64)
}

/// `today + by`, stopping at the last representable date
fn offset(today: NaiveDate, by: Days) -> NaiveDate {
    today.checked_add_days(by).unwrap_or(NaiveDate::MAX)
}

fn require_capability(acting_user: Option<&ActingUser>) -> AppResult<&ActingUser> {
    match acting_user {
        Some(user) if user.can_mark_returned => Ok(user),
        Some(user) => Err(AppError::Unauthorized(format!(
            "User {} may not renew loans",
            user.id
        ))),
        None => Err(AppError::Unauthorized(
            "Renewal requires an acting user".to_string(),
        )),
    }
}

fn not_on_loan(instance_id: Uuid) -> AppError {
    AppError::InvalidState(format!("Book instance {} is not on loan", instance_id))
}
