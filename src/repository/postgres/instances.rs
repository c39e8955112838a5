//! Book instances repository: copies, their loan state and due dates

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, BookInstanceRow, CreateBookInstance, LoanState},
        enums::LoanStatus,
    },
};

const INSTANCE_COLUMNS: &str = "id, book_id, imprint, due_back, status, borrower_id";
const INSTANCE_ORDER: &str = "ORDER BY due_back ASC NULLS LAST, id";

fn into_instances(rows: Vec<BookInstanceRow>) -> AppResult<Vec<BookInstance>> {
    rows.into_iter().map(BookInstance::try_from).collect()
}

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            INSTANCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?
        .try_into()
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances {}",
            INSTANCE_COLUMNS, INSTANCE_ORDER
        ))
        .fetch_all(&self.pool)
        .await?;
        into_instances(rows)
    }

    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 {}",
            INSTANCE_COLUMNS, INSTANCE_ORDER
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        into_instances(rows)
    }

    /// Copies on loan, optionally restricted to one borrower
    pub async fn list_loans(&self, borrower_id: Option<i32>) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            SELECT {} FROM book_instances
            WHERE status = $1 AND ($2::int IS NULL OR borrower_id = $2)
            {}
            "#,
            INSTANCE_COLUMNS, INSTANCE_ORDER
        ))
        .bind(LoanStatus::OnLoan.code())
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;
        into_instances(rows)
    }

    pub async fn list_overdue(&self, as_of: NaiveDate) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(&format!(
            "SELECT {} FROM book_instances WHERE status = $1 AND due_back < $2 {}",
            INSTANCE_COLUMNS, INSTANCE_ORDER
        ))
        .bind(LoanStatus::OnLoan.code())
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;
        into_instances(rows)
    }

    pub async fn count(&self, status: Option<LoanStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(LoanStatus::code))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Register a new copy; it starts in maintenance with no loan fields
    pub async fn create(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(LoanStatus::default().code())
        .fetch_one(&self.pool)
        .await?
        .try_into()
    }

    /// Compare-and-set on status; all loan fields change in one statement
    pub async fn transition(
        &self,
        id: Uuid,
        expected: LoanStatus,
        next: LoanState,
    ) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            UPDATE book_instances
            SET status = $1, borrower_id = $2, due_back = $3
            WHERE id = $4 AND status = $5
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(next.status.code())
        .bind(next.borrower_id)
        .bind(next.due_back)
        .bind(id)
        .bind(expected.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookInstance::try_from).transpose()
    }

    pub async fn renew(&self, id: Uuid, due_back: NaiveDate) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstanceRow>(&format!(
            r#"
            UPDATE book_instances
            SET due_back = $1
            WHERE id = $2 AND status = $3
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(due_back)
        .bind(id)
        .bind(LoanStatus::OnLoan.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookInstance::try_from).transpose()
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }
}
