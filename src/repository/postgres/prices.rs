//! Prices repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::price::Price,
};

#[derive(Clone)]
pub struct PricesRepository {
    pool: Pool<Postgres>,
}

impl PricesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Price> {
        sqlx::query_as::<_, Price>("SELECT id, value FROM prices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Price with id {} not found", id)))
    }

    pub async fn create(&self, value: i32) -> AppResult<Price> {
        let price =
            sqlx::query_as::<_, Price>("INSERT INTO prices (value) VALUES ($1) RETURNING id, value")
                .bind(value)
                .fetch_one(&self.pool)
                .await?;
        Ok(price)
    }

    /// Delete a price; books priced with it keep existing without a price
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM prices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Price with id {} not found", id)));
        }
        Ok(())
    }
}
