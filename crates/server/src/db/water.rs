use chrono::NaiveDate;
use deadpool_postgres::Pool;
use nutri_core::models::water::{DailyTotal, WaterLog};

use crate::error::AppError;

/// Repository for water intake events. Append-only.
#[derive(Clone)]
pub struct WaterRepository {
    pool: Pool,
}

impl WaterRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Append one intake event. Identical submissions create identical rows.
    pub async fn record(&self, username: &str, amount: i32, date: NaiveDate) -> Result<WaterLog, AppError> {
        let client = self.pool.get().await?;
        let date = date.to_string();
        let row = client
            .query_one(
                "INSERT INTO water_logs (username, date, amount) VALUES ($1, $2, $3) \
                 RETURNING id, username, date, amount, timestamp",
                &[&username, &date, &amount],
            )
            .await?;

        Ok(WaterLog {
            id: row.get(0),
            username: row.get(1),
            date: row.get(2),
            amount: row.get(3),
            timestamp: row.get(4),
        })
    }

    /// Events for one day in the order they were logged
    pub async fn logs_for(&self, username: &str, date: NaiveDate) -> Result<Vec<WaterLog>, AppError> {
        let client = self.pool.get().await?;
        let date = date.to_string();
        let rows = client
            .query(
                "SELECT id, username, date, amount, timestamp FROM water_logs \
                 WHERE username = $1 AND date = $2 ORDER BY timestamp, id",
                &[&username, &date],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| WaterLog {
                id: row.get(0),
                username: row.get(1),
                date: row.get(2),
                amount: row.get(3),
                timestamp: row.get(4),
            })
            .collect())
    }

    /// Per-day sums from `since` onwards, oldest first
    pub async fn daily_totals(&self, username: &str, since: NaiveDate) -> Result<Vec<DailyTotal>, AppError> {
        let client = self.pool.get().await?;
        let since = since.to_string();
        let rows = client
            .query(
                "SELECT date, SUM(amount) AS total FROM water_logs \
                 WHERE username = $1 AND date >= $2 GROUP BY date ORDER BY date",
                &[&username, &since],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| DailyTotal {
                date: row.get(0),
                total: row.get(1),
            })
            .collect())
    }
}
