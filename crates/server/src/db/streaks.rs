use chrono::NaiveDate;
use deadpool_postgres::Pool;
use nutri_core::models::exercise::ExerciseStreak;

use crate::error::AppError;

/// Repository for per-user workout completion dates
#[derive(Clone)]
pub struct StreakRepository {
    pool: Pool,
}

impl StreakRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// The user's completed dates, empty when nothing was ever marked
    pub async fn get(&self, username: &str) -> Result<ExerciseStreak, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT dates FROM exercise_streaks WHERE username = $1",
                &[&username],
            )
            .await?;

        let mut dates: Vec<String> = row.map(|r| r.get(0)).unwrap_or_default();
        dates.sort();
        Ok(ExerciseStreak {
            username: username.to_string(),
            dates,
        })
    }

    /// Add a date to the user's set. Returns `true` if it was not there yet.
    pub async fn mark(&self, username: &str, date: NaiveDate) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let date = date.to_string();
        let changed = client
            .execute(
                "INSERT INTO exercise_streaks (username, dates) VALUES ($1, ARRAY[$2::TEXT]) \
                 ON CONFLICT (username) DO UPDATE \
                 SET dates = array_append(exercise_streaks.dates, $2::TEXT) \
                 WHERE NOT ($2::TEXT = ANY(exercise_streaks.dates))",
                &[&username, &date],
            )
            .await?;
        Ok(changed == 1)
    }
}
