use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewWorkout, Workout};

/// Workout log storage
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Newest workouts first (by date, then creation time), at most `limit`
    async fn recent(&self, limit: i64) -> Result<Vec<Workout>>;

    /// All workouts, newest first
    async fn list(&self) -> Result<Vec<Workout>>;

    async fn insert(&self, workout: NewWorkout) -> Result<Workout>;

    /// Case-insensitive substring match on exercise or notes
    async fn search(&self, text: &str) -> Result<Vec<Workout>>;
}

/// `WorkoutStore` backed by the Postgres `workouts` table
#[derive(Clone)]
pub struct PgWorkoutStore {
    pool: PgPool,
}

impl PgWorkoutStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so user text matches literally
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl WorkoutStore for PgWorkoutStore {
    async fn recent(&self, limit: i64) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, exercise, workout_date, duration, notes, created_at
            FROM workouts
            ORDER BY workout_date DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    async fn list(&self) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, exercise, workout_date, duration, notes, created_at
            FROM workouts
            ORDER BY workout_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    async fn insert(&self, workout: NewWorkout) -> Result<Workout> {
        let row = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (exercise, workout_date, duration, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, exercise, workout_date, duration, notes, created_at
            "#,
        )
        .bind(&workout.exercise)
        .bind(workout.workout_date)
        .bind(workout.duration)
        .bind(&workout.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn search(&self, text: &str) -> Result<Vec<Workout>> {
        let pattern = like_pattern(text);
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, exercise, workout_date, duration, notes, created_at
            FROM workouts
            WHERE exercise ILIKE $1 OR notes ILIKE $1
            ORDER BY workout_date DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("run"), "%run%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
