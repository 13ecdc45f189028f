//! In-memory stores for tests and database-less development runs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{UserStore, WorkoutStore};
use crate::error::{AppError, Result};
use crate::models::{NewUser, NewWorkout, User, Workout};

/// `UserStore` holding users in a vector; ids start at 1
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == user.username) {
            tracing::info!("Signup rejected, username already exists: {}", user.username);
            return Err(AppError::UserAlreadyExists);
        }

        let row = User {
            id: users.len() as i64 + 1,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.push(row.clone());

        Ok(row)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// `WorkoutStore` holding workouts in a vector
#[derive(Default)]
pub struct MemoryWorkoutStore {
    workouts: RwLock<Vec<Workout>>,
}

impl MemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; id breaks ties between rows created in the same instant
fn sort_newest_first(workouts: &mut [Workout]) {
    workouts.sort_by(|a, b| {
        b.workout_date
            .cmp(&a.workout_date)
            .then(b.created_at.cmp(&a.created_at))
            .then(b.id.cmp(&a.id))
    });
}

#[async_trait]
impl WorkoutStore for MemoryWorkoutStore {
    async fn recent(&self, limit: i64) -> Result<Vec<Workout>> {
        let mut workouts = self.list().await?;
        workouts.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(workouts)
    }

    async fn list(&self) -> Result<Vec<Workout>> {
        let mut workouts = self.workouts.read().await.clone();
        sort_newest_first(&mut workouts);
        Ok(workouts)
    }

    async fn insert(&self, workout: NewWorkout) -> Result<Workout> {
        let mut workouts = self.workouts.write().await;

        let row = Workout {
            id: workouts.len() as i64 + 1,
            exercise: workout.exercise,
            workout_date: workout.workout_date,
            duration: workout.duration,
            notes: workout.notes,
            created_at: Utc::now(),
        };
        workouts.push(row.clone());

        Ok(row)
    }

    async fn search(&self, text: &str) -> Result<Vec<Workout>> {
        let needle = text.to_lowercase();
        let matches = |field: &str| field.to_lowercase().contains(&needle);

        let mut found: Vec<Workout> = self
            .workouts
            .read()
            .await
            .iter()
            .filter(|w| matches(&w.exercise) || w.notes.as_deref().is_some_and(|n| matches(n)))
            .cloned()
            .collect();
        sort_newest_first(&mut found);

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_workout(exercise: &str, day: u32, notes: Option<&str>) -> NewWorkout {
        NewWorkout {
            exercise: exercise.to_string(),
            workout_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            duration: 30,
            notes: notes.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_user_insert_assigns_ids() {
        let store = MemoryUserStore::new();
        let first = store.insert(new_user("alice1")).await.unwrap();
        let second = store.insert(new_user("bobby2")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(
            store.find_by_username("bobby2").await.unwrap().unwrap().id,
            2
        );
    }

    #[tokio::test]
    async fn test_user_insert_rejects_duplicate_username() {
        let store = MemoryUserStore::new();
        store.insert(new_user("alice1")).await.unwrap();

        let result = store.insert(new_user("alice1")).await;
        assert!(matches!(result, Err(AppError::UserAlreadyExists)));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_username_is_exact() {
        let store = MemoryUserStore::new();
        store.insert(new_user("alice1")).await.unwrap();

        assert!(store.find_by_username("Alice1").await.unwrap().is_none());
        assert!(store.find_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_workouts_ordered_newest_first() {
        let store = MemoryWorkoutStore::new();
        store.insert(new_workout("Running", 1, None)).await.unwrap();
        store.insert(new_workout("Cycling", 3, None)).await.unwrap();
        store.insert(new_workout("Rowing", 3, None)).await.unwrap();

        let exercises: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.exercise)
            .collect();
        assert_eq!(exercises, ["Rowing", "Cycling", "Running"]);

        assert_eq!(store.recent(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_exercise_or_notes() {
        let store = MemoryWorkoutStore::new();
        store.insert(new_workout("Running", 1, Some("park loop"))).await.unwrap();
        store.insert(new_workout("Cycling", 2, Some("hill RUN after"))).await.unwrap();
        store.insert(new_workout("Yoga", 3, None)).await.unwrap();

        let found = store.search("run").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].exercise, "Cycling");

        assert!(store.search("swim").await.unwrap().is_empty());
    }
}
