use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_EXERCISE_TOO_LONG, EXERCISE_MAX_LEN};

/// Workout model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
    pub id: i64,
    pub exercise: String,
    pub workout_date: NaiveDate,
    /// Duration in minutes
    pub duration: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw fields from the add-workout form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkoutForm {
    pub exercise: String,
    pub duration: String,
    pub date: String,
    pub notes: String,
}

/// Validated workout ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub exercise: String,
    pub workout_date: NaiveDate,
    pub duration: i32,
    pub notes: Option<String>,
}

impl NewWorkout {
    /// Validate form input. An empty date falls back to `today`.
    pub fn from_form(form: &WorkoutForm, today: NaiveDate) -> Result<Self, &'static str> {
        let exercise = form.exercise.trim();
        if exercise.is_empty() {
            return Err("Exercise is required");
        }
        if exercise.chars().count() > EXERCISE_MAX_LEN {
            return Err(ERR_EXERCISE_TOO_LONG);
        }

        let duration = match form.duration.trim().parse::<i32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => return Err("Duration must be a positive number of minutes"),
        };

        let date = form.date.trim();
        let workout_date = if date.is_empty() {
            today
        } else {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| "Enter a valid date")?
        };

        let notes = Some(form.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            exercise: exercise.to_string(),
            workout_date,
            duration,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn form(exercise: &str, duration: &str, date: &str, notes: &str) -> WorkoutForm {
        WorkoutForm {
            exercise: exercise.to_string(),
            duration: duration.to_string(),
            date: date.to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_from_form_valid() {
        let workout = NewWorkout::from_form(&form(" Running ", "30", "2024-04-20", "easy"), today())
            .unwrap();
        assert_eq!(workout.exercise, "Running");
        assert_eq!(workout.duration, 30);
        assert_eq!(workout.workout_date, NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
        assert_eq!(workout.notes.as_deref(), Some("easy"));
    }

    #[test]
    fn test_from_form_defaults_date_and_notes() {
        let workout = NewWorkout::from_form(&form("Rowing", "15", "", "   "), today()).unwrap();
        assert_eq!(workout.workout_date, today());
        assert!(workout.notes.is_none());
    }

    #[test]
    fn test_from_form_rejects_bad_input() {
        assert!(NewWorkout::from_form(&form("", "30", "", ""), today()).is_err());
        assert!(NewWorkout::from_form(&form("Swim", "abc", "", ""), today()).is_err());
        assert!(NewWorkout::from_form(&form("Swim", "0", "", ""), today()).is_err());
        assert!(NewWorkout::from_form(&form("Swim", "20", "20/04/2024", ""), today()).is_err());
    }

    #[test]
    fn test_from_form_exercise_length() {
        let long = "x".repeat(EXERCISE_MAX_LEN + 1);
        assert_eq!(
            NewWorkout::from_form(&form(&long, "30", "", ""), today()),
            Err(ERR_EXERCISE_TOO_LONG)
        );

        let fits = "é".repeat(EXERCISE_MAX_LEN);
        assert!(NewWorkout::from_form(&form(&fits, "30", "", ""), today()).is_ok());
    }
}
