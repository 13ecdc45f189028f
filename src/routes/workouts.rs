use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::constants::{ERR_LOAD_WORKOUTS, ERR_SAVE_WORKOUT, ERR_SEARCH_WORKOUTS};
use crate::error::Result;
use crate::models::{NewWorkout, SessionUser, WorkoutForm};
use crate::session::{take_flash, WORKOUT_ERROR_KEY};
use crate::views;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search_text: Option<String>,
}

/// GET /workouts
pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Html<String> {
    match state.workouts.list().await {
        Ok(workouts) => views::workouts(&user, &workouts, None),
        Err(e) => {
            tracing::error!("Error fetching workouts: {}", e);
            views::workouts(&user, &[], Some(ERR_LOAD_WORKOUTS))
        }
    }
}

/// GET /add-workout, showing (and clearing) any error from the last attempt
pub async fn add_workout_page(
    Extension(user): Extension<SessionUser>,
    session: Session,
) -> Result<Html<String>> {
    let error: Option<String> = take_flash(&session, WORKOUT_ERROR_KEY).await?;
    Ok(views::add_workout(&user, error.as_deref()))
}

/// POST /add-workout
pub async fn add_workout(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    session: Session,
    Form(form): Form<WorkoutForm>,
) -> Result<Redirect> {
    let today = Utc::now().date_naive();

    let error = match NewWorkout::from_form(&form, today) {
        Ok(workout) => match state.workouts.insert(workout).await {
            Ok(saved) => {
                tracing::info!(
                    "Workout {} logged by {}: {} ({} min)",
                    saved.id,
                    user.username,
                    saved.exercise,
                    saved.duration
                );
                return Ok(Redirect::to("/workouts"));
            }
            Err(e) => {
                tracing::error!("Error inserting workout: {}", e);
                ERR_SAVE_WORKOUT
            }
        },
        Err(message) => message,
    };

    session.insert(WORKOUT_ERROR_KEY, error).await?;

    Ok(Redirect::to("/add-workout"))
}

/// GET /search
pub async fn search_page(
    Extension(user): Extension<SessionUser>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    views::search(&user, params.search_text.as_deref())
}

/// GET /search-results?search_text=...
pub async fn search_results(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(params): Query<SearchParams>,
) -> Response {
    let search_text = params.search_text.as_deref().unwrap_or("").trim();
    if search_text.is_empty() {
        return Redirect::to("/search").into_response();
    }

    let page = match state.workouts.search(search_text).await {
        Ok(workouts) => views::search_results(&user, search_text, &workouts, None),
        Err(e) => {
            tracing::error!("Error searching workouts: {}", e);
            views::search_results(&user, search_text, &[], Some(ERR_SEARCH_WORKOUTS))
        }
    };

    page.into_response()
}
