use axum::{extract::State, response::Html};
use tower_sessions::Session;

use crate::constants::RECENT_WORKOUTS_LIMIT;
use crate::error::Result;
use crate::session::current_user;
use crate::views;
use crate::AppState;

/// Dashboard with the most recent workouts
///
/// A store failure is logged and the page renders with an empty list.
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    let user = current_user(&session).await?;

    let recent = state
        .workouts
        .recent(RECENT_WORKOUTS_LIMIT)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching recent workouts: {}", e);
            Vec::new()
        });

    Ok(views::home(user.as_ref(), &recent))
}

pub async fn about(session: Session) -> Result<Html<String>> {
    let user = current_user(&session).await?;
    Ok(views::about(user.as_ref()))
}
