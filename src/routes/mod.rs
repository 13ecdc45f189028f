pub mod auth;
pub mod guard;
pub mod health;
pub mod pages;
pub mod weather;
pub mod workouts;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

use crate::constants::SESSION_COOKIE_NAME;
use crate::AppState;

pub use guard::require_login;
pub use health::health_check;

/// Build the full application router on top of the given session store
///
/// The legacy `/loggedin` and `/registered` paths share the login and
/// signup handlers.
pub fn router<S>(state: AppState, sessions: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(sessions)
        .with_name(SESSION_COOKIE_NAME)
        .with_path("/")
        .with_http_only(true)
        .with_secure(state.config.is_production())
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            state.config.session_ttl_secs,
        )));

    let protected = Router::new()
        .route("/workouts", get(workouts::list_workouts))
        .route(
            "/add-workout",
            get(workouts::add_workout_page).post(workouts::add_workout),
        )
        .route("/search", get(workouts::search_page))
        .route("/search-results", get(workouts::search_results))
        .route(
            "/weather",
            get(weather::weather_page).post(weather::lookup_weather),
        )
        .route_layer(middleware::from_fn(require_login));

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/health", get(health_check))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/loggedin", post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/registered", post(auth::signup))
        .route("/logout", get(auth::logout))
        .merge(protected)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
