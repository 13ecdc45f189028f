use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::auth::{AuthOutcome, FormEcho, LoginForm};
use crate::error::Result;
use crate::validation::SignupForm;
use crate::views;
use crate::AppState;

type FormView = fn(Option<&str>, &FormEcho) -> Html<String>;

/// Redirect home, or re-render the form with the error
fn respond(outcome: AuthOutcome, view: FormView) -> Response {
    match outcome {
        AuthOutcome::Authenticated(_) => Redirect::to("/").into_response(),
        AuthOutcome::Rejected { error, form } => view(Some(error), &form).into_response(),
    }
}

/// GET /login
pub async fn login_page() -> Html<String> {
    views::login(None, &FormEcho::default())
}

/// POST /login (also serves the legacy POST /loggedin)
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let outcome = state.auth.login(&session, form).await?;
    Ok(respond(outcome, views::login))
}

/// GET /signup
pub async fn signup_page() -> Html<String> {
    views::signup(None, &FormEcho::default())
}

/// POST /signup (also serves the legacy POST /registered)
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let outcome = state.auth.signup(&session, form).await?;
    Ok(respond(outcome, views::signup))
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    state.auth.logout(&session).await?;
    Ok(Redirect::to("/login"))
}
