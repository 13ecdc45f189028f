use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::Result;
use crate::session::current_user;

/// Access guard for protected pages
///
/// Anonymous, unknown or expired sessions are redirected to `/login`;
/// everything else passes through with the [`SessionUser`](crate::models::SessionUser)
/// as a request extension.
pub async fn require_login(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(user) = current_user(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
