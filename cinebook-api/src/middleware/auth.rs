use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the session cookie. An absent cookie means no session.
pub const SESSION_COOKIE: &str = "session_token";

/// The authenticated user of the current request, injected by
/// `session_auth_middleware`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

/// Resolve the session cookie to a user id, or reject with 401.
///
/// Expired tokens resolve to nothing (and are deleted by the session
/// manager as a side effect), so they fail here exactly like absent ones.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(AppError::auth_required)?;

    let user_id = state
        .sessions
        .resolve(&token)
        .await?
        .ok_or_else(AppError::auth_required)?;

    req.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(req).await)
}
