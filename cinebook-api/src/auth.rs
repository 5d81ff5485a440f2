use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cinebook_auth::{validation, RegisterRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::SESSION_COOKIE;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    success: bool,
    user_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", get(logout))
}

async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AppError> {
    let user = state.auth.register(request).await?;

    // Registration logs the fresh account straight in.
    let token = state.sessions.issue(user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(AuthResponse {
            success: true,
            user_id: user.user_id,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }
    if !validation::validate_username(&request.username) {
        return Err(AppError::Validation(
            "Invalid username format".to_string(),
        ));
    }

    let user = state
        .auth
        .login(&request.username, &request.password)
        .await?;
    let token = state.sessions.issue(user.user_id).await?;

    Ok((
        jar.add(session_cookie(token)),
        Json(AuthResponse {
            success: true,
            user_id: user.user_id,
        }),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await?;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Redirect::to("/")))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(cinebook_auth::session::SESSION_TTL_HOURS))
        .build()
}
