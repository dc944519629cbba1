//! Demo login: an email picks (or creates) the user that the session cookie
//! points at. There are no passwords.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{AppState, USER_COOKIE};
use crate::error::{AppError, Result};
use crate::store::upsert_user;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Value>,
    pub name: Option<Value>,
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let email = non_blank(body.email.as_ref())
        .ok_or_else(|| AppError::bad_request("Email is required"))?
        .to_lowercase();
    let name = non_blank(body.name.as_ref());

    let user = upsert_user(state.store.as_ref(), &email, name).await?;
    info!(user_id = %user.id, "user logged in");

    let cookie = Cookie::build((USER_COOKIE, user.id.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");

    Ok((
        jar.add(cookie),
        Json(json!({ "id": user.id, "email": user.email, "name": user.name })),
    ))
}

/// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    // Always send the expired cookie, even when the request carried none
    let mut expired = Cookie::build((USER_COOKIE, "")).path("/").build();
    expired.make_removal();
    (jar.add(expired), Json(json!({ "ok": true })))
}
