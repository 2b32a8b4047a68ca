use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State};

use arcade_db::Database;
use arcade_types::api::AuthRequest;
use arcade_types::models::User;

use crate::error::ApiError;
use crate::extract::ApiJson;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// POST /auth - register or log in. The client stores the returned user
/// record; there are no session tokens. Banned accounts still get their
/// record back (`is_banned` set) and the client enforces the ban.
pub async fn auth(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AuthRequest>,
) -> Result<Json<User>, ApiError> {
    match req {
        AuthRequest::Register { email, password } => register(&state, &email, &password).await,
        AuthRequest::Login { email, password } => login(&state, &email, &password).await,
    }
}

async fn register(state: &AppState, email: &str, password: &str) -> Result<Json<User>, ApiError> {
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Некорректный email".into()));
    }
    if password.len() < 6 {
        return Err(ApiError::BadRequest(
            "Пароль должен быть не короче 6 символов".into(),
        ));
    }

    if state.db.get_user_by_email(email).await?.is_some() {
        return Err(ApiError::BadRequest("Пользователь уже существует".into()));
    }

    // Hash with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?
        .to_string();

    let row = state.db.create_user(email, &password_hash).await?;
    Ok(Json(row.into()))
}

async fn login(state: &AppState, email: &str, password: &str) -> Result<Json<User>, ApiError> {
    let row = state
        .db
        .get_user_by_email(email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Неверный email или пароль".into()))?;

    let parsed_hash = PasswordHash::new(&row.password_hash)
        .map_err(|e| ApiError::Internal(format!("stored password hash is corrupt: {e}")))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized("Неверный email или пароль".into()))?;

    Ok(Json(row.into()))
}
