use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    errors::{internal, ApiError},
    state::AppState,
    storage::StorageError,
    users::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        repo_types::{NewUser, User},
        services::{
            hash_password, is_valid_username, verify_password, AuthUser, JwtKeys,
            MIN_PASSWORD_LEN,
        },
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn username_taken() -> ApiError {
    (StatusCode::CONFLICT, "Username already taken".into())
}

fn issue(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(&user.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    })?;
    Ok(AuthResponse {
        access_token,
        user: user.into(),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err((StatusCode::BAD_REQUEST, "Invalid username".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    if state
        .repo
        .get_user_by_username(&payload.username)
        .await
        .map_err(internal)?
        .is_some()
    {
        warn!(username = %payload.username, "username already registered");
        return Err(username_taken());
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    })?;

    // a concurrent registration can still win between the check above and here
    let user = match state
        .repo
        .create_user(NewUser {
            username: payload.username,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(StorageError::UsernameTaken) => {
            warn!("username taken during registration");
            return Err(username_taken());
        }
        Err(e) => return Err(internal(e)),
    };

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(issue(&state, user)?)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let username = payload.username.trim();

    let user = match state
        .repo
        .get_user_by_username(username)
        .await
        .map_err(internal)?
    {
        Some(u) => u,
        None => {
            warn!(%username, "login unknown username");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    })?;
    if !ok {
        warn!(%username, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(issue(&state, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    match state.repo.get_user(&user_id).await.map_err(internal)? {
        Some(user) => Ok(Json(user.into())),
        None => {
            warn!(%user_id, "token for unknown user");
            Err((StatusCode::UNAUTHORIZED, "User not found".into()))
        }
    }
}
