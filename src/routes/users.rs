// src/routes/users.rs

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use sha2::{Digest, Sha256};

use super::extract::ValidatedJson;
use crate::{
    error::{ApiError, ApiResult},
    models::{InsertUser, User},
    AppState,
};

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// POST /api/users (signup). Usernames are unique; the password is stored as
/// a digest and never echoed back.
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<InsertUser>,
) -> ApiResult<Json<User>> {
    if state.storage.get_user_by_username(&body.username).await?.is_some() {
        return Err(ApiError::Validation(format!("username {} is already taken", body.username)));
    }

    let user = state
        .storage
        .create_user(InsertUser {
            password: hash_password(&body.password),
            username: body.username,
        })
        .await?;
    tracing::info!(user_id = user.id, "user created");
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = path?;
    state
        .storage
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_is_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }
}
