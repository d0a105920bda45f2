/// Profile endpoints
///
/// The profile carries the interest and skill tag lists that feed the
/// recommendation scorer. Updates go through an explicit allow-list
/// ([`UpdateUser`]); credentials and email cannot be changed here.
///
/// # Endpoints
///
/// - `GET /v1/users/me` - Current user's profile
/// - `PUT /v1/users/me` - Update name, interests, and skills

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use gatherly_shared::{
    auth::middleware::AuthContext,
    models::user::{UpdateUser, User},
};
use serde::Deserialize;
use validator::Validate;

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Replacement interest tags
    pub interests: Option<Vec<String>>,

    /// Replacement skill tags
    pub skills: Option<Vec<String>>,
}

/// Get the current user's profile
///
/// # Errors
///
/// - `404 Not Found`: Authenticated user no longer exists
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update the current user's profile
///
/// Only the allow-listed fields (name, interests, skills) can change;
/// absent fields are left untouched.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `404 Not Found`: Authenticated user no longer exists
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let update = UpdateUser {
        name: req.name,
        interests: req.interests,
        skills: req.skills,
    };

    let user = User::update(&state.db, auth.user_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::debug!(user_id = %user.id, "Profile updated");

    Ok(Json(user))
}
