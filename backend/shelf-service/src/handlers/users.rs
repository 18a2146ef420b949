use crate::domain::models::{UserProfile, UserWithFollowerCount};
use crate::error::AppError;
use crate::repository::UserRepository;
use crate::services::{FollowService, ShelfService};
use actix_web::{get, patch, web, HttpResponse};
use gateway_auth::{AuthUser, MaybeAuthUser};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 1024))]
    pub bio: Option<String>,
}

/// GET /api/users — community listing with follower counts
#[get("/users")]
pub async fn list_users(
    users: web::Data<UserRepository>,
    follows: web::Data<FollowService>,
) -> Result<HttpResponse, AppError> {
    let active = users.list_active().await?;

    let mut out = Vec::with_capacity(active.len());
    for user in active {
        let followers_count = follows.follower_count(user.id).await?;
        out.push(UserWithFollowerCount {
            user,
            followers_count,
        });
    }

    Ok(HttpResponse::Ok().json(out))
}

/// GET /api/users/{id}
#[get("/users/{id}")]
pub async fn get_user(
    users: web::Data<UserRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;

    Ok(HttpResponse::Ok().json(user))
}

/// PATCH /api/users/{id} — callers may only update their own profile
#[patch("/users/{id}")]
pub async fn update_user(
    users: web::Data<UserRepository>,
    user: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let target = path.into_inner();
    if user.id != target {
        return Err(AppError::Forbidden(
            "profiles can only be updated by their owner".to_string(),
        ));
    }

    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = users
        .update_profile(target, body.name.as_deref(), body.bio.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {target} not found")))?;

    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/users/{id}/profile — profile plus the entries visible to the
/// caller and follow counts
#[get("/users/{id}/profile")]
pub async fn get_user_profile(
    users: web::Data<UserRepository>,
    shelf: web::Data<ShelfService>,
    follows: web::Data<FollowService>,
    viewer: MaybeAuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;

    let public_books = if viewer.0 == Some(user_id) {
        shelf.list_own(user_id).await?
    } else {
        shelf.list_public(user_id).await?
    };
    let followers_count = follows.follower_count(user_id).await?;
    let following_count = follows.following_count(user_id).await?;

    Ok(HttpResponse::Ok().json(UserProfile {
        user,
        public_books,
        followers_count,
        following_count,
    }))
}
