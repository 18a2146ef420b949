use crate::error::AppError;
use crate::services::FollowService;
use actix_web::{delete, get, post, web, HttpResponse};
use gateway_auth::AuthUser;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatusResponse {
    pub is_following: bool,
}

/// POST /api/follows/{id} — follow a user
#[post("/follows/{id}")]
pub async fn follow_user(
    follows: web::Data<FollowService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let created = follows.follow(user.id, path.into_inner()).await?;

    if created {
        Ok(HttpResponse::Created().json(serde_json::json!({
            "message": "User followed successfully"
        })))
    } else {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Already following this user"
        })))
    }
}

/// DELETE /api/follows/{id} — unfollow a user (no-op if not following)
#[delete("/follows/{id}")]
pub async fn unfollow_user(
    follows: web::Data<FollowService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    follows.unfollow(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User unfollowed successfully"
    })))
}

/// GET /api/follows/status/{id}
#[get("/follows/status/{id}")]
pub async fn follow_status(
    follows: web::Data<FollowService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let is_following = follows.is_following(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FollowStatusResponse { is_following }))
}

/// GET /api/users/{id}/followers
#[get("/users/{id}/followers")]
pub async fn list_followers(
    follows: web::Data<FollowService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let followers = follows.list_followers(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(followers))
}

/// GET /api/users/{id}/following
#[get("/users/{id}/following")]
pub async fn list_following(
    follows: web::Data<FollowService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let following = follows.list_following(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(following))
}
