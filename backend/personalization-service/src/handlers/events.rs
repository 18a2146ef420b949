use crate::error::AppError;
use crate::services::BehaviorTracker;
use actix_web::{post, web, HttpResponse};
use gateway_auth::AuthUser;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEventRequest {
    pub book_id: Uuid,
    pub genre: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEventRequest {
    pub query: String,
}

/// POST /api/events/view — always 204: tracking never fails the caller
#[post("/events/view")]
pub async fn track_view(
    tracker: web::Data<BehaviorTracker>,
    user: AuthUser,
    body: web::Json<ViewEventRequest>,
) -> Result<HttpResponse, AppError> {
    tracker
        .track_view(
            user.id,
            body.book_id,
            body.genre.as_deref(),
            body.author.as_deref(),
        )
        .await;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/events/search — always 204: tracking never fails the caller
#[post("/events/search")]
pub async fn track_search(
    tracker: web::Data<BehaviorTracker>,
    user: AuthUser,
    body: web::Json<SearchEventRequest>,
) -> Result<HttpResponse, AppError> {
    tracker.track_search(user.id, &body.query).await;
    Ok(HttpResponse::NoContent().finish())
}
