use crate::error::AppError;
use crate::repository::{preferences::load_context, PreferenceRepository};
use crate::services::affinity;
use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use gateway_auth::AuthUser;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteGenresResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResponse {
    pub highlight: bool,
}

/// GET /api/genres/favorites
#[get("/genres/favorites")]
pub async fn favorite_genres(
    repo: web::Data<Arc<dyn PreferenceRepository>>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    let ctx = load_context(repo.get_ref().as_ref(), user.id, Utc::now()).await?;
    let genres = affinity::favorite_genres(&ctx);
    Ok(HttpResponse::Ok().json(FavoriteGenresResponse { genres }))
}

/// GET /api/genres/{genre}/highlight
#[get("/genres/{genre}/highlight")]
pub async fn genre_highlight(
    repo: web::Data<Arc<dyn PreferenceRepository>>,
    user: AuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = load_context(repo.get_ref().as_ref(), user.id, Utc::now()).await?;
    let highlight = affinity::should_highlight(&ctx, &path.into_inner());
    Ok(HttpResponse::Ok().json(HighlightResponse { highlight }))
}
