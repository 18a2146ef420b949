use crate::clients::CatalogClient;
use crate::error::AppError;
use crate::repository::{preferences::load_context, PreferenceRepository};
use crate::services::ranking;
use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use gateway_auth::MaybeAuthUser;
use std::sync::Arc;

/// GET /api/recommendations — the catalog, re-ranked for the caller.
///
/// Anonymous or non-consenting callers get the catalog in its original
/// order; personalization only ever reorders, it never filters.
#[get("/recommendations")]
pub async fn get_recommendations(
    repo: web::Data<Arc<dyn PreferenceRepository>>,
    catalog: web::Data<CatalogClient>,
    viewer: MaybeAuthUser,
) -> Result<HttpResponse, AppError> {
    let books = catalog.list_books().await?;

    let ctx = match viewer.0 {
        Some(user_id) => load_context(repo.get_ref().as_ref(), user_id, Utc::now()).await?,
        None => Default::default(),
    };

    let ranked = ranking::rank(books, &ctx);
    Ok(HttpResponse::Ok().json(ranked))
}
