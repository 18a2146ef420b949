use crate::error::AppError;
use crate::services::ShelfService;
use actix_web::{get, web, HttpResponse};

/// GET /api/reviews — every publicly visible review with book and
/// reviewer context
#[get("/reviews")]
pub async fn list_reviews(shelf: web::Data<ShelfService>) -> Result<HttpResponse, AppError> {
    let reviews = shelf.list_all_reviews().await?;
    Ok(HttpResponse::Ok().json(reviews))
}
