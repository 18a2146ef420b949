use crate::domain::models::NewBook;
use crate::error::AppError;
use crate::services::ShelfService;
use actix_web::{get, post, web, HttpResponse};
use gateway_auth::AuthUser;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    #[validate(length(min = 1, max = 256))]
    pub author: String,
    pub cover_image: Option<String>,
    pub genre: Option<String>,
    pub publication_date: Option<String>,
    pub isbn: Option<String>,
}

/// GET /api/books
#[get("/books")]
pub async fn list_books(shelf: web::Data<ShelfService>) -> Result<HttpResponse, AppError> {
    let books = shelf.list_books().await?;
    Ok(HttpResponse::Ok().json(books))
}

/// GET /api/books/{id}
#[get("/books/{id}")]
pub async fn get_book(
    shelf: web::Data<ShelfService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let book = shelf.get_book(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(book))
}

/// POST /api/books
#[post("/books")]
pub async fn create_book(
    shelf: web::Data<ShelfService>,
    _user: AuthUser,
    body: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let body = body.into_inner();
    let book = shelf
        .create_book(NewBook {
            title: body.title,
            author: body.author,
            cover_image: body.cover_image,
            genre: body.genre,
            publication_date: body.publication_date,
            isbn: body.isbn,
        })
        .await?;

    Ok(HttpResponse::Created().json(book))
}
