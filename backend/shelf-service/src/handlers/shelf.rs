use crate::domain::models::{NewShelfEntry, ReadingStatus, ShelfEntryPatch};
use crate::error::AppError;
use crate::services::ShelfService;
use actix_web::{delete, get, patch, post, web, HttpResponse};
use gateway_auth::{AuthUser, MaybeAuthUser};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

/// Maps an absent field to `None` and an explicit `null` to `Some(None)`,
/// so a PATCH can clear a nullable column.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

// ==================== Request types ====================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddShelfEntryRequest {
    pub book_id: Uuid,
    pub status: ReadingStatus,
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub rating: Option<i32>,
    pub review: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShelfEntryRequest {
    pub status: Option<ReadingStatus>,
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub rating: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub review: Option<Option<String>>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfQuery {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub with_reviews: bool,
}

// ==================== Handlers ====================

/// GET /api/shelf — the caller's own shelf, or another user's public view
/// via `?userId=`
#[get("/shelf")]
pub async fn list_shelf(
    shelf: web::Data<ShelfService>,
    viewer: MaybeAuthUser,
    query: web::Query<ShelfQuery>,
) -> Result<HttpResponse, AppError> {
    let target = query
        .user_id
        .or(viewer.0)
        .ok_or(AppError::Unauthorized)?;

    let entries = if query.with_reviews {
        let reviews = shelf.list_reviews_for_user(target).await?;
        crate::services::visibility::filter_visible(reviews, viewer.0)
    } else if viewer.0 == Some(target) {
        shelf.list_own(target).await?
    } else {
        shelf.list_public(target).await?
    };

    Ok(HttpResponse::Ok().json(entries))
}

/// POST /api/shelf
#[post("/shelf")]
pub async fn add_to_shelf(
    shelf: web::Data<ShelfService>,
    user: AuthUser,
    body: web::Json<AddShelfEntryRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let body = body.into_inner();
    let entry = shelf
        .add_to_shelf(
            user.id,
            NewShelfEntry {
                book_id: body.book_id,
                status: body.status,
                progress: body.progress,
                rating: body.rating,
                review: body.review,
                is_public: body.is_public,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(entry))
}

/// PATCH /api/shelf/{id}
#[patch("/shelf/{id}")]
pub async fn update_shelf_entry(
    shelf: web::Data<ShelfService>,
    user: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateShelfEntryRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let body = body.into_inner();
    let entry = shelf
        .update_entry(
            user.id,
            path.into_inner(),
            ShelfEntryPatch {
                status: body.status,
                progress: body.progress,
                rating: body.rating,
                review: body.review,
                is_public: body.is_public,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(entry))
}

/// DELETE /api/shelf/{id}
#[delete("/shelf/{id}")]
pub async fn remove_shelf_entry(
    shelf: web::Data<ShelfService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    shelf.remove_entry(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Book removed from shelf"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_request(progress: Option<i32>, rating: Option<i32>) -> AddShelfEntryRequest {
        AddShelfEntryRequest {
            book_id: Uuid::from_u128(1),
            status: ReadingStatus::Reading,
            progress,
            rating,
            review: None,
            is_public: false,
        }
    }

    #[test]
    fn progress_and_rating_within_range_pass_validation() {
        assert!(add_request(Some(0), Some(0)).validate().is_ok());
        assert!(add_request(Some(100), Some(5)).validate().is_ok());
        assert!(add_request(None, None).validate().is_ok());
    }

    #[test]
    fn progress_out_of_range_fails_validation() {
        assert!(add_request(Some(101), None).validate().is_err());
        assert!(add_request(Some(-1), None).validate().is_err());
    }

    #[test]
    fn rating_out_of_range_fails_validation() {
        assert!(add_request(None, Some(6)).validate().is_err());
        assert!(add_request(None, Some(-1)).validate().is_err());

        let patch: UpdateShelfEntryRequest = serde_json::from_str(r#"{"rating": 6}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn omitted_review_leaves_the_field_untouched() {
        let patch: UpdateShelfEntryRequest = serde_json::from_str(r#"{"progress": 50}"#).unwrap();
        assert_eq!(patch.review, None);
    }

    #[test]
    fn null_review_requests_a_clear() {
        let patch: UpdateShelfEntryRequest = serde_json::from_str(r#"{"review": null}"#).unwrap();
        assert_eq!(patch.review, Some(None));
    }

    #[test]
    fn string_review_requests_a_replace() {
        let patch: UpdateShelfEntryRequest =
            serde_json::from_str(r#"{"review": "Loved it"}"#).unwrap();
        assert_eq!(patch.review, Some(Some("Loved it".to_string())));
    }
}
