use crate::domain::UserPreferences;
use crate::error::AppError;
use crate::repository::PreferenceRepository;
use crate::services::ConsentService;
use actix_web::{get, post, put, web, HttpResponse};
use gateway_auth::AuthUser;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingTimeRequest {
    pub additional_time: i32,
}

/// GET /api/preferences — empty preferences without consent
#[get("/preferences")]
pub async fn get_preferences(
    repo: web::Data<Arc<dyn PreferenceRepository>>,
    consent: web::Data<ConsentService>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    if !consent.has_consent(user.id).await {
        return Ok(HttpResponse::Ok().json(UserPreferences::default()));
    }

    let prefs = repo
        .get_preferences(user.id)
        .await
        .map_err(AppError::Internal)?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(prefs))
}

/// PUT /api/preferences — a no-op without consent
#[put("/preferences")]
pub async fn put_preferences(
    repo: web::Data<Arc<dyn PreferenceRepository>>,
    consent: web::Data<ConsentService>,
    user: AuthUser,
    body: web::Json<UserPreferences>,
) -> Result<HttpResponse, AppError> {
    if !consent.has_consent(user.id).await {
        return Ok(HttpResponse::Ok().json(UserPreferences::default()));
    }

    let prefs = body.into_inner();
    repo.put_preferences(user.id, &prefs)
        .await
        .map_err(AppError::Internal)?;

    Ok(HttpResponse::Ok().json(prefs))
}

/// POST /api/preferences/reading-time — accumulate minutes spent reading
/// and mark the user active. A malformed `additionalTime` is a 400 from
/// the JSON extractor before the handler runs.
#[post("/preferences/reading-time")]
pub async fn track_reading_time(
    repo: web::Data<Arc<dyn PreferenceRepository>>,
    user: AuthUser,
    body: web::Json<ReadingTimeRequest>,
) -> Result<HttpResponse, AppError> {
    let total = repo
        .add_reading_time(user.id, body.additional_time)
        .await
        .map_err(AppError::Internal)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "readingTime": total })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::preferences::MockPreferenceRepository;
    use actix_web::{http::StatusCode, test, App};
    use gateway_auth::USER_ID_HEADER;
    use uuid::Uuid;

    fn reader() -> Uuid {
        Uuid::from_u128(1)
    }

    fn app_data(repo: MockPreferenceRepository) -> web::Data<Arc<dyn PreferenceRepository>> {
        let repo: Arc<dyn PreferenceRepository> = Arc::new(repo);
        web::Data::new(repo)
    }

    #[actix_rt::test]
    async fn reading_time_is_accumulated_for_the_identified_user() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_add_reading_time()
            .withf(|user_id, additional| *user_id == Uuid::from_u128(1) && *additional == 15)
            .returning(|_, _| Ok(55));

        let app = test::init_service(
            App::new()
                .app_data(app_data(repo))
                .service(track_reading_time),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/preferences/reading-time")
            .insert_header((USER_ID_HEADER, reader().to_string()))
            .set_json(serde_json::json!({ "additionalTime": 15 }))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["readingTime"], 55);
    }

    #[actix_rt::test]
    async fn reading_time_without_identity_is_unauthorized() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_add_reading_time().never();

        let app = test::init_service(
            App::new()
                .app_data(app_data(repo))
                .service(track_reading_time),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/preferences/reading-time")
            .set_json(serde_json::json!({ "additionalTime": 15 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn non_numeric_reading_time_is_a_bad_request() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_add_reading_time().never();

        let app = test::init_service(
            App::new()
                .app_data(app_data(repo))
                .service(track_reading_time),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/preferences/reading-time")
            .insert_header((USER_ID_HEADER, reader().to_string()))
            .set_json(serde_json::json!({ "additionalTime": "a lot" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
