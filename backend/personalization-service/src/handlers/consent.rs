use crate::error::AppError;
use crate::services::ConsentService;
use actix_web::{get, put, web, HttpResponse};
use gateway_auth::AuthUser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConsentRequest {
    pub granted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentResponse {
    pub granted: bool,
}

/// GET /api/consent
#[get("/consent")]
pub async fn get_consent(
    consent: web::Data<ConsentService>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    let granted = consent.has_consent(user.id).await;
    Ok(HttpResponse::Ok().json(ConsentResponse { granted }))
}

/// PUT /api/consent
#[put("/consent")]
pub async fn set_consent(
    consent: web::Data<ConsentService>,
    user: AuthUser,
    body: web::Json<SetConsentRequest>,
) -> Result<HttpResponse, AppError> {
    let state = consent.set_consent(user.id, body.granted).await?;
    Ok(HttpResponse::Ok().json(ConsentResponse {
        granted: state.granted,
    }))
}
