//! # Gateway Auth Library
//!
//! Caller-identity extractors shared by the Folio services.
//!
//! Authentication happens at the gateway in front of the services; after
//! validating the session it injects the caller's id as the `x-user-id`
//! header. Services trust that header and never see credentials.

use actix_web::error::ErrorUnauthorized;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

/// An authenticated caller. Extraction fails with 401 when the gateway did
/// not identify one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

/// A caller that may or may not be authenticated. Used on read endpoints
/// open to anonymous viewers; a malformed header degrades to anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeAuthUser(pub Option<Uuid>);

fn user_id_from(req: &HttpRequest) -> Option<Uuid> {
    req.headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            user_id_from(req)
                .map(|id| AuthUser { id })
                .ok_or_else(|| ErrorUnauthorized("Not authenticated")),
        )
    }
}

impl FromRequest for MaybeAuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeAuthUser(user_id_from(req))))
    }
}
