//! Bearer-token authentication for the `/api/v2` routes.
//!
//! Handlers never see tokens. [`require_token`] validates the
//! `Authorization` header before the request reaches a handler and leaves
//! the resolved [`Principal`] in the request extensions.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::middleware::Next;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, ServiceError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id,
            iat,
            exp: iat.saturating_add(self.ttl_secs),
            jti: Uuid::new_v4(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            error!("Failed to sign token for user {}: {:?}", user.id, e);
            ServiceError::Internal(format!("token signing failed: {e}"))
        })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, ServiceError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!("Rejected token: {}", e);
            ServiceError::Unauthorized
        })?;
        Ok(Principal {
            user_id: data.claims.uid,
            username: data.claims.sub,
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<Principal, ServiceError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        error!("AppState missing from app data");
        ServiceError::Internal("application state not configured".into())
    })?;
    let token = bearer_token(req).ok_or(ServiceError::Unauthorized)?;
    state.tokens.verify(token)
}

/// `middleware::from_fn` gate: rejects the request with 401 unless it
/// carries a valid bearer token.
pub async fn require_token(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, Error> {
    match authenticate(req.request()) {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(err) => Ok(req.error_response(err).map_into_right_body()),
    }
}

impl FromRequest for Principal {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .cloned()
                .ok_or(ServiceError::Unauthorized),
        )
    }
}
