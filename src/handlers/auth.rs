use actix_web::{get, post, web, HttpResponse};
use log::info;

use crate::auth::Principal;
use crate::errors::ServiceError;
use crate::models::{LoginRequest, LoginResponse, UserRequest};
use crate::state::AppState;

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.create_user(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user = state
        .users
        .authenticate(&body.username, &body.password)
        .await?;
    let token = state.tokens.issue(&user)?;
    info!("User {} logged in", user.id);
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

#[get("/me")]
pub async fn me(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.get_user_by_id(principal.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
