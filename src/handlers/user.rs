use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::errors::ServiceError;
use crate::models::{Follow, FollowQuery, UserRequest};
use crate::state::AppState;

#[get("/user")]
pub async fn get_users(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let users = state.users.get_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.get_user_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/user")]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.create_user(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user = state
        .users
        .update_user(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    state.users.delete_user(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/follow")]
pub async fn follow(
    state: web::Data<AppState>,
    body: web::Json<Follow>,
) -> Result<HttpResponse, ServiceError> {
    state.follows.follow(body.follower_id, body.followee_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/follow")]
pub async fn unfollow(
    state: web::Data<AppState>,
    query: web::Query<Follow>,
) -> Result<HttpResponse, ServiceError> {
    state
        .follows
        .unfollow(query.follower_id, query.followee_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/follow")]
pub async fn list_followees(
    state: web::Data<AppState>,
    query: web::Query<FollowQuery>,
) -> Result<HttpResponse, ServiceError> {
    let followees = state.follows.get_followee_list(query.follower_id).await?;
    Ok(HttpResponse::Ok().json(followees))
}
