use actix_web::{delete, get, post, put, web, HttpResponse};
use log::debug;

use crate::errors::ServiceError;
use crate::models::{ArticleRequest, ArticleUpdate, AuthorQuery, FollowQuery};
use crate::state::AppState;

#[post("/article")]
pub async fn create_article(
    state: web::Data<AppState>,
    body: web::Json<ArticleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let article = state.articles.create_article(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(article))
}

#[get("/article/{id}")]
pub async fn get_article(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let article = state.articles.get_article_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(article))
}

#[get("/article")]
pub async fn list_articles_by_author(
    state: web::Data<AppState>,
    query: web::Query<AuthorQuery>,
) -> Result<HttpResponse, ServiceError> {
    let articles = state
        .articles
        .get_article_list_by_user_id(query.author_id)
        .await?;
    Ok(HttpResponse::Ok().json(articles))
}

/// Only `content` from the body is applied; `authorId` is ignored.
#[put("/article/{id}")]
pub async fn update_article(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<ArticleUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let article = state
        .articles
        .update_article(id.into_inner(), &body.content)
        .await?;
    Ok(HttpResponse::Ok().json(article))
}

#[delete("/article/{id}")]
pub async fn delete_article(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    state.articles.delete_article(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/feed")]
pub async fn get_feed(
    state: web::Data<AppState>,
    query: web::Query<FollowQuery>,
) -> Result<HttpResponse, ServiceError> {
    let feed = state
        .articles
        .get_feed_list_by_follower_id(query.follower_id)
        .await?;
    debug!("Serving {} feed items to user {}", feed.len(), query.follower_id);
    Ok(HttpResponse::Ok().json(feed))
}
