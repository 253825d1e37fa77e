//! Todo routes. `/api/todos/v1` serves stored records as-is, `/api/todos/v2`
//! serves the response projection.

use actix_web::{web, HttpResponse};

use crate::errors::ServiceError;
use crate::mapper;
use crate::models::TodoRequest;
use crate::state::AppState;

fn list_response<T: serde::Serialize>(items: Vec<T>) -> HttpResponse {
    if items.is_empty() {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::Ok().json(items)
    }
}

pub mod v1 {
    use super::*;
    use actix_web::{delete, get, post, put};

    #[get("")]
    pub async fn list_todos(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
        Ok(list_response(state.todos.find_all().await?))
    }

    #[get("/{id}")]
    pub async fn get_todo(
        state: web::Data<AppState>,
        id: web::Path<i64>,
    ) -> Result<HttpResponse, ServiceError> {
        let todo = state.todos.find_by_id(id.into_inner()).await?;
        Ok(HttpResponse::Ok().json(todo))
    }

    #[post("")]
    pub async fn create_todo(
        state: web::Data<AppState>,
        body: web::Json<TodoRequest>,
    ) -> Result<HttpResponse, ServiceError> {
        let todo = state.todos.save(body.into_inner()).await?;
        Ok(HttpResponse::Created().json(todo))
    }

    #[put("/{id}")]
    pub async fn update_todo(
        state: web::Data<AppState>,
        id: web::Path<i64>,
        body: web::Json<TodoRequest>,
    ) -> Result<HttpResponse, ServiceError> {
        let todo = state
            .todos
            .update(id.into_inner(), body.into_inner())
            .await?;
        Ok(HttpResponse::Ok().json(todo))
    }

    #[delete("/{id}")]
    pub async fn delete_todo(
        state: web::Data<AppState>,
        id: web::Path<i64>,
    ) -> Result<HttpResponse, ServiceError> {
        state.todos.delete(id.into_inner()).await?;
        Ok(HttpResponse::NoContent().finish())
    }

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_todos)
            .service(get_todo)
            .service(create_todo)
            .service(update_todo)
            .service(delete_todo);
    }
}

pub mod v2 {
    use super::*;
    use actix_web::{delete, get, post, put};

    #[get("")]
    pub async fn list_todos(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
        let todos = state.todos.find_all().await?;
        Ok(list_response(
            todos.into_iter().map(mapper::todo_to_response).collect(),
        ))
    }

    #[get("/{id}")]
    pub async fn get_todo(
        state: web::Data<AppState>,
        id: web::Path<i64>,
    ) -> Result<HttpResponse, ServiceError> {
        let todo = state.todos.find_by_id(id.into_inner()).await?;
        Ok(HttpResponse::Ok().json(mapper::todo_to_response(todo)))
    }

    #[post("")]
    pub async fn create_todo(
        state: web::Data<AppState>,
        body: web::Json<TodoRequest>,
    ) -> Result<HttpResponse, ServiceError> {
        let todo = state.todos.save(body.into_inner()).await?;
        Ok(HttpResponse::Created().json(mapper::todo_to_response(todo)))
    }

    #[put("/{id}")]
    pub async fn update_todo(
        state: web::Data<AppState>,
        id: web::Path<i64>,
        body: web::Json<TodoRequest>,
    ) -> Result<HttpResponse, ServiceError> {
        let todo = state
            .todos
            .update(id.into_inner(), body.into_inner())
            .await?;
        Ok(HttpResponse::Ok().json(mapper::todo_to_response(todo)))
    }

    #[delete("/{id}")]
    pub async fn delete_todo(
        state: web::Data<AppState>,
        id: web::Path<i64>,
    ) -> Result<HttpResponse, ServiceError> {
        state.todos.delete(id.into_inner()).await?;
        Ok(HttpResponse::NoContent().finish())
    }

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_todos)
            .service(get_todo)
            .service(create_todo)
            .service(update_todo)
            .service(delete_todo);
    }
}
