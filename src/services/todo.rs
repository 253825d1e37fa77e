use log::info;
use std::sync::Arc;

use crate::db::TodoStore;
use crate::errors::ServiceError;
use crate::mapper;
use crate::models::{Todo, TodoRequest};

#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoStore>) -> Self {
        Self { todos }
    }

    pub async fn find_all(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.todos.list_todos().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Todo, ServiceError> {
        self.todos
            .find_todo(id)
            .await?
            .ok_or(ServiceError::TodoNotFound { id })
    }

    pub async fn save(&self, request: TodoRequest) -> Result<Todo, ServiceError> {
        validate_title(&request.title)?;
        let todo = self.todos.insert_todo(mapper::todo_to_entity(request)).await?;
        info!("Todo {} created", todo.id);
        Ok(todo)
    }

    pub async fn update(&self, id: i64, request: TodoRequest) -> Result<Todo, ServiceError> {
        validate_title(&request.title)?;
        let mut todo = self.find_by_id(id).await?;
        todo.title = request.title;
        todo.description = request.description;
        todo.completed = request.completed;

        if !self.todos.update_todo(&todo).await? {
            return Err(ServiceError::TodoNotFound { id });
        }
        info!("Todo {} updated", id);
        Ok(todo)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.todos.delete_todo(id).await? {
            return Err(ServiceError::TodoNotFound { id });
        }
        info!("Todo {} deleted", id);
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::validation("title must not be empty"));
    }
    Ok(())
}
