//! Conversions between stored records and request/response shapes.
//!
//! Nothing here touches the store; joins such as the author name are
//! resolved by the caller and passed in.

use crate::models::{
    Article, ArticleRequest, ArticleResponse, NewArticle, NewTodo, NewUser, Todo, TodoRequest,
    TodoResponse, User, UserResponse,
};

pub fn article_to_entity(request: ArticleRequest) -> NewArticle {
    NewArticle {
        author_id: request.author_id,
        content: request.content,
    }
}

pub fn article_to_response(article: Article, author_name: String) -> ArticleResponse {
    ArticleResponse {
        id: article.id,
        content: article.content,
        author_id: article.author_id,
        author_name,
        created_at: article.created_at,
    }
}

pub fn user_to_entity(username: String, password_hash: String) -> NewUser {
    NewUser {
        username,
        password_hash,
    }
}

pub fn user_to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
    }
}

pub fn todo_to_entity(request: TodoRequest) -> NewTodo {
    NewTodo {
        title: request.title,
        description: request.description,
        completed: request.completed,
    }
}

pub fn todo_to_response(todo: Todo) -> TodoResponse {
    TodoResponse {
        id: todo.id,
        title: todo.title,
        description: todo.description,
        completed: todo.completed,
    }
}
