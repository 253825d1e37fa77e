use std::sync::Arc;

use crate::auth::TokenService;
use crate::db::{ArticleStore, FollowStore, TodoStore, UserStore};
use crate::services::{ArticleService, FollowService, TodoService, UserService};

/// Services shared by every worker, registered as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleService,
    pub users: UserService,
    pub follows: FollowService,
    pub todos: TodoService,
    pub tokens: TokenService,
}

impl AppState {
    /// Wires every service to one store backing all entity kinds.
    pub fn new<S>(store: Arc<S>, tokens: TokenService, bcrypt_cost: u32) -> Self
    where
        S: UserStore + ArticleStore + FollowStore + TodoStore + 'static,
    {
        Self {
            articles: ArticleService::new(store.clone(), store.clone(), store.clone()),
            users: UserService::new(store.clone(), bcrypt_cost),
            follows: FollowService::new(store.clone(), store.clone()),
            todos: TodoService::new(store),
            tokens,
        }
    }
}
