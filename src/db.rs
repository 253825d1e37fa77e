use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::models::{Article, Follow, NewArticle, NewTodo, NewUser, Todo, User};

/// Infrastructure failures raised by an entity store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: &'static str },
    #[error("{entity} {id} referenced but not stored")]
    MissingReference { entity: &'static str, id: i64 },
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    /// Returns `false` when no user with that id exists.
    async fn update_user(&self, user: &User) -> Result<bool, StoreError>;
    async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_article(&self, id: i64) -> Result<Option<Article>, StoreError>;
    async fn list_articles_by_authors(&self, author_ids: &[i64])
        -> Result<Vec<Article>, StoreError>;
    async fn insert_article(&self, article: NewArticle) -> Result<Article, StoreError>;
    async fn update_article(&self, article: &Article) -> Result<bool, StoreError>;
    async fn delete_article(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait FollowStore: Send + Sync {
    async fn followee_ids(&self, follower_id: i64) -> Result<Vec<i64>, StoreError>;
    /// Returns `false` when the edge already existed.
    async fn insert_follow(&self, follow: Follow) -> Result<bool, StoreError>;
    async fn delete_follow(&self, follow: Follow) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn find_todo(&self, id: i64) -> Result<Option<Todo>, StoreError>;
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError>;
    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, StoreError>;
    async fn update_todo(&self, todo: &Todo) -> Result<bool, StoreError>;
    async fn delete_todo(&self, id: i64) -> Result<bool, StoreError>;
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    articles: BTreeMap<i64, Article>,
    follows: BTreeSet<Follow>,
    todos: BTreeMap<i64, Todo>,
    last_user_id: i64,
    last_article_id: i64,
    last_todo_id: i64,
}

/// Process-local entity store. Every call takes the lock once, so each
/// operation is all-or-nothing.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation { field: "username" });
        }
        tables.last_user_id += 1;
        let stored = User {
            id: tables.last_user_id,
            username: user.username,
            password_hash: user.password_hash,
        };
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_user(&self, user: &User) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(StoreError::UniqueViolation { field: "username" });
        }
        match tables.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_article(&self, id: i64) -> Result<Option<Article>, StoreError> {
        Ok(self.tables.read().await.articles.get(&id).cloned())
    }

    async fn list_articles_by_authors(
        &self,
        author_ids: &[i64],
    ) -> Result<Vec<Article>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .values()
            .filter(|article| author_ids.contains(&article.author_id))
            .cloned()
            .collect())
    }

    async fn insert_article(&self, article: NewArticle) -> Result<Article, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&article.author_id) {
            return Err(StoreError::MissingReference {
                entity: "user",
                id: article.author_id,
            });
        }
        tables.last_article_id += 1;
        let stored = Article {
            id: tables.last_article_id,
            author_id: article.author_id,
            content: article.content,
            created_at: self.clock.now(),
        };
        tables.articles.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_article(&self, article: &Article) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.articles.get_mut(&article.id) {
            Some(existing) => {
                *existing = article.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_article(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.articles.remove(&id).is_some())
    }
}

#[async_trait]
impl FollowStore for MemoryStore {
    async fn followee_ids(&self, follower_id: i64) -> Result<Vec<i64>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|edge| edge.follower_id == follower_id)
            .map(|edge| edge.followee_id)
            .collect())
    }

    async fn insert_follow(&self, follow: Follow) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        for id in [follow.follower_id, follow.followee_id] {
            if !tables.users.contains_key(&id) {
                return Err(StoreError::MissingReference { entity: "user", id });
            }
        }
        Ok(tables.follows.insert(follow))
    }

    async fn delete_follow(&self, follow: Follow) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.follows.remove(&follow))
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_todo(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.tables.read().await.todos.values().cloned().collect())
    }

    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_todo_id += 1;
        let stored = Todo {
            id: tables.last_todo_id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            created_at: self.clock.now(),
        };
        tables.todos.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_todo(&self, todo: &Todo) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.todos.get_mut(&todo.id) {
            Some(existing) => {
                *existing = todo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_todo(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }
}
