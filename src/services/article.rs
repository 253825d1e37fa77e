use futures::future::try_join_all;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::db::{ArticleStore, FollowStore, StoreError, UserStore};
use crate::errors::ServiceError;
use crate::mapper;
use crate::models::{Article, ArticleRequest, ArticleResponse};

#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleStore>,
    users: Arc<dyn UserStore>,
    follows: Arc<dyn FollowStore>,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleStore>,
        users: Arc<dyn UserStore>,
        follows: Arc<dyn FollowStore>,
    ) -> Self {
        Self {
            articles,
            users,
            follows,
        }
    }

    pub async fn create_article(
        &self,
        request: ArticleRequest,
    ) -> Result<ArticleResponse, ServiceError> {
        validate_content(&request.content)?;
        let author_id = request.author_id;
        let author = self
            .users
            .find_user(author_id)
            .await?
            .ok_or(ServiceError::AuthorNotFound { id: author_id })?;

        let article = match self
            .articles
            .insert_article(mapper::article_to_entity(request))
            .await
        {
            Ok(article) => article,
            // author deleted between the lookup and the insert
            Err(StoreError::MissingReference { .. }) => {
                return Err(ServiceError::AuthorNotFound { id: author_id })
            }
            Err(e) => return Err(e.into()),
        };

        info!("Article {} created by user {}", article.id, author_id);
        Ok(mapper::article_to_response(article, author.username))
    }

    pub async fn get_article_by_id(&self, id: i64) -> Result<ArticleResponse, ServiceError> {
        let article = self.find_article(id).await?;
        self.project_one(article).await
    }

    /// Overwrites `content` only; author, id and timestamp are untouched.
    pub async fn update_article(
        &self,
        id: i64,
        content: &str,
    ) -> Result<ArticleResponse, ServiceError> {
        validate_content(content)?;
        let mut article = self.find_article(id).await?;
        article.content = content.to_owned();
        if !self.articles.update_article(&article).await? {
            return Err(ServiceError::ArticleNotFound { id });
        }

        info!("Article {} updated", id);
        self.project_one(article).await
    }

    pub async fn delete_article(&self, id: i64) -> Result<(), ServiceError> {
        if !self.articles.delete_article(id).await? {
            return Err(ServiceError::ArticleNotFound { id });
        }
        info!("Article {} deleted", id);
        Ok(())
    }

    pub async fn get_article_list_by_user_id(
        &self,
        author_id: i64,
    ) -> Result<Vec<ArticleResponse>, ServiceError> {
        let articles = self.articles.list_articles_by_authors(&[author_id]).await?;
        debug!("Found {} articles for user {}", articles.len(), author_id);
        self.project(articles).await
    }

    /// Articles written by everyone `follower_id` follows, newest first.
    pub async fn get_feed_list_by_follower_id(
        &self,
        follower_id: i64,
    ) -> Result<Vec<ArticleResponse>, ServiceError> {
        let followees = self.follows.followee_ids(follower_id).await?;
        if followees.is_empty() {
            debug!("User {} follows nobody, feed is empty", follower_id);
            return Ok(Vec::new());
        }

        let articles = self.articles.list_articles_by_authors(&followees).await?;
        debug!(
            "Feed for user {}: {} articles from {} followees",
            follower_id,
            articles.len(),
            followees.len()
        );
        self.project(articles).await
    }

    async fn find_article(&self, id: i64) -> Result<Article, ServiceError> {
        self.articles
            .find_article(id)
            .await?
            .ok_or(ServiceError::ArticleNotFound { id })
    }

    async fn project_one(&self, article: Article) -> Result<ArticleResponse, ServiceError> {
        let author_name = self.author_name(article.author_id).await?;
        Ok(mapper::article_to_response(article, author_name))
    }

    /// Resolves each distinct author once, then maps and orders the list.
    /// Articles whose author no longer exists are left out.
    async fn project(
        &self,
        mut articles: Vec<Article>,
    ) -> Result<Vec<ArticleResponse>, ServiceError> {
        let author_ids: BTreeSet<i64> = articles.iter().map(|a| a.author_id).collect();
        let authors =
            try_join_all(author_ids.into_iter().map(|id| self.users.find_user(id))).await?;
        let names: HashMap<i64, String> = authors
            .into_iter()
            .flatten()
            .map(|user| (user.id, user.username))
            .collect();

        articles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(articles
            .into_iter()
            .filter_map(|article| match names.get(&article.author_id) {
                Some(name) => Some(mapper::article_to_response(article, name.clone())),
                None => {
                    debug!(
                        "Skipping article {}: author {} is gone",
                        article.id, article.author_id
                    );
                    None
                }
            })
            .collect())
    }

    async fn author_name(&self, author_id: i64) -> Result<String, ServiceError> {
        self.users
            .find_user(author_id)
            .await?
            .map(|user| user.username)
            .ok_or(ServiceError::AuthorNotFound { id: author_id })
    }
}

fn validate_content(content: &str) -> Result<(), ServiceError> {
    if content.trim().is_empty() {
        return Err(ServiceError::validation("content must not be empty"));
    }
    Ok(())
}
