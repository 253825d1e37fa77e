use futures::future::try_join_all;
use log::info;
use std::sync::Arc;

use crate::db::{FollowStore, StoreError, UserStore};
use crate::errors::ServiceError;
use crate::mapper;
use crate::models::{Follow, UserResponse};

#[derive(Clone)]
pub struct FollowService {
    follows: Arc<dyn FollowStore>,
    users: Arc<dyn UserStore>,
}

impl FollowService {
    pub fn new(follows: Arc<dyn FollowStore>, users: Arc<dyn UserStore>) -> Self {
        Self { follows, users }
    }

    /// Following someone twice is a no-op.
    pub async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<(), ServiceError> {
        if follower_id == followee_id {
            return Err(ServiceError::validation("users cannot follow themselves"));
        }
        let edge = Follow {
            follower_id,
            followee_id,
        };
        match self.follows.insert_follow(edge).await {
            Ok(true) => info!("User {} now follows {}", follower_id, followee_id),
            Ok(false) => {}
            Err(StoreError::MissingReference { id, .. }) => {
                return Err(ServiceError::UserNotFound { id })
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    pub async fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<(), ServiceError> {
        let removed = self
            .follows
            .delete_follow(Follow {
                follower_id,
                followee_id,
            })
            .await?;
        if removed {
            info!("User {} unfollowed {}", follower_id, followee_id);
        }
        Ok(())
    }

    /// Users followed by `follower_id`, ordered by id. Edges pointing at
    /// deleted users are skipped.
    pub async fn get_followee_list(
        &self,
        follower_id: i64,
    ) -> Result<Vec<UserResponse>, ServiceError> {
        let mut ids = self.follows.followee_ids(follower_id).await?;
        ids.sort_unstable();
        let users = try_join_all(ids.into_iter().map(|id| self.users.find_user(id))).await?;
        Ok(users
            .into_iter()
            .flatten()
            .map(mapper::user_to_response)
            .collect())
    }
}
