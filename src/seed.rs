use fake::faker::internet::en::Username;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use log::info;

use crate::errors::ServiceError;
use crate::models::{ArticleRequest, UserRequest};
use crate::state::AppState;

const SEED_PASSWORD: &str = "password123";
const FOLLOWS_PER_USER: usize = 3;

/// Populates the store with fake users, their articles, and a follow ring
/// where each user follows the next few users.
pub async fn seed(
    state: &AppState,
    num_users: usize,
    articles_per_user: usize,
) -> Result<(), ServiceError> {
    info!("Seeding {} users...", num_users);
    let mut users = Vec::with_capacity(num_users);
    for i in 0..num_users {
        let name: String = Username().fake();
        let user = state
            .users
            .create_user(UserRequest {
                username: format!("{name}{i}"),
                password: Some(SEED_PASSWORD.to_owned()),
            })
            .await?;
        users.push(user.id);
    }

    info!("Creating {} articles per user...", articles_per_user);
    for &author_id in &users {
        for _ in 0..articles_per_user {
            let content: String = Sentence(3..10).fake();
            state
                .articles
                .create_article(ArticleRequest { author_id, content })
                .await?;
        }
    }

    for (i, &follower) in users.iter().enumerate() {
        for offset in 1..=FOLLOWS_PER_USER.min(users.len().saturating_sub(1)) {
            let followee = users[(i + offset) % users.len()];
            state.follows.follow(follower, followee).await?;
        }
    }

    info!("Seeding completed!");
    Ok(())
}
