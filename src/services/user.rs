use log::{debug, info, warn};
use std::sync::Arc;

use crate::db::{StoreError, UserStore};
use crate::errors::ServiceError;
use crate::mapper;
use crate::models::{User, UserRequest, UserResponse};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn get_users(&self) -> Result<Vec<UserResponse>, ServiceError> {
        let users = self.users.list_users().await?;
        Ok(users.into_iter().map(mapper::user_to_response).collect())
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<UserResponse, ServiceError> {
        self.find_user(id).await.map(mapper::user_to_response)
    }

    pub async fn create_user(&self, request: UserRequest) -> Result<UserResponse, ServiceError> {
        let username = validate_username(&request.username)?;
        let password = request
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ServiceError::validation("password must not be empty"))?;

        if self.users.find_user_by_username(&username).await?.is_some() {
            return Err(ServiceError::UsernameTaken { username });
        }
        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let user = self
            .users
            .insert_user(mapper::user_to_entity(username.clone(), password_hash))
            .await
            .map_err(|e| taken_or(e, &username))?;

        info!("User {} created: {}", user.id, user.username);
        Ok(mapper::user_to_response(user))
    }

    /// Renames the user and, when a non-empty password is supplied, re-hashes it.
    pub async fn update_user(
        &self,
        id: i64,
        request: UserRequest,
    ) -> Result<UserResponse, ServiceError> {
        let username = validate_username(&request.username)?;
        let mut user = self.find_user(id).await?;

        if let Some(password) = request.password.filter(|p| !p.is_empty()) {
            user.password_hash = hash_password(password, self.bcrypt_cost).await?;
        }
        user.username = username;

        let updated = self
            .users
            .update_user(&user)
            .await
            .map_err(|e| taken_or(e, &user.username))?;
        if !updated {
            return Err(ServiceError::UserNotFound { id });
        }

        info!("User {} updated", id);
        Ok(mapper::user_to_response(user))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        if !self.users.delete_user(id).await? {
            return Err(ServiceError::UserNotFound { id });
        }
        info!("User {} deleted", id);
        Ok(())
    }

    /// Checks a username/password pair against the stored hash.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        let Some(user) = self.users.find_user_by_username(username).await? else {
            debug!("Login attempt for unknown user {}", username);
            return Err(ServiceError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        let password = password.to_owned();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServiceError::Internal(format!("password check panicked: {e}")))?
            .map_err(|e| ServiceError::Internal(format!("password check failed: {e}")))?;

        if !valid {
            warn!("Invalid password for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<User, ServiceError> {
        self.users
            .find_user(id)
            .await?
            .ok_or(ServiceError::UserNotFound { id })
    }
}

fn validate_username(username: &str) -> Result<String, ServiceError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ServiceError::validation("username must not be empty"));
    }
    Ok(username.to_owned())
}

fn taken_or(err: StoreError, username: &str) -> ServiceError {
    match err {
        StoreError::UniqueViolation { .. } => ServiceError::UsernameTaken {
            username: username.to_owned(),
        },
        other => other.into(),
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, ServiceError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ServiceError::Internal(format!("password hashing panicked: {e}")))?
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()), 4)
    }

    fn request(username: &str, password: Option<&str>) -> UserRequest {
        UserRequest {
            username: username.into(),
            password: password.map(str::to_owned),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_fetch(service: UserService) {
        let created = service
            .create_user(request("Test User", Some("password")))
            .await
            .unwrap();
        assert_eq!(
            created,
            UserResponse {
                id: 1,
                username: "Test User".into()
            }
        );
        assert_eq!(service.get_user_by_id(1).await.unwrap(), created);
        assert_eq!(service.get_users().await.unwrap(), vec![created]);
    }

    #[rstest]
    #[tokio::test]
    async fn stores_a_hash_not_the_password(service: UserService) {
        service
            .create_user(request("kim", Some("password")))
            .await
            .unwrap();
        let user = service.authenticate("kim", "password").await.unwrap();
        assert_ne!(user.password_hash, "password");
        assert!(matches!(
            service.authenticate("kim", "wrong").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("nobody", "password").await,
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[rstest]
    #[case(request("", Some("password")))]
    #[case(request("  ", Some("password")))]
    #[case(request("kim", None))]
    #[case(request("kim", Some("")))]
    #[tokio::test]
    async fn create_rejects_invalid_requests(service: UserService, #[case] req: UserRequest) {
        assert!(matches!(
            service.create_user(req).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn usernames_are_unique(service: UserService) {
        service.create_user(request("kim", Some("pw"))).await.unwrap();
        let other = service.create_user(request("lee", Some("pw"))).await.unwrap();

        assert!(matches!(
            service.create_user(request("kim", Some("pw"))).await,
            Err(ServiceError::UsernameTaken { .. })
        ));
        assert!(matches!(
            service.update_user(other.id, request("kim", None)).await,
            Err(ServiceError::UsernameTaken { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn update_renames_and_rehashes(service: UserService) {
        let created = service.create_user(request("kim", Some("old"))).await.unwrap();

        let updated = service
            .update_user(created.id, request("park", Some("new")))
            .await
            .unwrap();
        assert_eq!(updated.username, "park");
        assert!(service.authenticate("park", "new").await.is_ok());

        let renamed = service
            .update_user(created.id, request("choi", None))
            .await
            .unwrap();
        assert_eq!(renamed.username, "choi");
        assert!(service.authenticate("choi", "new").await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_users_are_reported(service: UserService) {
        assert!(matches!(
            service.get_user_by_id(999).await,
            Err(ServiceError::UserNotFound { id: 999 })
        ));
        assert!(matches!(
            service.update_user(999, request("x", None)).await,
            Err(ServiceError::UserNotFound { id: 999 })
        ));
        assert!(matches!(
            service.delete_user(999).await,
            Err(ServiceError::UserNotFound { id: 999 })
        ));
    }
}
