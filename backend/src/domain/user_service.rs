//! Lifecycle rules for users.

use async_trait::async_trait;

use super::entity::EntityId;
use super::error::Error;
use super::fields::FieldMap;
use super::lifecycle::Lifecycle;
use super::ports::EntityService;
use super::user::{User, UserDraft, UserPatch};

/// User create/update/delete. Emails are not required to be unique.
pub struct UserService {
    users: Lifecycle<User>,
}

impl UserService {
    pub fn new(users: Lifecycle<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl EntityService<User> for UserService {
    async fn create(&self, fields: FieldMap) -> Result<User, Error> {
        let draft = UserDraft::from_fields(&fields)?;
        let guard = self.users.lock().await;
        self.users.insert(guard, |meta| User::new(meta, draft)).await
    }

    async fn get(&self, id: &EntityId) -> Result<User, Error> {
        self.users.get(id).await
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.list().await
    }

    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<User, Error> {
        let guard = self.users.lock().await;
        let mut user = self.users.get(id).await?;
        user.apply(UserPatch::from_fields(&fields)?);
        self.users.replace(&guard, user).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let guard = self.users.lock().await;
        self.users.remove(&guard, id).await
    }
}
