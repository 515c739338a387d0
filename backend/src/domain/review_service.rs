//! Lifecycle rules for reviews.

use std::sync::Arc;

use async_trait::async_trait;

use super::entity::EntityId;
use super::error::Error;
use super::fields::FieldMap;
use super::integrity::require_reference;
use super::lifecycle::Lifecycle;
use super::place::Place;
use super::ports::{EntityService, Store};
use super::review::{Review, ReviewDraft, ReviewPatch};
use super::user::User;

/// Review create/update/delete. Author and place must both resolve.
pub struct ReviewService {
    reviews: Lifecycle<Review>,
    users: Arc<dyn Store<User>>,
    places: Arc<dyn Store<Place>>,
}

impl ReviewService {
    pub fn new(
        reviews: Lifecycle<Review>,
        users: Arc<dyn Store<User>>,
        places: Arc<dyn Store<Place>>,
    ) -> Self {
        Self {
            reviews,
            users,
            places,
        }
    }

    async fn check_references(
        &self,
        commentor_user_id: Option<&EntityId>,
        place_id: Option<&EntityId>,
    ) -> Result<(), Error> {
        if let Some(user_id) = commentor_user_id {
            require_reference(self.users.as_ref(), "commentor_user_id", user_id).await?;
        }
        if let Some(place_id) = place_id {
            require_reference(self.places.as_ref(), "place_id", place_id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EntityService<Review> for ReviewService {
    async fn create(&self, fields: FieldMap) -> Result<Review, Error> {
        let draft = ReviewDraft::from_fields(&fields)?;
        let guard = self.reviews.lock().await;
        self.check_references(Some(&draft.commentor_user_id), Some(&draft.place_id))
            .await?;
        self.reviews
            .insert(guard, |meta| Review::new(meta, draft))
            .await
    }

    async fn get(&self, id: &EntityId) -> Result<Review, Error> {
        self.reviews.get(id).await
    }

    async fn list(&self) -> Result<Vec<Review>, Error> {
        self.reviews.list().await
    }

    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<Review, Error> {
        let guard = self.reviews.lock().await;
        let mut review = self.reviews.get(id).await?;
        let patch = ReviewPatch::from_fields(&fields)?;
        self.check_references(patch.commentor_user_id.as_ref(), patch.place_id.as_ref())
            .await?;
        review.apply(patch);
        self.reviews.replace(&guard, review).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let guard = self.reviews.lock().await;
        self.reviews.remove(&guard, id).await
    }
}
