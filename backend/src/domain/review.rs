//! Guest reviews of places.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, Metadata, timestamp};
use super::error::Error;
use super::fields::{FieldError, FieldMap, Fields, present};
use super::validation::Rating;

/// A user's rating and feedback for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReviewRow", into = "ReviewRow")]
pub struct Review {
    meta: Metadata,
    commentor_user_id: EntityId,
    place_id: EntityId,
    rating: Rating,
    feedback: String,
}

impl Review {
    pub fn new(meta: Metadata, draft: ReviewDraft) -> Self {
        let ReviewDraft {
            commentor_user_id,
            place_id,
            rating,
            feedback,
        } = draft;
        Self {
            meta,
            commentor_user_id,
            place_id,
            rating,
            feedback,
        }
    }

    pub fn commentor_user_id(&self) -> &EntityId {
        &self.commentor_user_id
    }

    pub fn place_id(&self) -> &EntityId {
        &self.place_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn apply(&mut self, patch: ReviewPatch) {
        let ReviewPatch {
            commentor_user_id,
            place_id,
            rating,
            feedback,
        } = patch;
        if let Some(value) = commentor_user_id {
            self.commentor_user_id = value;
        }
        if let Some(value) = place_id {
            self.place_id = value;
        }
        if let Some(value) = rating {
            self.rating = value;
        }
        if let Some(value) = feedback {
            self.feedback = value;
        }
    }
}

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Review;

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }
}

/// Validated input for creating a review. References are not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub commentor_user_id: EntityId,
    pub place_id: EntityId,
    pub rating: Rating,
    pub feedback: String,
}

impl ReviewDraft {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        let fields = Fields::new(map);
        fields.require(&["commentor_user_id", "place_id", "rating", "feedback"])?;
        let patch = ReviewPatch::read(fields)?;
        Ok(Self {
            commentor_user_id: present("commentor_user_id", patch.commentor_user_id)?,
            place_id: present("place_id", patch.place_id)?,
            rating: present("rating", patch.rating)?,
            feedback: present("feedback", patch.feedback)?,
        })
    }
}

/// Validated partial update for a review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPatch {
    pub commentor_user_id: Option<EntityId>,
    pub place_id: Option<EntityId>,
    pub rating: Option<Rating>,
    pub feedback: Option<String>,
}

impl ReviewPatch {
    pub fn from_fields(map: &FieldMap) -> Result<Self, Error> {
        Ok(Self::read(Fields::new(map))?)
    }

    fn read(fields: Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            commentor_user_id: fields.reference("commentor_user_id", EntityKind::User)?,
            place_id: fields.reference("place_id", EntityKind::Place)?,
            rating: fields.integer_with("rating", Rating::new)?,
            feedback: fields.string("feedback")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReviewRow {
    id: EntityId,
    commentor_user_id: EntityId,
    place_id: EntityId,
    rating: i64,
    feedback: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewRow {
    fn from(value: Review) -> Self {
        Self {
            id: *value.meta.id(),
            created_at: value.meta.created_at(),
            updated_at: value.meta.updated_at(),
            commentor_user_id: value.commentor_user_id,
            place_id: value.place_id,
            rating: i64::from(value.rating.get()),
            feedback: value.feedback,
        }
    }
}

impl TryFrom<ReviewRow> for Review {
    type Error = FieldError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(row.rating)
            .map_err(|violation| FieldError::new("rating", violation, row.rating))?;
        Ok(Self {
            meta: Metadata::restore(row.id, row.created_at, row.updated_at),
            commentor_user_id: row.commentor_user_id,
            place_id: row.place_id,
            rating,
            feedback: row.feedback,
        })
    }
}
