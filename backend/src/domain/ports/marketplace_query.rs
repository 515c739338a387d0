//! Driving port for derived read views.
//!
//! Views are computed per call by scanning the stores; nothing is cached.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{City, Country, EntityId, Error, Review};

/// Amenity names offered by one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceAmenities {
    pub place_id: EntityId,
    pub place: String,
    pub amenities: Vec<String>,
}

/// One review rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub review: String,
    /// Score rendered as `"<n> / 5"`.
    pub rating: String,
    /// Reviewer's first and last name.
    pub reviewer: String,
}

/// Reviews of one place, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceReviewDigest {
    pub place_id: EntityId,
    pub place: String,
    pub reviews: Vec<ReviewLine>,
}

/// Read-only queries spanning several stores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketplaceQuery: Send + Sync {
    /// Country carrying `code`, or `not_found`.
    async fn country_by_code(&self, code: &str) -> Result<Country, Error>;

    /// Cities of the country carrying `code`; `not_found` if no such country.
    async fn cities_by_country_code(&self, code: &str) -> Result<Vec<City>, Error>;

    /// Reviews written by a user; `not_found` if the user is absent.
    async fn reviews_by_user(&self, user_id: &EntityId) -> Result<Vec<Review>, Error>;

    /// Reviews of a place; `not_found` if the place is absent.
    async fn reviews_by_place(&self, place_id: &EntityId) -> Result<Vec<Review>, Error>;

    /// Places joined to the names of their resolvable amenities.
    ///
    /// Unknown amenity ids are skipped and places left with none are omitted.
    async fn place_amenities(&self) -> Result<Vec<PlaceAmenities>, Error>;

    /// Places with at least one review, each review rendered for display.
    async fn place_review_digest(&self) -> Result<Vec<PlaceReviewDigest>, Error>;
}
