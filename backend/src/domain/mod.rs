//! Domain layer: marketplace records, their rules and the services that
//! enforce them.
//!
//! Purpose: keep validation, uniqueness, reference checks and timestamp
//! bookkeeping independent of transport and storage. Adapters reach the
//! domain through the traits in [`ports`].
//!
//! Public surface:
//! - Records: [`Country`], [`City`], [`User`], [`Amenity`], [`Place`],
//!   [`Review`], sharing [`Metadata`] and the [`Entity`] trait.
//! - Input handling: [`FieldMap`], [`Fields`], [`FieldError`] and the value
//!   types in [`validation`].
//! - Services: one per kind plus [`QueryService`], bundled in
//!   [`Marketplace`].
//! - Errors: [`Error`] and [`ErrorCode`].

pub mod amenity;
pub mod amenity_service;
pub mod city;
pub mod city_service;
pub mod country;
pub mod country_service;
pub mod entity;
pub mod error;
pub mod fields;
pub mod integrity;
pub mod lifecycle;
pub mod marketplace;
pub mod place;
pub mod place_service;
pub mod ports;
pub mod query_service;
pub mod review;
pub mod review_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::amenity::{Amenity, AmenityDraft, AmenityPatch};
pub use self::amenity_service::AmenityService;
pub use self::city::{City, CityDraft, CityPatch, CountryRef};
pub use self::city_service::CityService;
pub use self::country::{Country, CountryDraft, CountryPatch};
pub use self::country_service::CountryService;
pub use self::entity::{Entity, EntityId, EntityKind, Metadata};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{FieldError, FieldMap, Fields, RuleViolation};
pub use self::integrity::{exists_in, require_reference};
pub use self::lifecycle::{Lifecycle, WriteGuard};
pub use self::marketplace::{Marketplace, MarketplaceStores};
pub use self::place::{Place, PlaceDraft, PlacePatch};
pub use self::place_service::PlaceService;
pub use self::query_service::QueryService;
pub use self::review::{Review, ReviewDraft, ReviewPatch};
pub use self::review_service::ReviewService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserPatch};
pub use self::user_service::UserService;
pub use self::validation::{
    AlphaName, AmenityName, CountryCode, Email, Latitude, Longitude, NightlyPrice, Password,
    PersonName, PositiveCount, Rating,
};
