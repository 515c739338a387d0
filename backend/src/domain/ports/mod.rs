//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod create_observer;
mod entity_service;
mod marketplace_query;
mod store;

#[cfg(test)]
pub use create_observer::MockCreateObserver;
pub use create_observer::{CreateObserver, CreateObserverError, NoOpCreateObserver};
pub use entity_service::EntityService;
#[cfg(test)]
pub use marketplace_query::MockMarketplaceQuery;
pub use marketplace_query::{MarketplaceQuery, PlaceAmenities, PlaceReviewDigest, ReviewLine};
pub use store::{Store, StoreError};
