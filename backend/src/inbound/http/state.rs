//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable with doubles.

use std::sync::Arc;

use crate::domain::ports::{EntityService, MarketplaceQuery};
use crate::domain::{Amenity, City, Country, Marketplace, Place, Review, User};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub countries: Arc<dyn EntityService<Country>>,
    pub cities: Arc<dyn EntityService<City>>,
    pub users: Arc<dyn EntityService<User>>,
    pub amenities: Arc<dyn EntityService<Amenity>>,
    pub places: Arc<dyn EntityService<Place>>,
    pub reviews: Arc<dyn EntityService<Review>>,
    pub query: Arc<dyn MarketplaceQuery>,
}

impl From<Marketplace> for HttpState {
    fn from(marketplace: Marketplace) -> Self {
        Self {
            countries: marketplace.countries,
            cities: marketplace.cities,
            users: marketplace.users,
            amenities: marketplace.amenities,
            places: marketplace.places,
            reviews: marketplace.reviews,
            query: marketplace.query,
        }
    }
}
