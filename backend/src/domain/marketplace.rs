//! Application context wiring stores into services.
//!
//! Stores are passed in explicitly so each test or server instance owns an
//! isolated set.

use std::sync::Arc;

use mockable::Clock;

use super::amenity::Amenity;
use super::amenity_service::AmenityService;
use super::city::City;
use super::city_service::CityService;
use super::country::Country;
use super::country_service::CountryService;
use super::lifecycle::Lifecycle;
use super::place::Place;
use super::place_service::PlaceService;
use super::ports::{CreateObserver, Store};
use super::query_service::QueryService;
use super::review::Review;
use super::review_service::ReviewService;
use super::user::User;
use super::user_service::UserService;

/// One store per entity kind.
#[derive(Clone)]
pub struct MarketplaceStores {
    pub countries: Arc<dyn Store<Country>>,
    pub cities: Arc<dyn Store<City>>,
    pub users: Arc<dyn Store<User>>,
    pub amenities: Arc<dyn Store<Amenity>>,
    pub places: Arc<dyn Store<Place>>,
    pub reviews: Arc<dyn Store<Review>>,
}

/// Every service of the marketplace, sharing one set of stores.
#[derive(Clone)]
pub struct Marketplace {
    pub countries: Arc<CountryService>,
    pub cities: Arc<CityService>,
    pub users: Arc<UserService>,
    pub amenities: Arc<AmenityService>,
    pub places: Arc<PlaceService>,
    pub reviews: Arc<ReviewService>,
    pub query: Arc<QueryService>,
}

impl Marketplace {
    /// Build the services over `stores`.
    ///
    /// `observer` is notified after every successful create.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use hbnb::domain::Marketplace;
    /// use hbnb::domain::ports::NoOpCreateObserver;
    /// use hbnb::outbound::memory::in_memory_stores;
    ///
    /// let marketplace = Marketplace::new(
    ///     in_memory_stores(),
    ///     Arc::new(mockable::DefaultClock),
    ///     Arc::new(NoOpCreateObserver),
    /// );
    /// # let _ = marketplace;
    /// ```
    pub fn new(
        stores: MarketplaceStores,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn CreateObserver>,
    ) -> Self {
        let query = QueryService::new(&stores);
        let MarketplaceStores {
            countries,
            cities,
            users,
            amenities,
            places,
            reviews,
        } = stores;

        Self {
            countries: Arc::new(CountryService::new(Lifecycle::new(
                countries.clone(),
                clock.clone(),
                observer.clone(),
            ))),
            cities: Arc::new(CityService::new(
                Lifecycle::new(cities.clone(), clock.clone(), observer.clone()),
                countries,
            )),
            users: Arc::new(UserService::new(Lifecycle::new(
                users.clone(),
                clock.clone(),
                observer.clone(),
            ))),
            amenities: Arc::new(AmenityService::new(Lifecycle::new(
                amenities,
                clock.clone(),
                observer.clone(),
            ))),
            places: Arc::new(PlaceService::new(
                Lifecycle::new(places.clone(), clock.clone(), observer.clone()),
                cities,
                users.clone(),
            )),
            reviews: Arc::new(ReviewService::new(
                Lifecycle::new(reviews, clock, observer),
                users,
                places,
            )),
            query: Arc::new(query),
        }
    }
}
