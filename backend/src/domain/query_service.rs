//! Derived read views spanning several stores.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::amenity::Amenity;
use super::city::City;
use super::country::Country;
use super::entity::{Entity, EntityId};
use super::error::Error;
use super::lifecycle::{map_store_error, not_found};
use super::place::Place;
use super::ports::{MarketplaceQuery, PlaceAmenities, PlaceReviewDigest, ReviewLine, Store};
use super::review::Review;
use super::user::User;
use super::validation::Rating;

/// Read-only handles on every store.
#[derive(Clone)]
pub struct QueryService {
    countries: Arc<dyn Store<Country>>,
    cities: Arc<dyn Store<City>>,
    users: Arc<dyn Store<User>>,
    amenities: Arc<dyn Store<Amenity>>,
    places: Arc<dyn Store<Place>>,
    reviews: Arc<dyn Store<Review>>,
}

impl QueryService {
    pub fn new(stores: &super::marketplace::MarketplaceStores) -> Self {
        Self {
            countries: stores.countries.clone(),
            cities: stores.cities.clone(),
            users: stores.users.clone(),
            amenities: stores.amenities.clone(),
            places: stores.places.clone(),
            reviews: stores.reviews.clone(),
        }
    }
}

async fn all<R: Entity>(store: &dyn Store<R>) -> Result<Vec<R>, Error> {
    store.list().await.map_err(|err| map_store_error(R::KIND, err))
}

async fn one<R: Entity>(store: &dyn Store<R>, id: &EntityId) -> Result<R, Error> {
    store
        .get(id)
        .await
        .map_err(|err| map_store_error(R::KIND, err))?
        .ok_or_else(|| not_found::<R>(id))
}

fn index_by_id<R: Entity>(records: Vec<R>) -> HashMap<EntityId, R> {
    records
        .into_iter()
        .map(|record| (*record.id(), record))
        .collect()
}

fn render_rating(rating: Rating) -> String {
    format!("{} / {}", rating.get(), Rating::MAX)
}

#[async_trait]
impl MarketplaceQuery for QueryService {
    async fn country_by_code(&self, code: &str) -> Result<Country, Error> {
        all(self.countries.as_ref())
            .await?
            .into_iter()
            .find(|country| country.code().as_str() == code)
            .ok_or_else(|| Error::not_found(format!("Country not found for code {code}")))
    }

    async fn cities_by_country_code(&self, code: &str) -> Result<Vec<City>, Error> {
        let country = self.country_by_code(code).await?;
        let cities = all(self.cities.as_ref()).await?;
        Ok(cities
            .into_iter()
            .filter(|city| city.country_id() == country.id())
            .collect())
    }

    async fn reviews_by_user(&self, user_id: &EntityId) -> Result<Vec<Review>, Error> {
        one(self.users.as_ref(), user_id).await?;
        let reviews = all(self.reviews.as_ref()).await?;
        Ok(reviews
            .into_iter()
            .filter(|review| review.commentor_user_id() == user_id)
            .collect())
    }

    async fn reviews_by_place(&self, place_id: &EntityId) -> Result<Vec<Review>, Error> {
        one(self.places.as_ref(), place_id).await?;
        let reviews = all(self.reviews.as_ref()).await?;
        Ok(reviews
            .into_iter()
            .filter(|review| review.place_id() == place_id)
            .collect())
    }

    async fn place_amenities(&self) -> Result<Vec<PlaceAmenities>, Error> {
        let amenities = index_by_id(all(self.amenities.as_ref()).await?);
        let places = all(self.places.as_ref()).await?;
        Ok(places
            .into_iter()
            .filter_map(|place| {
                let names: Vec<String> = place
                    .amenities()
                    .iter()
                    .filter_map(|raw| raw.parse::<EntityId>().ok())
                    .filter_map(|id| amenities.get(&id))
                    .map(|amenity| amenity.name().to_string())
                    .collect();
                (!names.is_empty()).then(|| PlaceAmenities {
                    place_id: *place.id(),
                    place: place.name().to_string(),
                    amenities: names,
                })
            })
            .collect())
    }

    async fn place_review_digest(&self) -> Result<Vec<PlaceReviewDigest>, Error> {
        let users = index_by_id(all(self.users.as_ref()).await?);
        let reviews = all(self.reviews.as_ref()).await?;
        let places = all(self.places.as_ref()).await?;

        let mut lines: HashMap<EntityId, Vec<ReviewLine>> = HashMap::new();
        for review in reviews {
            let Some(reviewer) = users.get(review.commentor_user_id()) else {
                continue;
            };
            lines
                .entry(*review.place_id())
                .or_default()
                .push(ReviewLine {
                    review: review.feedback().to_owned(),
                    rating: render_rating(review.rating()),
                    reviewer: reviewer.full_name(),
                });
        }

        Ok(places
            .into_iter()
            .filter_map(|place| {
                lines.remove(place.id()).map(|reviews| PlaceReviewDigest {
                    place_id: *place.id(),
                    place: place.name().to_string(),
                    reviews,
                })
            })
            .collect())
    }
}
