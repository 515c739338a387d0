//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every resource lives under `/api/v1`; [`configure`] registers the whole
//! surface on an actix `ServiceConfig`.

pub mod amenities;
pub mod cities;
pub mod countries;
pub(crate) mod entities;
pub mod error;
pub mod health;
pub mod payload;
pub mod places;
pub mod reports;
pub mod reviews;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/api/v1` scope with its JSON body rules.
///
/// Callers provide [`state::HttpState`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(payload::json_config())
            .service(countries::list_countries)
            .service(countries::create_country)
            .service(countries::list_country_cities)
            .service(countries::get_country)
            .service(countries::update_country)
            .service(countries::delete_country)
            .service(cities::list_cities)
            .service(cities::create_city)
            .service(cities::get_city)
            .service(cities::update_city)
            .service(cities::delete_city)
            .service(users::list_users)
            .service(users::create_user)
            .service(users::list_user_reviews)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user)
            .service(amenities::list_amenities)
            .service(amenities::create_amenity)
            .service(amenities::get_amenity)
            .service(amenities::update_amenity)
            .service(amenities::delete_amenity)
            .service(places::list_places)
            .service(places::create_place)
            .service(places::list_place_reviews)
            .service(places::create_place_review)
            .service(places::get_place)
            .service(places::update_place)
            .service(places::delete_place)
            .service(reviews::list_reviews)
            .service(reviews::create_review)
            .service(reviews::get_review)
            .service(reviews::update_review)
            .service(reviews::delete_review)
            .service(reports::place_amenities)
            .service(reports::place_reviews),
    );
}
