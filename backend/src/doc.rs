//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`], keeping
//! domain types free of utoipa derives.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    AmenityInputSchema, AmenitySchema, CityInputSchema, CitySchema, CountryInputSchema,
    CountrySchema, ErrorCodeSchema, ErrorSchema, PlaceAmenitiesSchema, PlaceInputSchema,
    PlaceReviewDigestSchema, PlaceSchema, ReviewInputSchema, ReviewLineSchema, ReviewSchema,
    UserInputSchema, UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HBnB marketplace API",
        description = "Countries, cities, users, amenities, places and reviews of a short-term rental marketplace.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::countries::list_countries,
        crate::inbound::http::countries::create_country,
        crate::inbound::http::countries::get_country,
        crate::inbound::http::countries::update_country,
        crate::inbound::http::countries::delete_country,
        crate::inbound::http::countries::list_country_cities,
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::create_city,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::cities::update_city,
        crate::inbound::http::cities::delete_city,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_user_reviews,
        crate::inbound::http::amenities::list_amenities,
        crate::inbound::http::amenities::create_amenity,
        crate::inbound::http::amenities::get_amenity,
        crate::inbound::http::amenities::update_amenity,
        crate::inbound::http::amenities::delete_amenity,
        crate::inbound::http::places::list_places,
        crate::inbound::http::places::create_place,
        crate::inbound::http::places::get_place,
        crate::inbound::http::places::update_place,
        crate::inbound::http::places::delete_place,
        crate::inbound::http::places::list_place_reviews,
        crate::inbound::http::places::create_place_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::get_review,
        crate::inbound::http::reviews::update_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::reports::place_amenities,
        crate::inbound::http::reports::place_reviews,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CountrySchema,
        CountryInputSchema,
        CitySchema,
        CityInputSchema,
        UserSchema,
        UserInputSchema,
        AmenitySchema,
        AmenityInputSchema,
        PlaceSchema,
        PlaceInputSchema,
        ReviewSchema,
        ReviewInputSchema,
        PlaceAmenitiesSchema,
        ReviewLineSchema,
        PlaceReviewDigestSchema,
    )),
    tags(
        (name = "countries", description = "Countries, addressable by id or ISO code"),
        (name = "cities", description = "Cities within countries"),
        (name = "users", description = "Registered users"),
        (name = "amenities", description = "Amenities places may offer"),
        (name = "places", description = "Listed places and their reviews"),
        (name = "reviews", description = "Reviews of places"),
        (name = "reports", description = "Read-only views spanning several resources"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    #[case("User", "password")]
    #[case("Place", "host_user_id")]
    #[case("Review", "commentor_user_id")]
    #[case("PlaceReviewDigest", "reviews")]
    fn registered_schemas_expose_their_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema registered"));

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/countries/{key}")]
    #[case("/api/v1/countries/{code}/cities")]
    #[case("/api/v1/places/{id}/reviews")]
    #[case("/api/v1/users/{id}/reviews")]
    #[case("/api/v1/reports/place-reviews")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
