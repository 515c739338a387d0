//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the serialised shape of each record and request body
//! and live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The body is not a JSON object or is not valid JSON.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A required field is absent.
    #[schema(rename = "missing_field")]
    MissingField,
    /// A field value breaks a rule or references an unknown record.
    #[schema(rename = "invalid_field")]
    InvalidField,
    /// The addressed record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness rule would be broken.
    #[schema(rename = "conflict")]
    Conflict,
    /// A store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error payload.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_field")]
    code: ErrorCodeSchema,
    #[schema(example = "Invalid rating specified: 6 (must be between 1 and 5)")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// `{"field", "code", "value"}` for field errors.
    details: Option<serde_json::Value>,
}

/// A country.
#[derive(ToSchema)]
#[schema(as = Country)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CountrySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Australia")]
    name: String,
    #[schema(example = "AU")]
    code: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// A city within a country.
#[derive(ToSchema)]
#[schema(as = City)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CitySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Perth")]
    name: String,
    #[schema(value_type = String, format = Uuid)]
    country_id: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// A registered user.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    password: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// An amenity a place may offer.
#[derive(ToSchema)]
#[schema(as = Amenity)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AmenitySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "WiFi")]
    name: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// A listed place.
#[derive(ToSchema)]
#[schema(as = Place)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlaceSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Harbour View")]
    name: String,
    description: String,
    address: String,
    /// Degrees, within [-90, 90].
    latitude: f64,
    /// Degrees, within [-180, 180].
    longitude: f64,
    #[schema(minimum = 1)]
    number_of_rooms: u32,
    #[schema(minimum = 1)]
    bathrooms: u32,
    #[schema(minimum = 0)]
    price_per_night: f64,
    #[schema(minimum = 1)]
    max_guests: u32,
    #[schema(value_type = String, format = Uuid)]
    city_id: String,
    #[schema(value_type = String, format = Uuid)]
    host_user_id: String,
    /// Amenity ids, stored as given.
    amenities: Vec<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// A user's review of a place.
#[derive(ToSchema)]
#[schema(as = Review)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    commentor_user_id: String,
    #[schema(value_type = String, format = Uuid)]
    place_id: String,
    #[schema(minimum = 1, maximum = 5)]
    rating: u8,
    feedback: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// Fields accepted when creating or updating a country.
///
/// All fields are required on create and optional on update.
#[derive(ToSchema)]
#[schema(as = CountryInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CountryInputSchema {
    name: Option<String>,
    #[schema(pattern = "^[A-Z][A-Z]$")]
    code: Option<String>,
}

/// Fields accepted when creating or updating a city.
///
/// `country_code` may stand in for `country_id`.
#[derive(ToSchema)]
#[schema(as = CityInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CityInputSchema {
    name: Option<String>,
    #[schema(value_type = Option<String>, format = Uuid)]
    country_id: Option<String>,
    country_code: Option<String>,
}

/// Fields accepted when creating or updating a user.
#[derive(ToSchema)]
#[schema(as = UserInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserInputSchema {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    #[schema(min_length = 6)]
    password: Option<String>,
}

/// Fields accepted when creating or updating an amenity.
#[derive(ToSchema)]
#[schema(as = AmenityInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AmenityInputSchema {
    name: Option<String>,
}

/// Fields accepted when creating or updating a place.
///
/// `host_id` is accepted in place of `host_user_id`.
#[derive(ToSchema)]
#[schema(as = PlaceInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlaceInputSchema {
    name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    number_of_rooms: Option<u32>,
    bathrooms: Option<u32>,
    price_per_night: Option<f64>,
    max_guests: Option<u32>,
    #[schema(value_type = Option<String>, format = Uuid)]
    city_id: Option<String>,
    #[schema(value_type = Option<String>, format = Uuid)]
    host_user_id: Option<String>,
    #[schema(value_type = Option<String>, format = Uuid)]
    host_id: Option<String>,
    amenities: Option<Vec<String>>,
}

/// Fields accepted when creating or updating a review.
#[derive(ToSchema)]
#[schema(as = ReviewInput)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewInputSchema {
    #[schema(value_type = Option<String>, format = Uuid)]
    commentor_user_id: Option<String>,
    #[schema(value_type = Option<String>, format = Uuid)]
    place_id: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    rating: Option<u8>,
    feedback: Option<String>,
}

/// Amenity names offered by one place.
#[derive(ToSchema)]
#[schema(as = PlaceAmenities)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlaceAmenitiesSchema {
    #[schema(value_type = String, format = Uuid)]
    place_id: String,
    place: String,
    amenities: Vec<String>,
}

/// One review rendered for display.
#[derive(ToSchema)]
#[schema(as = ReviewLine)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewLineSchema {
    review: String,
    #[schema(example = "4 / 5")]
    rating: String,
    #[schema(example = "Ada Lovelace")]
    reviewer: String,
}

/// Reviews of one place, ready for display.
#[derive(ToSchema)]
#[schema(as = PlaceReviewDigest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlaceReviewDigestSchema {
    #[schema(value_type = String, format = Uuid)]
    place_id: String,
    place: String,
    reviews: Vec<ReviewLineSchema>,
}
