//! Read-only report views spanning several stores.

use actix_web::{get, web};

use super::ApiResult;
use super::schemas::{ErrorSchema, PlaceAmenitiesSchema, PlaceReviewDigestSchema};
use super::state::HttpState;
use crate::domain::ports::{PlaceAmenities, PlaceReviewDigest};

/// Places with the names of the amenities they offer.
#[utoipa::path(
    get,
    path = "/api/v1/reports/place-amenities",
    responses(
        (status = 200, description = "Amenity names per place", body = [PlaceAmenitiesSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "placeAmenities"
)]
#[get("/reports/place-amenities")]
pub async fn place_amenities(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PlaceAmenities>>> {
    Ok(web::Json(state.query.place_amenities().await?))
}

/// Reviewed places with each review rendered for display.
#[utoipa::path(
    get,
    path = "/api/v1/reports/place-reviews",
    responses(
        (status = 200, description = "Reviews per place", body = [PlaceReviewDigestSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "placeReviews"
)]
#[get("/reports/place-reviews")]
pub async fn place_reviews(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PlaceReviewDigest>>> {
    Ok(web::Json(state.query.place_review_digest().await?))
}
