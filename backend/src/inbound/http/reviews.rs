//! Review resources.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use super::ApiResult;
use super::entities;
use super::schemas::{ErrorSchema, ReviewInputSchema, ReviewSchema};
use super::state::HttpState;
use crate::domain::Review;

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    responses(
        (status = 200, description = "Reviews", body = [ReviewSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Review>>> {
    entities::list(state.reviews.as_ref()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = ReviewInputSchema,
    responses(
        (status = 201, description = "Review created", body = ReviewSchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    entities::create(state.reviews.as_ref(), body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review", body = ReviewSchema),
        (status = 404, description = "Unknown review", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getReview"
)]
#[get("/reviews/{id}")]
pub async fn get_review(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Review>> {
    entities::get(state.reviews.as_ref(), &id).await
}

#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review id")),
    request_body = ReviewInputSchema,
    responses(
        (status = 200, description = "Updated review", body = ReviewSchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown review", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "updateReview"
)]
#[put("/reviews/{id}")]
pub async fn update_review(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<Review>> {
    entities::update(state.reviews.as_ref(), &id, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Unknown review", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    entities::delete(state.reviews.as_ref(), &id).await
}
