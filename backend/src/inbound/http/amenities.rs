//! Amenity resources.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use super::ApiResult;
use super::entities;
use super::schemas::{AmenityInputSchema, AmenitySchema, ErrorSchema};
use super::state::HttpState;
use crate::domain::Amenity;

#[utoipa::path(
    get,
    path = "/api/v1/amenities",
    responses(
        (status = 200, description = "Amenities", body = [AmenitySchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "listAmenities"
)]
#[get("/amenities")]
pub async fn list_amenities(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Amenity>>> {
    entities::list(state.amenities.as_ref()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/amenities",
    request_body = AmenityInputSchema,
    responses(
        (status = 201, description = "Amenity created", body = AmenitySchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "createAmenity"
)]
#[post("/amenities")]
pub async fn create_amenity(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    entities::create(state.amenities.as_ref(), body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities/{id}",
    params(("id" = String, Path, description = "Amenity id")),
    responses(
        (status = 200, description = "Amenity", body = AmenitySchema),
        (status = 404, description = "Unknown amenity", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "getAmenity"
)]
#[get("/amenities/{id}")]
pub async fn get_amenity(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Amenity>> {
    entities::get(state.amenities.as_ref(), &id).await
}

#[utoipa::path(
    put,
    path = "/api/v1/amenities/{id}",
    params(("id" = String, Path, description = "Amenity id")),
    request_body = AmenityInputSchema,
    responses(
        (status = 200, description = "Updated amenity", body = AmenitySchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown amenity", body = ErrorSchema),
        (status = 409, description = "Name already in use", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "updateAmenity"
)]
#[put("/amenities/{id}")]
pub async fn update_amenity(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<Amenity>> {
    entities::update(state.amenities.as_ref(), &id, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{id}",
    params(("id" = String, Path, description = "Amenity id")),
    responses(
        (status = 204, description = "Amenity deleted"),
        (status = 404, description = "Unknown amenity", body = ErrorSchema)
    ),
    tags = ["amenities"],
    operation_id = "deleteAmenity"
)]
#[delete("/amenities/{id}")]
pub async fn delete_amenity(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    entities::delete(state.amenities.as_ref(), &id).await
}
