//! City resources.
//!
//! ```text
//! GET    /api/v1/cities
//! POST   /api/v1/cities {"name":"Perth","country_code":"AU"}
//! GET    /api/v1/cities/{id}
//! PUT    /api/v1/cities/{id} {"name":"Fremantle"}
//! DELETE /api/v1/cities/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use super::ApiResult;
use super::entities;
use super::schemas::{CityInputSchema, CitySchema, ErrorSchema};
use super::state::HttpState;
use crate::domain::City;

#[utoipa::path(
    get,
    path = "/api/v1/cities",
    responses(
        (status = 200, description = "Cities", body = [CitySchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<City>>> {
    entities::list(state.cities.as_ref()).await
}

/// Create a city in an existing country.
#[utoipa::path(
    post,
    path = "/api/v1/cities",
    request_body = CityInputSchema,
    responses(
        (status = 201, description = "City created", body = CitySchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Name already used in that country", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "createCity"
)]
#[post("/cities")]
pub async fn create_city(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    entities::create(state.cities.as_ref(), body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}",
    params(("id" = String, Path, description = "City id")),
    responses(
        (status = 200, description = "City", body = CitySchema),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{id}")]
pub async fn get_city(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<City>> {
    entities::get(state.cities.as_ref(), &id).await
}

#[utoipa::path(
    put,
    path = "/api/v1/cities/{id}",
    params(("id" = String, Path, description = "City id")),
    request_body = CityInputSchema,
    responses(
        (status = 200, description = "Updated city", body = CitySchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown city", body = ErrorSchema),
        (status = 409, description = "Name already used in that country", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "updateCity"
)]
#[put("/cities/{id}")]
pub async fn update_city(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<City>> {
    entities::update(state.cities.as_ref(), &id, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/cities/{id}",
    params(("id" = String, Path, description = "City id")),
    responses(
        (status = 204, description = "City deleted"),
        (status = 404, description = "Unknown city", body = ErrorSchema)
    ),
    tags = ["cities"],
    operation_id = "deleteCity"
)]
#[delete("/cities/{id}")]
pub async fn delete_city(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    entities::delete(state.cities.as_ref(), &id).await
}
