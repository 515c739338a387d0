//! Place resources and the reviews nested under them.
//!
//! ```text
//! GET    /api/v1/places
//! POST   /api/v1/places
//! GET    /api/v1/places/{id}
//! PUT    /api/v1/places/{id}
//! DELETE /api/v1/places/{id}
//! GET    /api/v1/places/{id}/reviews
//! POST   /api/v1/places/{id}/reviews {"commentor_user_id":"…","rating":5,"feedback":"…"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use super::ApiResult;
use super::entities;
use super::payload::{into_fields, path_id};
use super::schemas::{ErrorSchema, PlaceInputSchema, PlaceSchema, ReviewInputSchema, ReviewSchema};
use super::state::HttpState;
use crate::domain::{Place, Review};

#[utoipa::path(
    get,
    path = "/api/v1/places",
    responses(
        (status = 200, description = "Places", body = [PlaceSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaces"
)]
#[get("/places")]
pub async fn list_places(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Place>>> {
    entities::list(state.places.as_ref()).await
}

/// List a place in an existing city for an existing host.
#[utoipa::path(
    post,
    path = "/api/v1/places",
    request_body = PlaceInputSchema,
    responses(
        (status = 201, description = "Place created", body = PlaceSchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "createPlace"
)]
#[post("/places")]
pub async fn create_place(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    entities::create(state.places.as_ref(), body.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place id")),
    responses(
        (status = 200, description = "Place", body = PlaceSchema),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlace"
)]
#[get("/places/{id}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Place>> {
    entities::get(state.places.as_ref(), &id).await
}

#[utoipa::path(
    put,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place id")),
    request_body = PlaceInputSchema,
    responses(
        (status = 200, description = "Updated place", body = PlaceSchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "updatePlace"
)]
#[put("/places/{id}")]
pub async fn update_place(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<Place>> {
    entities::update(state.places.as_ref(), &id, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place id")),
    responses(
        (status = 204, description = "Place deleted"),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "deletePlace"
)]
#[delete("/places/{id}")]
pub async fn delete_place(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    entities::delete(state.places.as_ref(), &id).await
}

/// Reviews of a place.
#[utoipa::path(
    get,
    path = "/api/v1/places/{id}/reviews",
    params(("id" = String, Path, description = "Place id")),
    responses(
        (status = 200, description = "Reviews of the place", body = [ReviewSchema]),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaceReviews"
)]
#[get("/places/{id}/reviews")]
pub async fn list_place_reviews(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Vec<Review>>> {
    let id = path_id::<Place>(&id)?;
    Ok(web::Json(state.query.reviews_by_place(&id).await?))
}

/// Review a place; `place_id` is taken from the path.
#[utoipa::path(
    post,
    path = "/api/v1/places/{id}/reviews",
    params(("id" = String, Path, description = "Place id")),
    request_body = ReviewInputSchema,
    responses(
        (status = 201, description = "Review created", body = ReviewSchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown place", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "createPlaceReview"
)]
#[post("/places/{id}/reviews")]
pub async fn create_place_review(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let id = path_id::<Place>(&id)?;
    state.places.get(&id).await?;
    let mut fields = into_fields(body.into_inner())?;
    fields.insert("place_id".to_owned(), Value::String(id.to_string()));
    let review = state.reviews.create(fields).await?;
    Ok(HttpResponse::Created().json(review))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entity, ErrorCode};
    use crate::inbound::http::test_utils::{memory_state, read_error, test_app};
    use crate::test_support::fields;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    async fn seed_place(state: &HttpState) -> (Place, String) {
        let country = state
            .countries
            .create(fields(json!({ "name": "Australia", "code": "AU" })))
            .await
            .expect("country");
        let city = state
            .cities
            .create(fields(json!({ "name": "Perth", "country_id": country.id().to_string() })))
            .await
            .expect("city");
        let host = state
            .users
            .create(fields(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "password": "secret1",
            })))
            .await
            .expect("user");
        let place = state
            .places
            .create(fields(json!({
                "name": "Harbour View",
                "description": "",
                "address": "1 Quay St",
                "latitude": -31.95,
                "longitude": 115.86,
                "number_of_rooms": 2,
                "bathrooms": 1,
                "price_per_night": 120.0,
                "max_guests": 4,
                "city_id": city.id().to_string(),
                "host_user_id": host.id().to_string(),
                "amenities": [],
            })))
            .await
            .expect("place");
        (place, host.id().to_string())
    }

    #[rstest]
    #[actix_web::test]
    async fn nested_review_takes_the_place_from_the_path() {
        let state = memory_state();
        let (place, host_id) = seed_place(&state).await;
        let app = actix_test::init_service(test_app(state)).await;
        let uri = format!("/api/v1/places/{}/reviews", place.id());

        let req = actix_test::TestRequest::post()
            .uri(&uri)
            .set_json(json!({
                "commentor_user_id": host_id,
                "rating": 5,
                "feedback": "Lovely",
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let review: Value = actix_test::read_body_json(res).await;
        assert_eq!(review["place_id"], json!(place.id().to_string()));

        let req = actix_test::TestRequest::get().uri(&uri).to_request();
        let listed: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, json!([review]));
    }

    #[rstest]
    #[case("/api/v1/places/not-a-uuid/reviews")]
    #[case("/api/v1/places/6f1c1a52-0b7e-4c1f-9d37-5b0f7b3a2c11/reviews")]
    #[actix_web::test]
    async fn reviews_of_unknown_places_are_not_found(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let req = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(json!({ "commentor_user_id": "x", "rating": 3, "feedback": "" }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let err = read_error(res).await;
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().starts_with("Place not found"));
    }
}
