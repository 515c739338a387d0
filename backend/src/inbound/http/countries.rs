//! Country resources.
//!
//! ```text
//! GET    /api/v1/countries
//! POST   /api/v1/countries {"name":"Australia","code":"AU"}
//! GET    /api/v1/countries/{key}
//! PUT    /api/v1/countries/{key} {"name":"Commonwealth of Australia"}
//! DELETE /api/v1/countries/{key}
//! GET    /api/v1/countries/{code}/cities
//! ```
//!
//! `{key}` is either the country id or its two-letter code.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use super::ApiResult;
use super::entities;
use super::schemas::{CitySchema, CountryInputSchema, CountrySchema, ErrorSchema};
use super::state::HttpState;
use crate::domain::{City, Country, Entity, EntityId};

async fn resolve_key(state: &HttpState, key: &str) -> ApiResult<EntityId> {
    if let Ok(id) = key.parse::<EntityId>() {
        return Ok(id);
    }
    let country = state.query.country_by_code(key).await?;
    Ok(*country.id())
}

/// List every country.
#[utoipa::path(
    get,
    path = "/api/v1/countries",
    responses(
        (status = 200, description = "Countries", body = [CountrySchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["countries"],
    operation_id = "listCountries"
)]
#[get("/countries")]
pub async fn list_countries(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Country>>> {
    entities::list(state.countries.as_ref()).await
}

/// Create a country.
#[utoipa::path(
    post,
    path = "/api/v1/countries",
    request_body = CountryInputSchema,
    responses(
        (status = 201, description = "Country created", body = CountrySchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Code already in use", body = ErrorSchema)
    ),
    tags = ["countries"],
    operation_id = "createCountry"
)]
#[post("/countries")]
pub async fn create_country(
    state: web::Data<HttpState>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    entities::create(state.countries.as_ref(), body.into_inner()).await
}

/// Fetch a country by id or code.
#[utoipa::path(
    get,
    path = "/api/v1/countries/{key}",
    params(("key" = String, Path, description = "Country id or two-letter code")),
    responses(
        (status = 200, description = "Country", body = CountrySchema),
        (status = 404, description = "Unknown country", body = ErrorSchema)
    ),
    tags = ["countries"],
    operation_id = "getCountry"
)]
#[get("/countries/{key}")]
pub async fn get_country(
    state: web::Data<HttpState>,
    key: web::Path<String>,
) -> ApiResult<web::Json<Country>> {
    let id = resolve_key(&state, &key).await?;
    Ok(web::Json(state.countries.get(&id).await?))
}

/// Update the fields present in the body.
#[utoipa::path(
    put,
    path = "/api/v1/countries/{key}",
    params(("key" = String, Path, description = "Country id or two-letter code")),
    request_body = CountryInputSchema,
    responses(
        (status = 200, description = "Updated country", body = CountrySchema),
        (status = 400, description = "Invalid field", body = ErrorSchema),
        (status = 404, description = "Unknown country", body = ErrorSchema),
        (status = 409, description = "Code already in use", body = ErrorSchema)
    ),
    tags = ["countries"],
    operation_id = "updateCountry"
)]
#[put("/countries/{key}")]
pub async fn update_country(
    state: web::Data<HttpState>,
    key: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<Country>> {
    let id = resolve_key(&state, &key).await?;
    entities::update_by_id(state.countries.as_ref(), &id, body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/countries/{key}",
    params(("key" = String, Path, description = "Country id or two-letter code")),
    responses(
        (status = 204, description = "Country deleted"),
        (status = 404, description = "Unknown country", body = ErrorSchema)
    ),
    tags = ["countries"],
    operation_id = "deleteCountry"
)]
#[delete("/countries/{key}")]
pub async fn delete_country(
    state: web::Data<HttpState>,
    key: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = resolve_key(&state, &key).await?;
    entities::delete_by_id(state.countries.as_ref(), &id).await
}

/// Cities of the country carrying `code`.
#[utoipa::path(
    get,
    path = "/api/v1/countries/{code}/cities",
    params(("code" = String, Path, description = "Two-letter country code")),
    responses(
        (status = 200, description = "Cities of the country", body = [CitySchema]),
        (status = 404, description = "Unknown country code", body = ErrorSchema)
    ),
    tags = ["countries"],
    operation_id = "listCountryCities"
)]
#[get("/countries/{code}/cities")]
pub async fn list_country_cities(
    state: web::Data<HttpState>,
    code: web::Path<String>,
) -> ApiResult<web::Json<Vec<City>>> {
    Ok(web::Json(state.query.cities_by_country_code(&code).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockMarketplaceQuery;
    use crate::domain::{Error, ErrorCode};
    use crate::inbound::http::test_utils::{memory_state, read_error, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    #[rstest]
    #[actix_web::test]
    async fn countries_are_addressable_by_code() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let created = actix_test::TestRequest::post()
            .uri("/api/v1/countries")
            .set_json(json!({ "name": "Australia", "code": "AU" }))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, created).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/countries/AU")
            .to_request();
        let fetched: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched["id"], created["id"]);
        assert_eq!(fetched["code"], "AU");
    }

    #[rstest]
    #[actix_web::test]
    async fn countries_update_and_delete_by_code() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let created = actix_test::TestRequest::post()
            .uri("/api/v1/countries")
            .set_json(json!({ "name": "Australia", "code": "AU" }))
            .to_request();
        let created: Value = actix_test::call_and_read_body_json(&app, created).await;

        let req = actix_test::TestRequest::put()
            .uri("/api/v1/countries/AU")
            .set_json(json!({ "name": "Commonwealth of Australia" }))
            .to_request();
        let updated: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "Commonwealth of Australia");

        let req = actix_test::TestRequest::delete()
            .uri("/api/v1/countries/AU")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/countries/{}", created["id"].as_str().expect("id")))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_codes_are_not_found() {
        let mut query = MockMarketplaceQuery::new();
        query
            .expect_cities_by_country_code()
            .times(1)
            .returning(|code| Err(Error::not_found(format!("Country not found for code {code}"))));
        let mut state = memory_state();
        state.query = Arc::new(query);
        let app = actix_test::init_service(test_app(state)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/countries/ZZ/cities")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let err = read_error(res).await;
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
