//! Shared helpers for HTTP integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use hbnb::Trace;
use hbnb::domain::Marketplace;
use hbnb::inbound::http::configure;
use hbnb::inbound::http::health::{HealthState, live, ready};
use hbnb::inbound::http::state::HttpState;
use hbnb::test_support::{MutableClock, fixture_clock, memory_marketplace};
use serde_json::{Value, json};

/// The API as the server mounts it, over the given services.
pub fn app_for(
    marketplace: Marketplace,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(health))
        .app_data(web::Data::new(HttpState::from(marketplace)))
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live)
}

/// Fresh in-memory services with a controllable clock.
pub fn memory_app_parts() -> (Arc<MutableClock>, Marketplace) {
    let clock = fixture_clock();
    let marketplace = memory_marketplace(clock.clone());
    (clock, marketplace)
}

pub fn ada() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "secret1",
    })
}

pub fn place_body(city_id: &Value, host_id: &Value) -> Value {
    json!({
        "name": "Harbour View",
        "description": "Two rooms over the water",
        "address": "1 Quay St",
        "latitude": -31.95,
        "longitude": 115.86,
        "number_of_rooms": 2,
        "bathrooms": 1,
        "price_per_night": 120.0,
        "max_guests": 4,
        "city_id": city_id,
        "host_user_id": host_id,
        "amenities": [],
    })
}

/// Status and decoded JSON body (`Null` when empty).
pub async fn send<S>(app: &S, req: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// POST `body`, asserting `201 Created`, and return the stored record.
pub async fn create<S>(app: &S, uri: &str, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, record) = send(app, actix_test::TestRequest::post().uri(uri).set_json(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create {uri}: {record}");
    record
}
