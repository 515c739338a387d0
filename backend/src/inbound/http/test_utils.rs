//! Test helpers for inbound HTTP components.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};

use super::configure;
use super::state::HttpState;
use crate::Trace;
use crate::domain::Error;
use crate::test_support::{fixture_clock, memory_marketplace};

/// Handler state over fresh in-memory stores.
pub fn memory_state() -> HttpState {
    HttpState::from(memory_marketplace(fixture_clock()))
}

/// The full API wrapped in the trace middleware, as the server mounts it.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}

/// Decode an error response body.
pub async fn read_error<B: MessageBody>(res: ServiceResponse<B>) -> Error {
    actix_test::read_body_json(res).await
}
