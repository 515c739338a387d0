//! Request decoding shared by the entity handlers.
//!
//! Bodies arrive as arbitrary JSON and are narrowed to a [`FieldMap`] here;
//! field-level rules stay in the domain. Path identifiers that are not UUIDs
//! can never match a record, so they resolve to `not_found`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::Value;
use tracing::debug;

use crate::domain::lifecycle::not_found;
use crate::domain::{Entity, EntityId, Error, FieldMap};

/// JSON extractor settings mapping decode failures to `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "Request body must be sent as application/json".to_owned(),
        other => format!("Malformed JSON body: {other}"),
    };
    Error::invalid_request(message).into()
}

/// Narrow a decoded body to a field map.
///
/// # Examples
/// ```
/// use hbnb::inbound::http::payload::into_fields;
/// use serde_json::json;
///
/// assert!(into_fields(json!({ "name": "WiFi" })).is_ok());
/// assert!(into_fields(json!(["WiFi"])).is_err());
/// ```
pub fn into_fields(body: Value) -> Result<FieldMap, Error> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(Error::invalid_request("Request body must be a JSON object")),
    }
}

/// Parse a path segment naming a record of kind `E`.
pub fn path_id<E: Entity>(raw: &str) -> Result<EntityId, Error> {
    raw.parse().map_err(|_| not_found::<E>(raw))
}
