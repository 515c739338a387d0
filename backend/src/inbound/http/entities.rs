//! Generic request flows shared by every entity resource.
//!
//! Each resource module wires its routes and OpenAPI annotations, then
//! delegates here with the matching service from [`super::state::HttpState`].

use actix_web::{HttpResponse, web};
use serde_json::Value;

use super::ApiResult;
use super::payload::{into_fields, path_id};
use crate::domain::{Entity, EntityId};
use crate::domain::ports::EntityService;

/// Create from a JSON body, answering `201 Created` with the stored record.
pub(crate) async fn create<E: Entity>(
    service: &dyn EntityService<E>,
    body: Value,
) -> ApiResult<HttpResponse> {
    let record = service.create(into_fields(body)?).await?;
    Ok(HttpResponse::Created().json(record))
}

pub(crate) async fn list<E: Entity>(service: &dyn EntityService<E>) -> ApiResult<web::Json<Vec<E>>> {
    Ok(web::Json(service.list().await?))
}

pub(crate) async fn get<E: Entity>(
    service: &dyn EntityService<E>,
    raw_id: &str,
) -> ApiResult<web::Json<E>> {
    let id = path_id::<E>(raw_id)?;
    Ok(web::Json(service.get(&id).await?))
}

pub(crate) async fn update<E: Entity>(
    service: &dyn EntityService<E>,
    raw_id: &str,
    body: Value,
) -> ApiResult<web::Json<E>> {
    let id = path_id::<E>(raw_id)?;
    update_by_id(service, &id, body).await
}

/// Update a record whose id the caller already resolved.
pub(crate) async fn update_by_id<E: Entity>(
    service: &dyn EntityService<E>,
    id: &EntityId,
    body: Value,
) -> ApiResult<web::Json<E>> {
    let fields = into_fields(body)?;
    Ok(web::Json(service.update(id, fields).await?))
}

/// Delete, answering `204 No Content`.
pub(crate) async fn delete<E: Entity>(
    service: &dyn EntityService<E>,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let id = path_id::<E>(raw_id)?;
    delete_by_id(service, &id).await
}

pub(crate) async fn delete_by_id<E: Entity>(
    service: &dyn EntityService<E>,
    id: &EntityId,
) -> ApiResult<HttpResponse> {
    service.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
