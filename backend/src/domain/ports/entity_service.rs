//! Driving port for the per-entity lifecycle operations.

use async_trait::async_trait;

use crate::domain::{Entity, EntityId, Error, FieldMap};

/// Create, read, update and delete records of one kind.
///
/// Inputs are raw field maps; implementations validate them, enforce
/// uniqueness and references, and stamp timestamps.
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    /// Validate `fields` and store a new record.
    ///
    /// Fails with `missing_field` naming the first absent required key,
    /// `invalid_field` for a rejected value or unknown reference, and
    /// `conflict` when a uniqueness rule would be broken.
    async fn create(&self, fields: FieldMap) -> Result<E, Error>;

    /// Fetch one record, failing with `not_found` when absent.
    async fn get(&self, id: &EntityId) -> Result<E, Error>;

    /// Every record in insertion order.
    async fn list(&self) -> Result<Vec<E>, Error>;

    /// Merge the fields present in `fields` onto an existing record.
    ///
    /// `updated_at` is refreshed even when nothing changed.
    async fn update(&self, id: &EntityId, fields: FieldMap) -> Result<E, Error>;

    /// Remove a record. Dependent records are left untouched.
    async fn delete(&self, id: &EntityId) -> Result<(), Error>;
}
