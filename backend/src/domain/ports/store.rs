//! Driven port for keyed record storage.
//!
//! One store exists per entity kind. Adapters hold records by id and return
//! them in insertion order; they do not validate or coordinate writers.

use async_trait::async_trait;

use crate::domain::EntityId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by store adapters.
    pub enum StoreError {
        /// The backing store could not be reached.
        Unavailable { message: String } => "store unavailable: {message}",
    }
}

/// Keyed container for records of one kind.
#[async_trait]
pub trait Store<R>: Send + Sync
where
    R: Clone + Send + Sync + 'static,
{
    /// Insert or replace the record stored under `id`.
    ///
    /// Replacing keeps the record's original position in [`Store::list`].
    async fn put(&self, id: EntityId, record: R) -> Result<(), StoreError>;

    /// Fetch a record by id.
    async fn get(&self, id: &EntityId) -> Result<Option<R>, StoreError>;

    /// Remove a record, reporting whether it existed.
    async fn delete(&self, id: &EntityId) -> Result<bool, StoreError>;

    /// Every record, oldest insertion first.
    async fn list(&self) -> Result<Vec<R>, StoreError>;
}
