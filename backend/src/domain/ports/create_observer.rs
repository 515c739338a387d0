//! Driven port notified after a record has been created.
//!
//! Observers run outside the write path: the record is already stored when
//! they are called and their failures never reach the caller.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::EntityKind;

use super::define_port_error;

define_port_error! {
    /// Errors raised while recording a newly created record.
    pub enum CreateObserverError {
        /// Reading or writing the destination failed.
        Io { message: String } => "create observer i/o failed: {message}",
        /// The destination holds data the observer cannot extend.
        Format { message: String } => "create observer found malformed data: {message}",
    }
}

/// Hook invoked once per successful create.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreateObserver: Send + Sync {
    /// Record the serialised form of a record of `kind`.
    async fn record_created(&self, kind: EntityKind, record: &Value)
    -> Result<(), CreateObserverError>;
}

/// Observer that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCreateObserver;

#[async_trait]
impl CreateObserver for NoOpCreateObserver {
    async fn record_created(
        &self,
        _kind: EntityKind,
        _record: &Value,
    ) -> Result<(), CreateObserverError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn no_op_observer_accepts_everything() {
        let result = NoOpCreateObserver
            .record_created(EntityKind::Country, &json!({ "id": "x" }))
            .await;
        assert!(result.is_ok());
    }

    #[rstest]
    fn errors_describe_their_cause() {
        let err = CreateObserverError::io("disk full");
        assert_eq!(err.to_string(), "create observer i/o failed: disk full");
    }
}
