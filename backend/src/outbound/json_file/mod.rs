//! JSON data files holding records of each kind.
//!
//! A directory holds one `<stem>.json` file per kind (see
//! [`EntityKind::file_stem`]). Each file is an object whose `<TypeName>` key
//! maps to a list of records:
//!
//! ```json
//! {
//!     "Country": [
//!         { "id": "…", "name": "Australia", "code": "AU", … }
//!     ]
//! }
//! ```

mod loader;
mod recorder;

pub use loader::{JsonFileLoader, LoadError, LoadSummary};
pub use recorder::JsonFileRecorder;

use crate::domain::EntityKind;

/// File name holding records of `kind`.
pub fn file_name(kind: EntityKind) -> String {
    format!("{}.json", kind.file_stem())
}
