//! The contract shared by every entity managed through a REST resource.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LibrisError;

/// Something that may carry a server-assigned identifier.
///
/// `None` means the value has not been persisted yet.
pub trait Identifiable {
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    fn id(&self) -> Option<Self::Id>;
}

/// An entity exposed by the API under `PATH`.
///
/// `Default` yields the empty instance used by "new" flows.
pub trait Resource:
    Identifiable<Id: FromStr + Send + Sync + 'static>
    + Clone
    + Default
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;

    /// Resource path relative to the API root, e.g. `api/books`.
    const PATH: &'static str;

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Validation`] when an invariant does not hold.
    fn validate(&self) -> Result<(), LibrisError> {
        Ok(())
    }
}
