//! Spaces — a study-space reservation made by a [`User`] for a given day.

use serde::{Deserialize, Serialize};

use crate::id::SpacesId;
use crate::resource::{Identifiable, Resource};
use crate::time::{Date, wire_date};
use crate::user::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spaces {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SpacesId>,
    #[serde(with = "wire_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Spaces {
    /// A reservation of `date` for `user`, not yet persisted.
    #[must_use]
    pub fn new(date: Date, user: User) -> Self {
        Self {
            id: None,
            date: Some(date),
            user: Some(user),
        }
    }
}

impl Identifiable for Spaces {
    type Id = SpacesId;

    fn id(&self) -> Option<SpacesId> {
        self.id
    }
}

impl Resource for Spaces {
    const NAME: &'static str = "Spaces";
    const PATH: &'static str = "api/spaces";
}
