//! User — the account a borrowing or a space reservation is made for.
//!
//! Users are managed by the account administration and only ever read here,
//! to populate relationship selections.

use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::resource::{Identifiable, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl User {
    /// Reference an existing account by id, as relationship fields do.
    #[must_use]
    pub fn reference(id: UserId) -> Self {
        Self {
            id: Some(id),
            login: None,
        }
    }
}

impl Identifiable for User {
    type Id = UserId;

    fn id(&self) -> Option<UserId> {
        self.id
    }
}

impl Resource for User {
    const NAME: &'static str = "User";
    const PATH: &'static str = "api/users";
}
