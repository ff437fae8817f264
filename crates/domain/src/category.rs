//! Category — the classification a [`Book`](crate::book::Book) belongs to.

use serde::{Deserialize, Serialize};

use crate::id::CategoryId;
use crate::resource::{Identifiable, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identifiable for Category {
    type Id = CategoryId;

    fn id(&self) -> Option<CategoryId> {
        self.id
    }
}

impl Resource for Category {
    const NAME: &'static str = "Category";
    const PATH: &'static str = "api/categories";
}
