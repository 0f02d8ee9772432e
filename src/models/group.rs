use serde::Serialize;

use crate::api::GroupData;

/// A product group, such as "Dairy" or "Cleaning supplies".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    id: u64,
    name: String,
    description: Option<String>,
}

impl Group {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl From<GroupData> for Group {
    fn from(data: GroupData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
        }
    }
}
