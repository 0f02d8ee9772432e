use serde::Serialize;

use crate::api::QuantityUnitData;

/// A unit products are counted or purchased in ("Bottle", "Pack").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuantityUnit {
    id: u64,
    name: String,
    name_plural: Option<String>,
    description: Option<String>,
}

impl QuantityUnit {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn name_plural(&self) -> Option<&str> {
        self.name_plural.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl From<QuantityUnitData> for QuantityUnit {
    fn from(data: QuantityUnitData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            name_plural: data.name_plural,
            description: data.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_copies_every_field() {
        let unit = QuantityUnit::from(QuantityUnitData {
            id: 3,
            name: "Pack".to_string(),
            name_plural: Some("Packs".to_string()),
            description: None,
        });

        assert_eq!(unit.id(), 3);
        assert_eq!(unit.name(), "Pack");
        assert_eq!(unit.name_plural(), Some("Packs"));
        assert_eq!(unit.description(), None);
    }
}
