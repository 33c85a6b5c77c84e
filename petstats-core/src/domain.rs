//! Domain entities for PetStats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A mapping of lowercase pet type labels to the number of pets of that type.
pub type PetsByType = BTreeMap<String, u64>;

/// A pet as seen by the statistics core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    /// Pet identifier.
    pub id: i32,
    /// Pet name.
    pub name: String,
    /// Free-text type label such as "Dog" or "cat". Missing labels are a data
    /// integrity failure.
    #[serde(rename = "type", default)]
    pub pet_type: Option<String>,
}

impl Pet {
    /// Build a pet with a type label.
    pub fn new(id: i32, name: impl Into<String>, pet_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pet_type: Some(pet_type.into()),
        }
    }
}

/// A recorded clinic visit. Only its owning pet matters for statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Visit identifier.
    pub id: i32,
    /// Identifier of the pet that was seen.
    pub pet_id: i32,
    /// Optional visit notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One row of a pets-grouped-by-type query, before label normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    /// Raw type label, `None` when pets have no type.
    pub type_name: Option<String>,
    /// Number of pets carrying the label.
    pub count: i64,
}

impl TypeCount {
    /// Build a grouped row for a labelled type.
    pub fn new(type_name: impl Into<String>, count: i64) -> Self {
        Self {
            type_name: Some(type_name.into()),
            count,
        }
    }
}

/// Aggregated statistics about the pets in the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetStatistics {
    /// Total number of pets.
    pub total_pets: u64,
    /// Pet counts keyed by lowercase type label. Never holds zero counts.
    #[schema(value_type = Object)]
    pub pets_by_type: PetsByType,
    /// Average visits per pet, rounded half-up to one decimal place.
    pub average_visits_per_pet: f64,
}

impl PetStatistics {
    /// Statistics for a clinic with no pets.
    pub fn empty() -> Self {
        Self {
            total_pets: 0,
            pets_by_type: PetsByType::new(),
            average_visits_per_pet: 0.0,
        }
    }
}
