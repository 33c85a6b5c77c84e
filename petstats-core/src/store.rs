//! Read-only collaborators that supply pet and visit data.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Pet, TypeCount, Visit};
use crate::error::Result;

/// Source of pet records and pet counts.
#[cfg_attr(test, mockall::automock)]
pub trait PetStore {
    /// Fetch every pet with its type label.
    fn list_all(&self) -> Result<Vec<Pet>>;
    /// Count all pets.
    fn count_all(&self) -> Result<i64>;
    /// Count pets grouped by their raw type label.
    fn counts_by_type(&self) -> Result<Vec<TypeCount>>;
}

/// Source of visit counts.
#[cfg_attr(test, mockall::automock)]
pub trait VisitStore {
    /// Count visits that belong to an existing pet.
    fn total_count(&self) -> Result<i64>;
}

/// A point-in-time export of clinic records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSnapshot {
    /// Pets in the clinic.
    #[serde(default)]
    pub pets: Vec<Pet>,
    /// Visits recorded against those pets.
    #[serde(default)]
    pub visits: Vec<Visit>,
}

/// In-memory store backed by a [`ClinicSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshot: ClinicSnapshot,
}

impl SnapshotStore {
    /// Wrap an existing snapshot.
    pub fn new(snapshot: ClinicSnapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Borrow the underlying snapshot.
    pub fn snapshot(&self) -> &ClinicSnapshot {
        &self.snapshot
    }
}

impl PetStore for SnapshotStore {
    fn list_all(&self) -> Result<Vec<Pet>> {
        Ok(self.snapshot.pets.clone())
    }

    fn count_all(&self) -> Result<i64> {
        Ok(self.snapshot.pets.len() as i64)
    }

    fn counts_by_type(&self) -> Result<Vec<TypeCount>> {
        let mut groups: BTreeMap<Option<&str>, i64> = BTreeMap::new();
        for pet in &self.snapshot.pets {
            *groups.entry(pet.pet_type.as_deref()).or_insert(0) += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(type_name, count)| TypeCount {
                type_name: type_name.map(str::to_string),
                count,
            })
            .collect())
    }
}

impl VisitStore for SnapshotStore {
    fn total_count(&self) -> Result<i64> {
        let known: HashSet<i32> = self.snapshot.pets.iter().map(|pet| pet.id).collect();
        let count = self
            .snapshot
            .visits
            .iter()
            .filter(|visit| known.contains(&visit.pet_id))
            .count();
        Ok(count as i64)
    }
}
