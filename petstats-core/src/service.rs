//! Statistics service that pulls from the stores and runs the aggregator.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info};

use crate::aggregator::{compute_from_counts, compute_statistics};
use crate::domain::PetStatistics;
use crate::error::{Result, StatsError};
use crate::store::{PetStore, VisitStore};

/// How statistics are gathered from the stores.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AggregationMode {
    /// Fetch every pet and group in memory.
    #[default]
    Entities,
    /// Ask the stores for pre-aggregated counts.
    Database,
}

impl AggregationMode {
    /// Configuration label for the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Entities => "entities",
            AggregationMode::Database => "database",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = StatsError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("entities") {
            Ok(AggregationMode::Entities)
        } else if value.eq_ignore_ascii_case("database") {
            Ok(AggregationMode::Database)
        } else {
            Err(StatsError::Config(format!(
                "unknown aggregation mode '{value}' (expected entities or database)"
            )))
        }
    }
}

/// Computes pet statistics from injected stores.
#[derive(Clone)]
pub struct StatisticsService {
    pets: Arc<dyn PetStore + Send + Sync>,
    visits: Arc<dyn VisitStore + Send + Sync>,
    mode: AggregationMode,
}

impl StatisticsService {
    /// Build a service over the given stores.
    pub fn new(
        pets: Arc<dyn PetStore + Send + Sync>,
        visits: Arc<dyn VisitStore + Send + Sync>,
        mode: AggregationMode,
    ) -> Self {
        Self { pets, visits, mode }
    }

    /// The aggregation mode in use.
    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Compute a fresh statistics snapshot. Any store failure aborts the
    /// whole computation.
    pub fn calculate(&self) -> Result<PetStatistics> {
        debug!("Calculating pet statistics ({} mode)", self.mode);
        let statistics = match self.mode {
            AggregationMode::Entities => self.calculate_from_entities()?,
            AggregationMode::Database => self.calculate_from_counts()?,
        };
        info!(
            "Calculated pet statistics: totalPets={}, petTypes={}, avgVisits={}",
            statistics.total_pets,
            statistics.pets_by_type.len(),
            statistics.average_visits_per_pet
        );
        Ok(statistics)
    }

    fn calculate_from_entities(&self) -> Result<PetStatistics> {
        let pets = self.pets.list_all()?;
        debug!("Total pets: {}", pets.len());
        if pets.is_empty() {
            debug!("No pets found, skipping visit count");
            return Ok(PetStatistics::empty());
        }
        let total_visits = self.visits.total_count()?;
        debug!("Total visits: {total_visits}");
        compute_statistics(&pets, total_visits)
    }

    fn calculate_from_counts(&self) -> Result<PetStatistics> {
        let total_pets = self.pets.count_all()?;
        debug!("Total pets: {total_pets}");
        let type_counts = self.pets.counts_by_type()?;
        debug!("Pets by type: {type_counts:?}");
        let total_visits = self.visits.total_count()?;
        debug!("Total visits: {total_visits}");
        compute_from_counts(total_pets, &type_counts, total_visits)
    }
}

#[cfg(test)]
mod tests {
    use super::{AggregationMode, StatisticsService};
    use crate::domain::{Pet, TypeCount};
    use crate::error::StatsError;
    use crate::store::{MockPetStore, MockVisitStore};
    use std::sync::Arc;

    fn service(pets: MockPetStore, visits: MockVisitStore, mode: AggregationMode) -> StatisticsService {
        StatisticsService::new(Arc::new(pets), Arc::new(visits), mode)
    }

    fn clinic() -> Vec<Pet> {
        vec![
            Pet::new(1, "Rex", "Dog"),
            Pet::new(2, "Fido", "dog"),
            Pet::new(3, "Max", "DOG"),
            Pet::new(4, "Leo", "Cat"),
            Pet::new(5, "Tom", "cat"),
            Pet::new(6, "Tweety", "Bird"),
        ]
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("entities".parse::<AggregationMode>(), Ok(AggregationMode::Entities));
        assert_eq!(" DATABASE ".parse::<AggregationMode>(), Ok(AggregationMode::Database));
        assert_eq!(AggregationMode::default(), AggregationMode::Entities);
        assert_eq!(AggregationMode::Database.to_string(), "database");
    }

    #[test]
    fn mode_rejects_unknown_values() {
        let err = "sql".parse::<AggregationMode>().unwrap_err();
        assert!(matches!(err, StatsError::Config(_)));
        assert!(err.to_string().contains("'sql'"));
    }

    #[test]
    fn entities_mode_groups_listed_pets() {
        let mut pets = MockPetStore::new();
        pets.expect_list_all().times(1).returning(|| Ok(clinic()));
        pets.expect_count_all().never();
        pets.expect_counts_by_type().never();
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().times(1).returning(|| Ok(14));

        let stats = service(pets, visits, AggregationMode::Entities)
            .calculate()
            .expect("stats");

        assert_eq!(stats.total_pets, 6);
        assert_eq!(stats.pets_by_type.get("dog"), Some(&3));
        assert_eq!(stats.pets_by_type.get("cat"), Some(&2));
        assert_eq!(stats.pets_by_type.get("bird"), Some(&1));
        assert_eq!(stats.average_visits_per_pet, 2.3);
    }

    #[test]
    fn entities_mode_skips_visits_without_pets() {
        let mut pets = MockPetStore::new();
        pets.expect_list_all().returning(|| Ok(Vec::new()));
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().never();

        let stats = service(pets, visits, AggregationMode::Entities)
            .calculate()
            .expect("stats");

        assert_eq!(stats.total_pets, 0);
        assert!(stats.pets_by_type.is_empty());
        assert_eq!(stats.average_visits_per_pet, 0.0);
    }

    #[test]
    fn database_mode_uses_grouped_counts() {
        let mut pets = MockPetStore::new();
        pets.expect_list_all().never();
        pets.expect_count_all().times(1).returning(|| Ok(15));
        pets.expect_counts_by_type().times(1).returning(|| {
            Ok(vec![
                TypeCount::new("Dog", 8),
                TypeCount::new("Cat", 5),
                TypeCount::new("Bird", 2),
            ])
        });
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().times(1).returning(|| Ok(35));

        let stats = service(pets, visits, AggregationMode::Database)
            .calculate()
            .expect("stats");

        assert_eq!(stats.total_pets, 15);
        assert_eq!(stats.pets_by_type.get("dog"), Some(&8));
        assert_eq!(stats.average_visits_per_pet, 2.3);
    }

    #[test]
    fn database_mode_single_type() {
        let mut pets = MockPetStore::new();
        pets.expect_count_all().returning(|| Ok(5));
        pets.expect_counts_by_type()
            .returning(|| Ok(vec![TypeCount::new("Dog", 5)]));
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().returning(|| Ok(10));

        let stats = service(pets, visits, AggregationMode::Database)
            .calculate()
            .expect("stats");

        assert_eq!(stats.pets_by_type.len(), 1);
        assert_eq!(stats.average_visits_per_pet, 2.0);
    }

    #[test]
    fn pet_listing_failure_aborts() {
        let mut pets = MockPetStore::new();
        pets.expect_list_all()
            .returning(|| Err(StatsError::Collaborator("connection refused".to_string())));
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().never();

        let err = service(pets, visits, AggregationMode::Entities)
            .calculate()
            .unwrap_err();
        assert_eq!(
            err,
            StatsError::Collaborator("connection refused".to_string())
        );
    }

    #[test]
    fn visit_count_failure_aborts() {
        let mut pets = MockPetStore::new();
        pets.expect_list_all().returning(|| Ok(clinic()));
        let mut visits = MockVisitStore::new();
        visits
            .expect_total_count()
            .returning(|| Err(StatsError::Collaborator("visit query failed".to_string())));

        let err = service(pets, visits, AggregationMode::Entities)
            .calculate()
            .unwrap_err();
        assert!(matches!(err, StatsError::Collaborator(_)));
    }

    #[test]
    fn each_database_query_failure_aborts() {
        let mut pets = MockPetStore::new();
        pets.expect_count_all()
            .returning(|| Err(StatsError::Collaborator("count failed".to_string())));
        pets.expect_counts_by_type().never();
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().never();
        let err = service(pets, visits, AggregationMode::Database)
            .calculate()
            .unwrap_err();
        assert_eq!(err, StatsError::Collaborator("count failed".to_string()));

        let mut pets = MockPetStore::new();
        pets.expect_count_all().returning(|| Ok(3));
        pets.expect_counts_by_type()
            .returning(|| Err(StatsError::Collaborator("group failed".to_string())));
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().never();
        let err = service(pets, visits, AggregationMode::Database)
            .calculate()
            .unwrap_err();
        assert_eq!(err, StatsError::Collaborator("group failed".to_string()));

        let mut pets = MockPetStore::new();
        pets.expect_count_all().returning(|| Ok(1));
        pets.expect_counts_by_type()
            .returning(|| Ok(vec![TypeCount::new("dog", 1)]));
        let mut visits = MockVisitStore::new();
        visits
            .expect_total_count()
            .returning(|| Err(StatsError::Collaborator("visits failed".to_string())));
        let err = service(pets, visits, AggregationMode::Database)
            .calculate()
            .unwrap_err();
        assert_eq!(err, StatsError::Collaborator("visits failed".to_string()));
    }

    #[test]
    fn untyped_pet_surfaces_data_integrity_failure() {
        let mut pets = MockPetStore::new();
        pets.expect_list_all().returning(|| {
            Ok(vec![Pet {
                id: 1,
                name: "Ghost".to_string(),
                pet_type: None,
            }])
        });
        let mut visits = MockVisitStore::new();
        visits.expect_total_count().returning(|| Ok(0));

        let err = service(pets, visits, AggregationMode::Entities)
            .calculate()
            .unwrap_err();
        assert!(matches!(err, StatsError::DataIntegrity(_)));
    }
}
