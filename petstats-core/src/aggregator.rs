//! Pure aggregation of pet and visit records into [`PetStatistics`].
//!
//! Every function here is deterministic and free of I/O. Counts arrive as
//! `i64` because that is what SQL `COUNT` produces; they are validated before
//! any arithmetic happens.

use crate::domain::{Pet, PetStatistics, PetsByType, TypeCount};
use crate::error::{Result, StatsError};

/// Normalize a pet type label into its grouping key.
///
/// Only case is folded: surrounding whitespace and synonyms are preserved, so
/// `"Dog "` and `"dog"` stay distinct.
pub fn normalize_type(label: &str) -> String {
    label.to_lowercase()
}

/// Compute statistics from individual pet records and a total visit count.
pub fn compute_statistics(pets: &[Pet], total_visits: i64) -> Result<PetStatistics> {
    let total_visits = non_negative("total visits", total_visits)?;

    let mut pets_by_type = PetsByType::new();
    for pet in pets {
        let label = pet.pet_type.as_deref().ok_or_else(|| {
            StatsError::DataIntegrity(format!("pet {} ({}) has no type", pet.id, pet.name))
        })?;
        *pets_by_type.entry(normalize_type(label)).or_insert(0) += 1;
    }

    let total_pets = pets.len() as u64;
    Ok(PetStatistics {
        total_pets,
        pets_by_type,
        average_visits_per_pet: average_visits_per_pet(total_visits, total_pets),
    })
}

/// Compute statistics from pre-aggregated counts.
///
/// `type_counts` are raw grouped rows; labels that collide once lowercased are
/// merged. The grouped counts must add up to `total_pets`.
pub fn compute_from_counts(
    total_pets: i64,
    type_counts: &[TypeCount],
    total_visits: i64,
) -> Result<PetStatistics> {
    let total_pets = non_negative("total pets", total_pets)?;
    let total_visits = non_negative("total visits", total_visits)?;

    let mut pets_by_type = PetsByType::new();
    let mut grouped: u64 = 0;
    for row in type_counts {
        let count = non_negative("pet type count", row.count)?;
        if count == 0 {
            continue;
        }
        let label = row.type_name.as_deref().ok_or_else(|| {
            StatsError::DataIntegrity(format!("{count} pets have no type"))
        })?;
        grouped = grouped
            .checked_add(count)
            .ok_or_else(|| StatsError::Computation("grouped pet count overflow".to_string()))?;
        *pets_by_type.entry(normalize_type(label)).or_insert(0) += count;
    }

    if grouped != total_pets {
        return Err(StatsError::DataIntegrity(format!(
            "pets grouped by type sum to {grouped} but total is {total_pets}"
        )));
    }

    Ok(PetStatistics {
        total_pets,
        pets_by_type,
        average_visits_per_pet: average_visits_per_pet(total_visits, total_pets),
    })
}

/// Average visits per pet, rounded half-up to one decimal place.
///
/// Returns exactly `0.0` when there are no pets.
pub fn average_visits_per_pet(total_visits: u64, total_pets: u64) -> f64 {
    if total_pets == 0 {
        return 0.0;
    }
    let visits = u128::from(total_visits);
    let pets = u128::from(total_pets);
    // floor(v * 10 / p + 1/2), in integers.
    let tenths = (visits * 20 + pets) / (pets * 2);
    tenths as f64 / 10.0
}

fn non_negative(what: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| StatsError::InvalidInput(format!("{what} is {value}")))
}
