#![deny(missing_docs)]
//! PetStats core library.
//!
//! This crate contains the domain types, store traits and the pure
//! aggregation that turns clinic records into pet statistics.

pub mod aggregator;
pub mod domain;
pub mod error;
pub mod report;
pub mod service;
pub mod store;

pub use aggregator::{
    average_visits_per_pet, compute_from_counts, compute_statistics, normalize_type,
};
pub use domain::{Pet, PetStatistics, PetsByType, TypeCount, Visit};
pub use error::{Result, StatsError};
pub use report::{format_pets_by_type, render_json, render_markdown, render_text};
pub use service::{AggregationMode, StatisticsService};
pub use store::{ClinicSnapshot, PetStore, SnapshotStore, VisitStore};
