//! Database models for the clinic tables.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text};
use petstats_core::{Pet, TypeCount};

#[cfg(test)]
use crate::schema::{pets, types, visits};

/// Pet row joined with the name of its type.
#[derive(Debug, Clone, Queryable)]
pub struct PetWithType {
    /// Pet identifier.
    pub id: i32,
    /// Pet name.
    pub name: String,
    /// Type name, absent when the pet has no type.
    pub type_name: Option<String>,
}

impl From<PetWithType> for Pet {
    fn from(row: PetWithType) -> Self {
        Pet {
            id: row.id,
            name: row.name,
            pet_type: row.type_name,
        }
    }
}

/// Row of the pets-grouped-by-type query.
#[derive(Debug, Clone, QueryableByName)]
pub struct TypeCountRow {
    /// Raw type name.
    #[diesel(sql_type = Nullable<Text>)]
    pub type_name: Option<String>,
    /// Number of pets with that type.
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl From<TypeCountRow> for TypeCount {
    fn from(row: TypeCountRow) -> Self {
        TypeCount {
            type_name: row.type_name,
            count: row.count,
        }
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = types)]
/// Insertable pet type.
pub struct NewPetType {
    /// Type identifier.
    pub id: i32,
    /// Type name.
    pub name: String,
}

#[cfg(test)]
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
/// Insertable pet.
pub struct NewPet {
    /// Pet identifier.
    pub id: i32,
    /// Pet name.
    pub name: String,
    /// Birth date if known.
    pub birth_date: Option<chrono::NaiveDate>,
    /// Type identifier.
    pub type_id: Option<i32>,
}

#[cfg(test)]
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = visits)]
/// Insertable visit.
pub struct NewVisit {
    /// Visit identifier.
    pub id: i32,
    /// Visited pet.
    pub pet_id: i32,
    /// Visit date if recorded.
    pub visit_date: Option<chrono::NaiveDate>,
    /// Visit notes.
    pub description: Option<String>,
}
