//! PostgreSQL-backed pet and visit stores.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use petstats_core::{Pet, PetStore, Result, StatsError, TypeCount, VisitStore};

use crate::db::DbPool;
use crate::models::{PetWithType, TypeCountRow};
use crate::schema::{pets, types, visits};

const PETS_BY_TYPE_SQL: &str = "SELECT t.name AS type_name, COUNT(p.id) AS count \
     FROM pets p LEFT JOIN types t ON t.id = p.type_id \
     GROUP BY t.name";

/// Clinic store that answers both pet and visit queries from one pool.
#[derive(Clone)]
pub struct DieselClinicStore {
    pool: DbPool,
}

impl DieselClinicStore {
    /// Build a store over a connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>> {
        self.pool.get().map_err(|err| {
            StatsError::Collaborator(format!("database connection unavailable: {err}"))
        })
    }
}

fn query_error(context: &str, err: diesel::result::Error) -> StatsError {
    match err {
        diesel::result::Error::DeserializationError(inner) => {
            StatsError::DataIntegrity(format!("{context}: unexpected row shape: {inner}"))
        }
        other => StatsError::Collaborator(format!("{context}: {other}")),
    }
}

impl PetStore for DieselClinicStore {
    fn list_all(&self) -> Result<Vec<Pet>> {
        let mut conn = self.connection()?;
        let rows = pets::table
            .left_join(types::table)
            .select((pets::id, pets::name, types::name.nullable()))
            .order(pets::id.asc())
            .load::<PetWithType>(&mut conn)
            .map_err(|err| query_error("pet listing failed", err))?;
        Ok(rows.into_iter().map(Pet::from).collect())
    }

    fn count_all(&self) -> Result<i64> {
        let mut conn = self.connection()?;
        pets::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(|err| query_error("pet count failed", err))
    }

    fn counts_by_type(&self) -> Result<Vec<TypeCount>> {
        let mut conn = self.connection()?;
        let rows = diesel::sql_query(PETS_BY_TYPE_SQL)
            .load::<TypeCountRow>(&mut conn)
            .map_err(|err| query_error("pet type count failed", err))?;
        Ok(rows.into_iter().map(TypeCount::from).collect())
    }
}

impl VisitStore for DieselClinicStore {
    fn total_count(&self) -> Result<i64> {
        let mut conn = self.connection()?;
        visits::table
            .inner_join(pets::table)
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(|err| query_error("visit count failed", err))
    }
}
