//! Database connection pool utilities.

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::info;
use petstats_core::StatsError;

/// Pooled PostgreSQL connections for the PetStats server.
pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Embedded Diesel migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Build the database pool and apply pending migrations.
pub fn init_pool(database_url: &str, max_size: u32) -> Result<DbPool, StatsError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|err| StatsError::Collaborator(format!("failed to create database pool: {err}")))?;
    run_migrations(&pool)?;
    Ok(pool)
}

/// Run pending Diesel migrations.
pub fn run_migrations(pool: &DbPool) -> Result<(), StatsError> {
    let mut conn = pool
        .get()
        .map_err(|err| StatsError::Collaborator(format!("failed to fetch database connection: {err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StatsError::Collaborator(format!("failed to run migrations: {err}")))?;
    info!("Applied {} pending migrations", applied.len());
    Ok(())
}

/// Swap the database name in a PostgreSQL URL, keeping any query string.
#[cfg(test)]
fn with_database_name(database_url: &str, name: &str) -> String {
    let (url, query) = match database_url.split_once('?') {
        Some((url, query)) => (url, format!("?{query}")),
        None => (database_url, String::new()),
    };
    let server = url.rsplit_once('/').map_or(url, |(server, _)| server);
    format!("{server}/{name}{query}")
}

/// A throwaway, migrated PostgreSQL database. Dropped with the value.
#[cfg(test)]
pub(crate) struct TestDatabase {
    name: String,
    admin_url: String,
    pool: Option<DbPool>,
}

#[cfg(test)]
impl TestDatabase {
    /// Create a database next to `TEST_DATABASE_URL` (or `DATABASE_URL`).
    pub(crate) fn new() -> Self {
        use diesel::{Connection, RunQueryDsl};

        let base_url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("set TEST_DATABASE_URL or DATABASE_URL for PostgreSQL tests");
        let name = format!("petstats_test_{}", uuid::Uuid::new_v4().simple());
        let admin_url = with_database_name(&base_url, "postgres");

        let mut admin = PgConnection::establish(&admin_url).expect("connect admin database");
        diesel::sql_query(format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .expect("create test database");
        let pool = init_pool(&with_database_name(&base_url, &name), 2).expect("test pool");

        Self {
            name,
            admin_url,
            pool: Some(pool),
        }
    }

    pub(crate) fn pool(&self) -> DbPool {
        self.pool.clone().expect("pool is live until drop")
    }
}

#[cfg(test)]
impl Drop for TestDatabase {
    fn drop(&mut self) {
        use diesel::{Connection, RunQueryDsl};

        drop(self.pool.take());
        if let Ok(mut admin) = PgConnection::establish(&self.admin_url) {
            let _ = diesel::sql_query(format!(
                "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
                self.name
            ))
            .execute(&mut admin);
        }
    }
}
