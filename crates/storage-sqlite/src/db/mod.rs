//! Database connection management: pool, migrations, schema preflight.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use adspend_core::errors::{DatabaseError, Error, Result};
use adspend_core::pipeline::PipelineError;

mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Arc<Pool<ConnectionManager<SqliteConnection>>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Applies the SQLite pragmas every pooled connection needs: WAL so the
/// writer never blocks artifact readers, and a busy timeout instead of
/// immediate SQLITE_BUSY failures.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(8)
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = get_connection(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(DatabaseError::MigrationFailed(e.to_string())))?;
    for migration in applied {
        info!("Applied migration {}", migration);
    }
    Ok(())
}

/// Creates the database file's parent directory if needed, builds the pool,
/// and runs pending migrations.
pub fn init(db_path: &str) -> Result<DbPool> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "failed to create database directory: {e}"
                )))
            })?;
        }
    }
    let pool = create_pool(db_path)?;
    run_migrations(&pool)?;
    Ok(pool)
}

#[derive(QueryableByName)]
struct TableColumn {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Schema preflight: verifies that `table` exposes every column in
/// `required` before a stage reads from it, so a mismatched input fails
/// the stage without producing partial output. A missing table reports all
/// of its required columns as missing.
pub fn ensure_columns(
    conn: &mut SqliteConnection,
    table: &str,
    required: &[&str],
) -> Result<()> {
    let columns: Vec<TableColumn> = diesel::sql_query(format!("PRAGMA table_info({table})"))
        .load(conn)
        .map_err(|e| Error::Database(DatabaseError::QueryFailed(e.to_string())))?;

    let present: HashSet<String> = columns
        .into_iter()
        .map(|column| column.name.to_ascii_lowercase())
        .collect();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !present.contains(&column.to_ascii_lowercase()))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Pipeline(PipelineError::SchemaMismatch {
            table: table.to_string(),
            missing: missing.join(", "),
        }))
    }
}
