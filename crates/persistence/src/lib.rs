//! # Staffledger Persistence
//!
//! Ledger store for the HR/payroll engine - SQLite via sqlx.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Ledger                               │
//! │  ┌─────────────┐    ┌──────────────┐    ┌────────────────┐  │
//! │  │   SQLite    │    │    Repos     │    │ AuditRecorder  │  │
//! │  │  (tables)   │    │  (queries)   │    │ (change log)   │  │
//! │  └─────────────┘    └──────────────┘    └────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All mutating operations run on one sqlx transaction: selection,
//! computation, writes, and audit entries commit together or not at
//! all. Dropping an uncommitted transaction rolls it back.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use staffledger_persistence::{EmployeeRepo, Ledger};
//!
//! let ledger = Ledger::init("sqlite:staffledger.db?mode=rwc").await?;
//!
//! let mut tx = ledger.begin().await?;
//! EmployeeRepo::update_salary(&mut tx, 7, new_salary).await?;
//! tx.commit().await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::schema::{AuditRow, DepartmentRow, EmployeeRow, PayrollRow, ProjectRow};
pub use sqlite::{
    create_pool, create_schema, init_database, AuditRecorder, AuditRepo, DepartmentRepo,
    EmployeeRepo, PayrollRepo, ProjectRepo,
};

use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Ledger facade - unified access to the SQLite store
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    /// Connect to an existing database
    pub async fn connect(database_url: &str) -> PersistenceResult<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self { pool })
    }

    /// Create (if missing) and initialize a database
    pub async fn init(database_url: &str) -> PersistenceResult<Self> {
        let pool = init_database(database_url).await?;
        Ok(Self { pool })
    }

    /// Initialized in-memory ledger.
    ///
    /// Pinned to a single connection: an in-memory SQLite database
    /// lives and dies with its connection.
    pub async fn in_memory() -> PersistenceResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        create_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection for read-only work
    pub async fn acquire(&self) -> PersistenceResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Begin a transaction for mutating work
    pub async fn begin(&self) -> PersistenceResult<Transaction<'_, Sqlite>> {
        Ok(self.pool.begin().await?)
    }
}
