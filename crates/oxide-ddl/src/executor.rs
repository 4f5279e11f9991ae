//! Schema executor.
//!
//! Compiles schemas with a [`Dialect`] and runs the statements against a
//! SQLite pool, or prints them in dry-run mode.

use oxide_ddl_core::{Dialect, SchemaProvider};
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{ExecuteError, Result};

/// Creates and drops tables from schema definitions.
pub struct SchemaExecutor {
    pool: Option<SqlitePool>,
    dialect: Dialect,
    dry_run: bool,
}

impl SchemaExecutor {
    /// Creates an executor running statements on `pool`.
    #[must_use]
    pub const fn new(pool: SqlitePool, dialect: Dialect) -> Self {
        Self {
            pool: Some(pool),
            dialect,
            dry_run: false,
        }
    }

    /// Creates an executor without a database; statements are only printed.
    #[must_use]
    pub const fn offline(dialect: Dialect) -> Self {
        Self {
            pool: None,
            dialect,
            dry_run: true,
        }
    }

    /// Enables dry-run mode (SQL is printed but not executed).
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns whether statements are only printed.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Creates `source` from `schema`: the table first, then its indexes.
    ///
    /// # Errors
    ///
    /// Returns compilation errors, and database errors of the first failing
    /// statement.
    pub async fn create_schema<S>(&self, source: &str, schema: &S) -> Result<()>
    where
        S: SchemaProvider + Sync + ?Sized,
    {
        info!(table = %source, dialect = self.dialect.name, "Creating table");
        let statements = self.dialect.compiler().compile_create(source, schema)?;
        for sql in statements.iter() {
            self.run(sql).await?;
        }
        info!(table = %source, "Table created successfully");
        Ok(())
    }

    /// Drops `source`, with `IF EXISTS` when `soft`.
    ///
    /// Returns `false` without touching the database when the name is empty.
    ///
    /// # Errors
    ///
    /// Returns the database error if the statement fails.
    pub async fn drop_schema(&self, source: &str, soft: bool) -> Result<bool> {
        let Some(sql) = self.dialect.compiler().compile_drop(source, soft) else {
            warn!("Empty table name, nothing to drop");
            return Ok(false);
        };
        info!(table = %source, soft, "Dropping table");
        self.run(&sql).await?;
        Ok(true)
    }

    /// Returns whether a table exists in the connected database.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::NoDatabase`] for an offline executor.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let pool = self.pool.as_ref().ok_or(ExecuteError::NoDatabase)?;
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    async fn run(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "Executing SQL");
        if self.dry_run {
            warn!("Dry run, statement not executed");
            println!("{sql}");
            return Ok(());
        }
        let pool = self.pool.as_ref().ok_or(ExecuteError::NoDatabase)?;
        sqlx::query(sql).execute(pool).await?;
        Ok(())
    }
}
