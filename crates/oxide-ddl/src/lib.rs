//! Create and drop tables from dialect-neutral schema definitions.
//!
//! `oxide-ddl` drives the [`oxide_ddl_core`] compiler: it loads JSON schema
//! files, prints the DDL of any supported dialect, and runs it against a
//! SQLite database.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_ddl::prelude::*;
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! let pool = SqlitePoolOptions::new().connect("sqlite::memory:").await?;
//! let executor = SchemaExecutor::new(pool, Dialect::sqlite());
//! let schema = load_schema("schemas/users.json")?;
//! executor.create_schema("users", &schema).await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the MySQL DDL of a schema file
//! oxide-ddl --dialect mysql create schemas/users.json --table users
//!
//! # Create the table in a SQLite database
//! oxide-ddl --database sqlite:db.sqlite3 create schemas/users.json --table users --execute
//!
//! # Drop it again
//! oxide-ddl --database sqlite:db.sqlite3 drop --table users --execute
//! ```

pub mod error;
pub mod executor;
pub mod loader;
pub mod writer;

/// Commonly used types.
pub mod prelude {
    pub use crate::error::{ExecuteError, Result};
    pub use crate::executor::SchemaExecutor;
    pub use crate::loader::load_schema;
    pub use crate::writer::SqlWriter;
    pub use oxide_ddl_core::schema::field;
    pub use oxide_ddl_core::{Dialect, FieldDefinition, IndexRequest, TableSchema};
}
