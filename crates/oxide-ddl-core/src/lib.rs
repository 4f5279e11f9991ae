//! # oxide-ddl-core
//!
//! Cross-dialect schema-to-DDL compiler.
//!
//! A dialect-neutral [`TableSchema`] (columns, keys, indexes, constraints and
//! table options) is compiled into the exact `CREATE TABLE`, `CREATE INDEX`
//! and `DROP TABLE` statements of MySQL, PostgreSQL or SQLite. Each
//! [`Dialect`] is plain configuration data: a type registry, meta and
//! constraint templates, NULL/DEFAULT clause policy and an index strategy.
//! The compiler itself is shared.
//!
//! ## Example
//!
//! ```rust
//! use oxide_ddl_core::schema::{field, TableSchema};
//! use oxide_ddl_core::Dialect;
//!
//! let schema = TableSchema::new()
//!     .field("id", field("id").ty("integer").primary_key())
//!     .field("title", field("title").length(128).nullable())
//!     .table_meta("engine", "InnoDB");
//!
//! let dialect = Dialect::mysql();
//! let statements = dialect.compiler().compile_create("posts", &schema).unwrap();
//! assert_eq!(
//!     statements.table,
//!     "CREATE TABLE `posts` (\n\
//!      `id` int(11) NOT NULL AUTO_INCREMENT,\n\
//!      `title` varchar(128) DEFAULT NULL,\n\
//!      PRIMARY KEY (`id`))\n\
//!      ENGINE=InnoDB;"
//! );
//! ```
//!
//! Statements are run through an [`Executor`]; [`RecordingExecutor`] keeps
//! them in memory.

pub mod column;
pub mod compiler;
pub mod constraint;
pub mod dialect;
pub mod error;
pub mod index;
pub mod meta;
pub mod quote;
pub mod schema;
pub mod types;
pub mod value;

pub use column::{ColumnCompiler, CompiledColumn};
pub use compiler::{CreateStatements, Executor, RecordingExecutor, SchemaCompiler};
pub use dialect::Dialect;
pub use error::{DdlError, Result};
pub use quote::{Quoter, StandardQuoter};
pub use schema::{
    CheckExpr, Columns, ConstraintRequest, FieldDefinition, IndexRequest, Predicate, SchemaMeta,
    SchemaProvider, TableSchema,
};
pub use value::{DefaultValue, Value};
