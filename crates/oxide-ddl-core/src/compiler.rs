//! Schema orchestrator: `CREATE TABLE` and `DROP TABLE` statements.

use std::convert::Infallible;
use std::iter;

use tracing::{debug, trace};

use crate::column::ColumnCompiler;
use crate::constraint::render_constraint;
use crate::dialect::Dialect;
use crate::error::{DdlError, Result};
use crate::index::build_indexes;
use crate::meta::collect_metas;
use crate::quote::Quoter;
use crate::schema::{Columns, ConstraintRequest, FieldDefinition, SchemaProvider};

/// Runs compiled statements.
pub trait Executor {
    /// Error reported by the executor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes one statement.
    ///
    /// # Errors
    ///
    /// Returns the executor's error if the statement fails.
    fn execute(&mut self, sql: &str) -> std::result::Result<(), Self::Error>;
}

/// Executor that records statements instead of running them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingExecutor {
    /// Statements in execution order.
    pub statements: Vec<String>,
}

impl RecordingExecutor {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Executor for RecordingExecutor {
    type Error = Infallible;

    fn execute(&mut self, sql: &str) -> std::result::Result<(), Self::Error> {
        self.statements.push(sql.to_string());
        Ok(())
    }
}

/// Statements that create one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStatements {
    /// The `CREATE TABLE` statement.
    pub table: String,
    /// Standalone `CREATE INDEX` statements, run after the table statement.
    pub indexes: Vec<String>,
}

impl CreateStatements {
    /// Iterates all statements in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        iter::once(self.table.as_str()).chain(self.indexes.iter().map(String::as_str))
    }
}

/// Compiles schemas into DDL for one dialect.
///
/// Compilation is a pure function of the dialect, the schema and the quoter;
/// the compiler keeps no state between calls.
#[derive(Clone, Copy)]
pub struct SchemaCompiler<'a> {
    dialect: &'a Dialect,
    quoter: &'a dyn Quoter,
}

impl<'a> SchemaCompiler<'a> {
    /// Creates a compiler using the dialect's own quoter.
    #[must_use]
    pub fn new(dialect: &'a Dialect) -> Self {
        Self {
            dialect,
            quoter: &dialect.quoter,
        }
    }

    /// Replaces the quoting collaborator.
    #[must_use]
    pub fn with_quoter(mut self, quoter: &'a dyn Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    /// Compiles a single column fragment.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::MissingFieldName`] or
    /// [`DdlError::UnknownColumnType`] for an invalid field.
    pub fn column(&self, field: &FieldDefinition) -> Result<String> {
        self.columns().compile(field)
    }

    fn columns(&self) -> ColumnCompiler<'a> {
        ColumnCompiler::new(self.dialect, self.quoter)
    }

    /// Compiles the statements creating `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidSchema`] for an empty table name or a schema
    /// without fields, and any column compilation error.
    pub fn compile_create<S>(&self, source: &str, schema: &S) -> Result<CreateStatements>
    where
        S: SchemaProvider + ?Sized,
    {
        let table = self.quoter.name(source);
        if table.is_empty() {
            return Err(DdlError::InvalidSchema("table name is empty".to_string()));
        }
        let fields = schema.fields();
        if fields.is_empty() {
            return Err(DdlError::InvalidSchema(format!(
                "table `{source}` has no fields"
            )));
        }
        let meta = schema.meta();
        let explicit_primary = meta.has_explicit_primary();

        let compiler = self.columns();
        let mut columns = Vec::with_capacity(fields.len());
        let mut primary = None;
        let mut key_declared = false;
        for (name, field) in fields {
            let mut field = field.clone();
            field.name = Some(name.clone());
            if field.is_primary() {
                primary = Some(name.as_str());
            }
            let column = compiler.compile_with(&field, !explicit_primary)?;
            key_declared |= column.declares_key;
            if !column.sql.is_empty() {
                columns.push(column.sql);
            }
        }

        let indexes = build_indexes(
            self.quoter,
            self.dialect.indexes,
            &self.dialect.constraints,
            source,
            &meta.indexes,
        );
        let mut inline = indexes.inline;
        for request in &meta.constraints {
            if let Some(sql) = render_constraint(self.quoter, &self.dialect.constraints, request) {
                inline.push(sql);
            }
        }
        if !explicit_primary && !key_declared {
            if let Some(column) = primary {
                trace!(column, "synthesizing primary key");
                let request = ConstraintRequest::Primary {
                    column: Columns::from(column),
                };
                inline.extend(render_constraint(
                    self.quoter,
                    &self.dialect.constraints,
                    &request,
                ));
            }
        }

        let table_metas = collect_metas(
            self.quoter,
            self.dialect.table_metas,
            &meta.table,
            None,
            None,
        );
        let layout = self.dialect.table_meta_layout;
        let table_metas = if table_metas.is_empty() {
            String::new()
        } else {
            format!("{}{}", layout.prefix, table_metas.join(layout.joiner))
        };

        let constraints: String = inline.iter().map(|sql| format!(",\n{sql}")).collect();
        let sql = format!(
            "CREATE TABLE {table} (\n{}{constraints}){table_metas};",
            columns.join(",\n")
        );
        debug!(dialect = self.dialect.name, %sql, "compiled create table");
        for statement in &indexes.statements {
            debug!(dialect = self.dialect.name, sql = %statement, "compiled create index");
        }

        Ok(CreateStatements {
            table: sql,
            indexes: indexes.statements,
        })
    }

    /// Compiles the statement dropping `source`.
    ///
    /// Returns `None` when the quoted name is empty. A soft drop adds
    /// `IF EXISTS`.
    #[must_use]
    pub fn compile_drop(&self, source: &str, soft: bool) -> Option<String> {
        let table = self.quoter.name(source);
        if table.is_empty() {
            return None;
        }
        let exists = if soft { "IF EXISTS " } else { "" };
        let sql = format!("DROP TABLE {exists}{table};");
        debug!(dialect = self.dialect.name, %sql, "compiled drop table");
        Some(sql)
    }

    /// Creates `source` by executing the table statement, then each index
    /// statement, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns compilation errors and executor failures as
    /// [`DdlError::Execution`].
    pub fn create_schema<E, S>(&self, executor: &mut E, source: &str, schema: &S) -> Result<()>
    where
        E: Executor + ?Sized,
        S: SchemaProvider + ?Sized,
    {
        let statements = self.compile_create(source, schema)?;
        for sql in statements.iter() {
            executor
                .execute(sql)
                .map_err(|e| DdlError::Execution(Box::new(e)))?;
        }
        Ok(())
    }

    /// Drops `source`.
    ///
    /// Returns `Ok(false)` without executing anything when the name is empty.
    ///
    /// # Errors
    ///
    /// Returns executor failures as [`DdlError::Execution`].
    pub fn drop_schema<E>(&self, executor: &mut E, source: &str, soft: bool) -> Result<bool>
    where
        E: Executor + ?Sized,
    {
        let Some(sql) = self.compile_drop(source, soft) else {
            return Ok(false);
        };
        executor
            .execute(&sql)
            .map_err(|e| DdlError::Execution(Box::new(e)))?;
        Ok(true)
    }
}
