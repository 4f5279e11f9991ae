//! Dialect configuration.
//!
//! A [`Dialect`] is immutable data: a type registry, length rules, clause
//! policy, meta and constraint tables, the index strategy and a default
//! quoter. The compiler is shared by every dialect; only this data differs.

mod mysql;
mod postgres;
mod sqlite;

use crate::column::ClauseRules;
use crate::compiler::SchemaCompiler;
use crate::constraint::ConstraintTemplates;
use crate::index::IndexStrategy;
use crate::meta::MetaTable;
use crate::quote::StandardQuoter;
use crate::types::{LengthRules, TypeRegistry};

/// Rewrites the native keyword from the abstract type and precision.
pub type KeywordRewrite = fn(ty: &str, precision: Option<u32>) -> Option<&'static str>;

/// Placement of the table meta list after the closing parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaLayout {
    /// Inserted before the first meta.
    pub prefix: &'static str,
    /// Inserted between metas.
    pub joiner: &'static str,
}

/// SQL dialect configuration.
#[derive(Debug, Clone)]
pub struct Dialect {
    /// Dialect name.
    pub name: &'static str,
    /// Abstract type registry.
    pub types: TypeRegistry,
    /// Keywords accepting a length and precision.
    pub lengths: LengthRules,
    /// Native keyword rewrite applied when no explicit `use` is given.
    pub rewrite_keyword: KeywordRewrite,
    /// NULL/DEFAULT clause policy.
    pub clauses: ClauseRules,
    /// Column meta descriptors.
    pub column_metas: MetaTable,
    /// Table meta descriptors.
    pub table_metas: MetaTable,
    /// Layout of the table meta list.
    pub table_meta_layout: MetaLayout,
    /// Constraint templates.
    pub constraints: ConstraintTemplates,
    /// Index strategy.
    pub indexes: IndexStrategy,
    /// Default quoter.
    pub quoter: StandardQuoter,
}

impl Dialect {
    /// Returns a dialect by name.
    ///
    /// Accepts `mysql`, `postgres`/`postgresql`/`pgsql` and
    /// `sqlite`/`sqlite3`, case-insensitively.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mysql" => Some(Self::mysql()),
            "postgres" | "postgresql" | "pgsql" => Some(Self::postgres()),
            "sqlite" | "sqlite3" => Some(Self::sqlite()),
            _ => None,
        }
    }

    /// Returns a schema compiler using this dialect's quoter.
    #[must_use]
    pub fn compiler(&self) -> SchemaCompiler<'_> {
        SchemaCompiler::new(self)
    }
}

/// `float` with a precision becomes `decimal`.
fn float_to_decimal(ty: &str, precision: Option<u32>) -> Option<&'static str> {
    (ty == "float" && precision.is_some()).then_some("decimal")
}

/// `float` with a precision becomes `numeric`.
fn float_to_numeric(ty: &str, precision: Option<u32>) -> Option<&'static str> {
    (ty == "float" && precision.is_some()).then_some("numeric")
}
