//! Column compiler.
//!
//! Turns one [`FieldDefinition`] into a column fragment such as
//! `` `testName` varchar(32) DEFAULT NULL COMMENT 'test' ``. The order of the
//! fragment is fixed: name, native type with its length suffix, metas placed
//! before the clause, the key/NULL/DEFAULT clause, metas placed after it.

use crate::dialect::Dialect;
use crate::error::{DdlError, Result};
use crate::meta::{collect_metas, Position};
use crate::quote::Quoter;
use crate::schema::FieldDefinition;
use crate::types::Formatter;
use crate::value::DefaultValue;

/// Token order of a `NOT NULL` column with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotNullDefault {
    /// `NOT NULL DEFAULT x`.
    NotNullFirst,
    /// `DEFAULT x NOT NULL`.
    DefaultFirst,
}

/// Which native keywords render a nullable column as bare `NULL`.
///
/// Every other nullable column renders `DEFAULT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitNull {
    /// All keywords.
    Always,
    /// Only the listed keywords.
    Keywords(&'static [&'static str]),
}

impl ExplicitNull {
    fn is_bare(self, keyword: &str) -> bool {
        match self {
            Self::Always => true,
            Self::Keywords(keywords) => keywords.contains(&keyword),
        }
    }
}

/// NULL/DEFAULT clause policy of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseRules {
    /// Order of the NOT NULL/DEFAULT pair.
    pub not_null_default: NotNullDefault,
    /// Keywords rendering a bare `NULL`.
    pub explicit_null: ExplicitNull,
}

/// A compiled column fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledColumn {
    /// The SQL fragment.
    pub sql: String,
    /// Whether the fragment itself declares the primary key.
    pub declares_key: bool,
}

/// Compiles field definitions into column fragments for one dialect.
#[derive(Clone, Copy)]
pub struct ColumnCompiler<'a> {
    dialect: &'a Dialect,
    quoter: &'a dyn Quoter,
}

impl<'a> ColumnCompiler<'a> {
    /// Creates a column compiler.
    #[must_use]
    pub fn new(dialect: &'a Dialect, quoter: &'a dyn Quoter) -> Self {
        Self { dialect, quoter }
    }

    /// Compiles a field definition into a column fragment.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::MissingFieldName`] if the field has no name and
    /// [`DdlError::UnknownColumnType`] if its type is not registered.
    pub fn compile(&self, field: &FieldDefinition) -> Result<String> {
        self.compile_with(field, true).map(|column| column.sql)
    }

    /// Compiles a field definition.
    ///
    /// `inline_key` allows an auto-incrementing primary key to declare the
    /// key in the column itself when the dialect does so (SQLite
    /// `PRIMARY KEY AUTOINCREMENT`). When a table-level primary key is
    /// declared elsewhere it must be `false`.
    ///
    /// # Errors
    ///
    /// See [`ColumnCompiler::compile`].
    pub fn compile_with(&self, field: &FieldDefinition, inline_key: bool) -> Result<CompiledColumn> {
        let name = field
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(DdlError::MissingFieldName)?;
        let ty = field.ty.as_deref().unwrap_or("string");
        let column_type = self.dialect.types.resolve(ty)?;

        let length = field.length.or(column_type.length);
        let precision = field.precision.or(column_type.precision);
        let numeric = matches!(
            column_type.formatter,
            Formatter::Integer | Formatter::Float | Formatter::Boolean
        );
        let default = field
            .default
            .as_ref()
            .filter(|default| !(numeric && default.is_empty_text()));

        let mut keyword = match &field.use_type {
            Some(native) => native.to_ascii_lowercase(),
            None => (self.dialect.rewrite_keyword)(ty, precision)
                .unwrap_or(column_type.keyword)
                .to_string(),
        };

        let primary_key = self.dialect.types.primary_key();
        let increments =
            field.is_primary() && column_type.increment && keyword == column_type.keyword;
        if increments {
            if let Some(serial) = primary_key.keyword {
                keyword = serial.to_string();
            }
        }

        let suffix = self.dialect.lengths.suffix(&keyword, length, precision);
        let mut parts = vec![self.quoter.name(name), format!("{keyword}{suffix}")];
        parts.extend(self.metas(field, Position::Before));

        let mut declares_key = false;
        let clause = if increments && (inline_key || !primary_key.declares_key) {
            declares_key = primary_key.declares_key;
            primary_key.clause.to_string()
        } else if field.is_primary() {
            "NOT NULL".to_string()
        } else {
            self.null_default(default, field.null, &keyword, column_type.formatter)
        };
        parts.push(clause);
        parts.extend(self.metas(field, Position::After));

        parts.retain(|part| !part.is_empty());
        Ok(CompiledColumn {
            sql: parts.join(" "),
            declares_key,
        })
    }

    fn metas(&self, field: &FieldDefinition, position: Position) -> Vec<String> {
        collect_metas(
            self.quoter,
            self.dialect.column_metas,
            &field.metas,
            None,
            Some(position),
        )
    }

    fn null_default(
        &self,
        default: Option<&DefaultValue>,
        null: Option<bool>,
        keyword: &str,
        formatter: Formatter,
    ) -> String {
        let rules = self.dialect.clauses;
        match (default, null) {
            (Some(default), Some(false)) => {
                let value = self.default_sql(default, formatter);
                match rules.not_null_default {
                    NotNullDefault::NotNullFirst => format!("NOT NULL DEFAULT {value}"),
                    NotNullDefault::DefaultFirst => format!("DEFAULT {value} NOT NULL"),
                }
            }
            (Some(default), _) => format!("DEFAULT {}", self.default_sql(default, formatter)),
            (None, Some(true)) if rules.explicit_null.is_bare(keyword) => "NULL".to_string(),
            (None, Some(true)) => "DEFAULT NULL".to_string(),
            (None, Some(false)) => "NOT NULL".to_string(),
            (None, None) => String::new(),
        }
    }

    fn default_sql(&self, default: &DefaultValue, formatter: Formatter) -> String {
        match default {
            DefaultValue::Raw(expr) => expr.clone(),
            DefaultValue::Literal(value) => self.quoter.value(value, formatter),
        }
    }
}
