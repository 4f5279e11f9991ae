//! Type registry: abstract column types to native type defaults.
//!
//! Every dialect owns a static table mapping abstract type names (`string`,
//! `integer`, `float`, `datetime`, ...) to a [`ColumnType`] describing the
//! native keyword and its default length, precision and literal formatter.

use regex::Regex;

use crate::error::{DdlError, Result};

/// Date format used by `datetime` columns.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date format used by `date` columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Date format used by `time` columns.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// How literals for a column type are formatted by the quoting collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Integers are emitted bare.
    Integer,
    /// Floats are emitted bare.
    Float,
    /// Booleans use the dialect's boolean literals.
    Boolean,
    /// Dates are normalized with the given `chrono` format and quoted.
    Date(&'static str),
    /// Everything is quoted as a string.
    String,
}

/// Native type defaults for one abstract column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnType {
    /// Native keyword (e.g. `varchar`).
    pub keyword: &'static str,
    /// Default length.
    pub length: Option<u32>,
    /// Default precision.
    pub precision: Option<u32>,
    /// Literal formatter.
    pub formatter: Formatter,
    /// Whether a primary key of this type auto-increments.
    pub increment: bool,
}

impl ColumnType {
    /// Creates a type descriptor with no length and a string formatter.
    #[must_use]
    pub const fn new(keyword: &'static str) -> Self {
        Self {
            keyword,
            length: None,
            precision: None,
            formatter: Formatter::String,
            increment: false,
        }
    }

    /// Sets the default length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the default precision.
    #[must_use]
    pub const fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the literal formatter.
    #[must_use]
    pub const fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Marks primary keys of this type as auto-incrementing.
    #[must_use]
    pub const fn increment(mut self) -> Self {
        self.increment = true;
        self
    }
}

/// Rendering of an auto-incrementing primary key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Replacement native keyword (PostgreSQL `serial`), if any.
    pub keyword: Option<&'static str>,
    /// Clause emitted in place of the NULL/DEFAULT clause.
    pub clause: &'static str,
    /// Whether the clause itself declares the primary key.
    pub declares_key: bool,
}

/// Static table of abstract column types for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistry {
    types: &'static [(&'static str, ColumnType)],
    primary_key: PrimaryKey,
}

impl TypeRegistry {
    /// Creates a registry from a static type table.
    #[must_use]
    pub const fn new(types: &'static [(&'static str, ColumnType)], primary_key: PrimaryKey) -> Self {
        Self { types, primary_key }
    }

    /// Looks up an abstract type.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::UnknownColumnType`] when the type is not registered.
    pub fn resolve(&self, ty: &str) -> Result<&ColumnType> {
        self.types
            .iter()
            .find(|(name, _)| *name == ty)
            .map(|(_, column_type)| column_type)
            .ok_or_else(|| DdlError::UnknownColumnType(ty.to_string()))
    }

    /// Returns the auto-increment primary key rule.
    #[must_use]
    pub const fn primary_key(&self) -> &PrimaryKey {
        &self.primary_key
    }

    /// Returns the registered abstract type names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.iter().map(|(name, _)| *name)
    }
}

/// Native keywords that accept a parenthesized length and precision.
#[derive(Debug, Clone)]
pub struct LengthRules {
    length: Regex,
    precision: Regex,
}

impl LengthRules {
    /// Creates the rules from two keyword patterns.
    ///
    /// # Panics
    ///
    /// Panics if either pattern is not a valid regular expression.
    #[must_use]
    pub fn new(length: &str, precision: &str) -> Self {
        Self {
            length: Regex::new(length).expect("length keyword pattern"),
            precision: Regex::new(precision).expect("precision keyword pattern"),
        }
    }

    /// Returns true if the keyword accepts a length.
    #[must_use]
    pub fn accepts_length(&self, keyword: &str) -> bool {
        self.length.is_match(keyword)
    }

    /// Returns true if the keyword accepts a precision after its length.
    #[must_use]
    pub fn accepts_precision(&self, keyword: &str) -> bool {
        self.accepts_length(keyword) && self.precision.is_match(keyword)
    }

    /// Renders the `(length[,precision])` suffix for a keyword, if any.
    #[must_use]
    pub fn suffix(&self, keyword: &str, length: Option<u32>, precision: Option<u32>) -> String {
        match length {
            Some(length) if self.accepts_length(keyword) => match precision {
                Some(precision) if self.accepts_precision(keyword) => {
                    format!("({length},{precision})")
                }
                _ => format!("({length})"),
            },
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &[(&str, ColumnType)] = &[
        ("string", ColumnType::new("varchar").length(255)),
        (
            "integer",
            ColumnType::new("int")
                .length(11)
                .formatter(Formatter::Integer)
                .increment(),
        ),
    ];

    const PRIMARY: PrimaryKey = PrimaryKey {
        keyword: None,
        clause: "NOT NULL AUTO_INCREMENT",
        declares_key: false,
    };

    #[test]
    fn test_resolve_known_type() {
        let registry = TypeRegistry::new(TYPES, PRIMARY);
        let ty = registry.resolve("integer").unwrap();
        assert_eq!(ty.keyword, "int");
        assert_eq!(ty.length, Some(11));
        assert!(ty.increment);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["string", "integer"]);
    }

    #[test]
    fn test_resolve_unknown_type_fails() {
        let registry = TypeRegistry::new(TYPES, PRIMARY);
        let err = registry.resolve("varchar(255)").unwrap_err();
        assert!(matches!(err, DdlError::UnknownColumnType(ref ty) if ty == "varchar(255)"));
    }

    #[test]
    fn test_length_suffix() {
        let rules = LengthRules::new("char|decimal|int", "decimal");
        assert_eq!(rules.suffix("varchar", Some(32), None), "(32)");
        assert_eq!(rules.suffix("varchar", Some(32), Some(2)), "(32)");
        assert_eq!(rules.suffix("decimal", Some(10), Some(2)), "(10,2)");
        assert_eq!(rules.suffix("text", Some(10), Some(2)), "");
        assert_eq!(rules.suffix("decimal", None, Some(2)), "");
    }
}
