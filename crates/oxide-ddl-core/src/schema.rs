//! Dialect-neutral table schema.
//!
//! A [`TableSchema`] is an ordered set of [`FieldDefinition`]s plus a
//! [`SchemaMeta`] bag holding indexes, constraints and table-level metas. It
//! can be assembled with the fluent builders or parsed from JSON:
//!
//! ```
//! use oxide_ddl_core::schema::TableSchema;
//!
//! let schema = TableSchema::from_json(
//!     r#"{
//!         "fields": {
//!             "id": {"type": "integer", "key": "primary"},
//!             "title": "string"
//!         },
//!         "meta": {"table": {"engine": "InnoDB"}}
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(schema.fields.len(), 2);
//! ```

use std::slice;

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DdlError, Result};
use crate::value::{DefaultValue, Value};

/// Key marker on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// `"primary"`.
    Primary,
    /// Any other key kind; ignored by the compiler.
    Other,
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("primary") {
            Self::Primary
        } else {
            Self::Other
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Primary => "primary".to_string(),
            Key::Other => "other".to_string(),
        }
    }
}

/// One column's request.
///
/// Keys other than the typed ones land in [`FieldDefinition::metas`] and are
/// matched against the dialect's column meta descriptors (`charset`,
/// `collate`, `comment`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefinition {
    /// Column name. Synthesized from the schema's field key when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Abstract type; `string` when absent.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Length override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Precision override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Nullability: unset, nullable or not null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null: Option<bool>,
    /// Key marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    /// Explicit native type, replacing the registry keyword.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,
    /// Dialect meta attributes, in declaration order.
    ///
    /// Only scalar values are kept; other unrecognized keys are ignored.
    #[serde(flatten, deserialize_with = "deserialize_metas")]
    pub metas: IndexMap<String, Value>,
}

impl FieldDefinition {
    /// Creates an empty field definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the abstract type.
    #[must_use]
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Sets the length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the precision.
    #[must_use]
    pub const fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets a literal or raw default.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets a raw SQL expression default such as `CURRENT_TIMESTAMP`.
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::raw(expr));
        self
    }

    /// Marks the column as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = Some(true);
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.null = Some(false);
        self
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.key = Some(Key::Primary);
        self
    }

    /// Forces a native type.
    #[must_use]
    pub fn using(mut self, native: impl Into<String>) -> Self {
        self.use_type = Some(native.into());
        self
    }

    /// Adds a dialect meta attribute.
    #[must_use]
    pub fn meta(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metas.insert(name.into(), value.into());
        self
    }

    /// Returns true if the field is marked as the primary key.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.key == Some(Key::Primary)
    }
}

/// Starts a named field definition.
#[must_use]
pub fn field(name: impl Into<String>) -> FieldDefinition {
    FieldDefinition {
        name: Some(name.into()),
        ..FieldDefinition::default()
    }
}

/// One column name or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Columns {
    /// A single column.
    One(String),
    /// Several columns, in declaration order.
    Many(Vec<String>),
}

impl Columns {
    /// Iterates the column names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Self::One(name) => slice::from_ref(name),
            Self::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl From<&str> for Columns {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for Columns {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(ToString::to_string).collect())
    }
}

/// A check expression: raw SQL or a condition map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckExpr {
    /// Used verbatim.
    Raw(String),
    /// Column to predicate, compiled and joined with `AND`.
    Conditions(IndexMap<String, Predicate>),
}

/// Predicate on one column of a check expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Predicate {
    /// Operator to operand, e.g. `{">": 0}`.
    Compare(IndexMap<String, Value>),
    /// Equality with a literal.
    Equals(Value),
}

impl Predicate {
    /// Builds a single-operator comparison.
    #[must_use]
    pub fn compare(operator: impl Into<String>, operand: impl Into<Value>) -> Self {
        let mut map = IndexMap::new();
        map.insert(operator.into(), operand.into());
        Self::Compare(map)
    }
}

/// One constraint instance, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintRequest {
    /// `PRIMARY KEY (...)`.
    Primary {
        /// Key columns.
        column: Columns,
    },
    /// `FOREIGN KEY (...) REFERENCES ...`.
    ForeignKey {
        /// Referencing columns.
        column: Columns,
        /// Referenced table.
        to: String,
        /// Referenced columns.
        #[serde(rename = "toColumn")]
        to_column: Columns,
        /// Referential action, e.g. `DELETE CASCADE`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on: Option<String>,
    },
    /// `UNIQUE (...)`.
    Unique {
        /// Unique columns.
        column: Columns,
        /// Emits the dialect's index token (`UNIQUE KEY` on MySQL).
        #[serde(default, alias = "key")]
        index: bool,
    },
    /// `CHECK (...)`.
    Check {
        /// The checked expression.
        expr: CheckExpr,
    },
    /// Any other kind. Skipped when rendering.
    #[serde(other)]
    Unknown,
}

/// A named index request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRequest {
    /// Indexed columns.
    pub column: Columns,
    /// Whether the index is unique.
    #[serde(default)]
    pub unique: bool,
}

impl IndexRequest {
    /// Creates a non-unique index request.
    #[must_use]
    pub fn new(column: impl Into<Columns>) -> Self {
        Self {
            column: column.into(),
            unique: false,
        }
    }

    /// Makes the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Index name reserved for the primary key.
pub const PRIMARY_INDEX: &str = "PRIMARY";

/// Indexes, constraints and table metas of a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMeta {
    /// Named indexes; `PRIMARY` denotes the primary key.
    pub indexes: IndexMap<String, IndexRequest>,
    /// Table constraints.
    pub constraints: Vec<ConstraintRequest>,
    /// Table-level meta attributes (engine, charset, tablespace, ...).
    #[serde(alias = "tableMetas")]
    pub table: IndexMap<String, Value>,
}

impl SchemaMeta {
    /// Returns true if an explicit primary key index or constraint is declared.
    #[must_use]
    pub fn has_explicit_primary(&self) -> bool {
        self.indexes.contains_key(PRIMARY_INDEX)
            || self
                .constraints
                .iter()
                .any(|c| matches!(c, ConstraintRequest::Primary { .. }))
    }
}

/// Read access to a table schema.
pub trait SchemaProvider {
    /// Field definitions in declaration order.
    fn fields(&self) -> &IndexMap<String, FieldDefinition>;

    /// Indexes, constraints and table metas.
    fn meta(&self) -> &SchemaMeta;
}

/// A dialect-neutral table definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Field definitions keyed by column name.
    #[serde(deserialize_with = "deserialize_fields")]
    pub fields: IndexMap<String, FieldDefinition>,
    /// Indexes, constraints and table metas.
    #[serde(default)]
    pub meta: SchemaMeta,
}

impl TableSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidSchema`] if the document does not describe a
    /// schema.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DdlError::InvalidSchema(e.to_string()))
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }

    /// Adds a named index.
    #[must_use]
    pub fn index(mut self, name: impl Into<String>, request: IndexRequest) -> Self {
        self.meta.indexes.insert(name.into(), request);
        self
    }

    /// Adds a constraint.
    #[must_use]
    pub fn constraint(mut self, request: ConstraintRequest) -> Self {
        self.meta.constraints.push(request);
        self
    }

    /// Adds a table-level meta attribute.
    #[must_use]
    pub fn table_meta(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.table.insert(name.into(), value.into());
        self
    }
}

impl SchemaProvider for TableSchema {
    fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    fn meta(&self) -> &SchemaMeta {
        &self.meta
    }
}

/// An extra field key: a scalar meta value, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum MetaRepr {
    Scalar(Value),
    Other(IgnoredAny),
}

fn deserialize_metas<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let metas = IndexMap::<String, MetaRepr>::deserialize(deserializer)?;
    Ok(metas
        .into_iter()
        .filter_map(|(name, repr)| match repr {
            MetaRepr::Scalar(value) => Some((name, value)),
            MetaRepr::Other(_) => None,
        })
        .collect())
}

/// A field is either a full definition or just its abstract type name.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRepr {
    Type(String),
    Full(FieldDefinition),
}

fn deserialize_fields<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, FieldDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let fields = IndexMap::<String, FieldRepr>::deserialize(deserializer)?;
    Ok(fields
        .into_iter()
        .map(|(name, repr)| {
            let definition = match repr {
                FieldRepr::Type(ty) => FieldDefinition::new().ty(ty),
                FieldRepr::Full(definition) => definition,
            };
            (name, definition)
        })
        .collect())
}
