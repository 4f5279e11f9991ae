//! PostgreSQL: `serial` keys, table-scoped index statements, tablespaces.

use super::{float_to_numeric, Dialect, MetaLayout};
use crate::column::{ClauseRules, ExplicitNull, NotNullDefault};
use crate::constraint::{ConstraintDescriptor, ConstraintTemplates};
use crate::index::IndexStrategy;
use crate::meta::{MetaDescriptor, MetaTable};
use crate::quote::StandardQuoter;
use crate::types::{
    ColumnType, Formatter, LengthRules, PrimaryKey, TypeRegistry, DATETIME_FORMAT, DATE_FORMAT,
    TIME_FORMAT,
};

const TYPES: &[(&str, ColumnType)] = &[
    ("string", ColumnType::new("varchar").length(255)),
    ("text", ColumnType::new("text")),
    (
        "integer",
        ColumnType::new("integer")
            .formatter(Formatter::Integer)
            .increment(),
    ),
    ("float", ColumnType::new("float").formatter(Formatter::Float)),
    (
        "datetime",
        ColumnType::new("timestamp").formatter(Formatter::Date(DATETIME_FORMAT)),
    ),
    (
        "time",
        ColumnType::new("time").formatter(Formatter::Date(TIME_FORMAT)),
    ),
    (
        "date",
        ColumnType::new("date").formatter(Formatter::Date(DATE_FORMAT)),
    ),
    ("binary", ColumnType::new("bytea")),
    (
        "boolean",
        ColumnType::new("boolean").formatter(Formatter::Boolean),
    ),
    ("number", ColumnType::new("numeric").formatter(Formatter::Float)),
    ("inet", ColumnType::new("inet")),
];

const PRIMARY_KEY: PrimaryKey = PrimaryKey {
    keyword: Some("serial"),
    clause: "NOT NULL",
    declares_key: false,
};

const TABLE_METAS: MetaTable = &[("tablespace", MetaDescriptor::new("TABLESPACE"))];

const CONSTRAINTS: ConstraintTemplates = ConstraintTemplates {
    primary: Some(ConstraintDescriptor::new("PRIMARY KEY ({column})")),
    foreign_key: Some(ConstraintDescriptor::new(
        "FOREIGN KEY ({column}) REFERENCES {to} ({toColumn}) {on}",
    )),
    unique: Some(ConstraintDescriptor::new("UNIQUE ({column})")),
    check: Some(ConstraintDescriptor::new("CHECK ({expr})")),
};

impl Dialect {
    /// The PostgreSQL dialect.
    #[must_use]
    pub fn postgres() -> Self {
        Self {
            name: "postgresql",
            types: TypeRegistry::new(TYPES, PRIMARY_KEY),
            lengths: LengthRules::new("char|numeric|interval|bit|time", "^numeric$"),
            rewrite_keyword: float_to_numeric,
            clauses: ClauseRules {
                not_null_default: NotNullDefault::NotNullFirst,
                explicit_null: ExplicitNull::Keywords(&["timestamp"]),
            },
            column_metas: &[],
            table_metas: TABLE_METAS,
            table_meta_layout: MetaLayout {
                prefix: " ",
                joiner: " ",
            },
            constraints: CONSTRAINTS,
            indexes: IndexStrategy::Separate {
                table_prefix: false,
                quote_names: false,
            },
            quoter: StandardQuoter::new('"', '"').booleans("TRUE", "FALSE"),
        }
    }
}
