//! SQLite: `PRIMARY KEY AUTOINCREMENT` columns and globally named indexes.

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
    ("string", ColumnType::new("text").length(255)),
    ("text", ColumnType::new("text")),
    (
        "integer",
        ColumnType::new("integer")
            .formatter(Formatter::Integer)
            .increment(),
    ),
    ("float", ColumnType::new("real").formatter(Formatter::Float)),
    (
        "fixed",
        ColumnType::new("numeric")
            .length(10)
            .precision(2)
            .formatter(Formatter::Float),
    ),
    (
        "timestamp",
        ColumnType::new("numeric").formatter(Formatter::Date(DATETIME_FORMAT)),
    ),
    (
        "datetime",
        ColumnType::new("numeric").formatter(Formatter::Date(DATETIME_FORMAT)),
    ),
    (
        "time",
        ColumnType::new("numeric").formatter(Formatter::Date(TIME_FORMAT)),
    ),
    (
        "date",
        ColumnType::new("numeric").formatter(Formatter::Date(DATE_FORMAT)),
    ),
    ("binary", ColumnType::new("blob")),
    (
        "boolean",
        ColumnType::new("numeric").length(1).formatter(Formatter::Boolean),
    ),
];

const PRIMARY_KEY: PrimaryKey = PrimaryKey {
    keyword: None,
    clause: "PRIMARY KEY AUTOINCREMENT",
    declares_key: true,
};

const COLUMN_METAS: MetaTable = &[(
    "collate",
    MetaDescriptor::new("COLLATE")
        .escaped()
        .options(&["BINARY", "NOCASE", "RTRIM"]),
)];

const CONSTRAINTS: ConstraintTemplates = ConstraintTemplates {
    primary: Some(ConstraintDescriptor::new("PRIMARY KEY ({column})")),
    foreign_key: Some(ConstraintDescriptor::new(
        "FOREIGN KEY ({column}) REFERENCES {to} ({toColumn}) {on}",
    )),
    unique: Some(ConstraintDescriptor::new("UNIQUE {index} ({column})")),
    check: Some(ConstraintDescriptor::new("CHECK ({expr})")),
};

impl Dialect {
    /// The SQLite dialect.
    #[must_use]
    pub fn sqlite() -> Self {
        Self {
            name: "sqlite",
            types: TypeRegistry::new(TYPES, PRIMARY_KEY),
            lengths: LengthRules::new(
                "^(integer|real|numeric|text)$",
                "^(integer|real|numeric)$",
            ),
            rewrite_keyword: float_to_numeric,
            clauses: ClauseRules {
                not_null_default: NotNullDefault::NotNullFirst,
                explicit_null: ExplicitNull::Always,
            },
            column_metas: COLUMN_METAS,
            table_metas: &[],
            table_meta_layout: MetaLayout {
                prefix: " ",
                joiner: " ",
            },
            constraints: CONSTRAINTS,
            indexes: IndexStrategy::Separate {
                table_prefix: true,
                quote_names: true,
            },
            quoter: StandardQuoter::new('"', '"'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::field;

    #[test]
    fn test_fixed_uses_default_precision() {
        let dialect = Dialect::sqlite();
        let sql = dialect.compiler().column(&field("price").ty("fixed")).unwrap();
        assert_eq!(sql, "\"price\" numeric(10,2)");
    }

    #[test]
    fn test_boolean_is_numeric() {
        let dialect = Dialect::sqlite();
        let sql = dialect
            .compiler()
            .column(&field("active").ty("boolean").default_value(true))
            .unwrap();
        assert_eq!(sql, "\"active\" numeric(1) DEFAULT 1");
    }

    #[test]
    fn test_collate_outside_whitelist_is_dropped() {
        let dialect = Dialect::sqlite();
        let sql = dialect
            .compiler()
            .column(&field("name").meta("collate", "utf8_bin"))
            .unwrap();
        assert_eq!(sql, "\"name\" text(255)");
    }
}
