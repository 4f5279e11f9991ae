//! MySQL: inline keys, `AUTO_INCREMENT`, `KEY=value` table options.

use super::{float_to_decimal, Dialect, MetaLayout};
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
        ColumnType::new("int")
            .length(11)
            .formatter(Formatter::Integer)
            .increment(),
    ),
    ("float", ColumnType::new("float").formatter(Formatter::Float)),
    (
        "datetime",
        ColumnType::new("datetime").formatter(Formatter::Date(DATETIME_FORMAT)),
    ),
    (
        "time",
        ColumnType::new("time").formatter(Formatter::Date(TIME_FORMAT)),
    ),
    (
        "date",
        ColumnType::new("date").formatter(Formatter::Date(DATE_FORMAT)),
    ),
    ("binary", ColumnType::new("blob")),
    (
        "boolean",
        ColumnType::new("tinyint")
            .length(1)
            .formatter(Formatter::Boolean),
    ),
];

const PRIMARY_KEY: PrimaryKey = PrimaryKey {
    keyword: None,
    clause: "NOT NULL AUTO_INCREMENT",
    declares_key: false,
};

const COLUMN_METAS: MetaTable = &[
    ("charset", MetaDescriptor::new("CHARACTER SET")),
    ("collate", MetaDescriptor::new("COLLATE")),
    ("comment", MetaDescriptor::new("COMMENT").escaped().after()),
];

const TABLE_METAS: MetaTable = &[
    ("charset", MetaDescriptor::new("DEFAULT CHARSET").joined("=")),
    ("collate", MetaDescriptor::new("COLLATE").joined("=")),
    ("engine", MetaDescriptor::new("ENGINE").joined("=")),
];

const CONSTRAINTS: ConstraintTemplates = ConstraintTemplates {
    primary: Some(ConstraintDescriptor::new("PRIMARY KEY ({column})")),
    foreign_key: Some(ConstraintDescriptor::new(
        "FOREIGN KEY ({column}) REFERENCES {to} ({toColumn}) {on}",
    )),
    unique: Some(ConstraintDescriptor::new("UNIQUE {index} ({column})").index("KEY")),
    check: Some(ConstraintDescriptor::new("CHECK ({expr})")),
};

impl Dialect {
    /// The MySQL dialect.
    #[must_use]
    pub fn mysql() -> Self {
        Self {
            name: "mysql",
            types: TypeRegistry::new(TYPES, PRIMARY_KEY),
            lengths: LengthRules::new(
                "char|decimal|int|float|double|year|timestamp",
                "decimal|float|double",
            ),
            rewrite_keyword: float_to_decimal,
            clauses: ClauseRules {
                not_null_default: NotNullDefault::DefaultFirst,
                explicit_null: ExplicitNull::Keywords(&["datetime"]),
            },
            column_metas: COLUMN_METAS,
            table_metas: TABLE_METAS,
            table_meta_layout: MetaLayout {
                prefix: "\n",
                joiner: ",\n",
            },
            constraints: CONSTRAINTS,
            indexes: IndexStrategy::Inline,
            quoter: StandardQuoter::new('`', '`'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::field;

    #[test]
    fn test_float_with_precision_is_decimal() {
        let dialect = Dialect::mysql();
        let sql = dialect
            .compiler()
            .column(&field("testName").ty("float").length(10).precision(2))
            .unwrap();
        assert_eq!(sql, "`testName` decimal(10,2)");
    }

    #[test]
    fn test_plain_float_has_no_suffix() {
        let dialect = Dialect::mysql();
        let sql = dialect.compiler().column(&field("ratio").ty("float")).unwrap();
        assert_eq!(sql, "`ratio` float");
    }
}
