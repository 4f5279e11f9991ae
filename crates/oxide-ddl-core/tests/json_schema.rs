//! Schemas described in JSON and through the builders compile the same way.

mod common;

use oxide_ddl_core::schema::{field, IndexRequest, TableSchema};
use oxide_ddl_core::{Columns, ConstraintRequest, DdlError, Dialect, SchemaProvider};

#[test]
fn builder_and_json_agree() {
    let json = common::schema(
        r#"{
            "fields": {
                "id": {"type": "integer", "key": "primary"},
                "email": {"type": "string", "length": 128, "null": false},
                "created": {"type": "datetime", "default": {"raw": "CURRENT_TIMESTAMP"}}
            },
            "meta": {
                "indexes": {"email": {"column": "email", "unique": true}},
                "constraints": [{"type": "unique", "column": "email"}]
            }
        }"#,
    );
    let built = TableSchema::new()
        .field("id", field("id").ty("integer").primary_key())
        .field("email", field("email").length(128).not_null())
        .field(
            "created",
            field("created").ty("datetime").default_expr("CURRENT_TIMESTAMP"),
        )
        .index("email", IndexRequest::new("email").unique())
        .constraint(ConstraintRequest::Unique {
            column: Columns::from("email"),
            index: false,
        });

    for dialect in [Dialect::mysql(), Dialect::postgres(), Dialect::sqlite()] {
        let compiler = dialect.compiler();
        assert_eq!(
            compiler.compile_create("users", &json).unwrap(),
            compiler.compile_create("users", &built).unwrap(),
            "{}",
            dialect.name
        );
    }
}

#[test]
fn field_order_is_preserved() {
    let schema = common::schema(r#"{"fields": {"z": "string", "a": "string", "m": "string"}}"#);
    let names: Vec<_> = schema.fields().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["z", "a", "m"]);

    let sql = Dialect::sqlite()
        .compiler()
        .compile_create("t", &schema)
        .unwrap()
        .table;
    assert_eq!(
        sql,
        "CREATE TABLE \"t\" (\n\"z\" text(255),\n\"a\" text(255),\n\"m\" text(255));"
    );
}

#[test]
fn schema_without_fields_is_invalid() {
    let schema = common::schema(r#"{"fields": {}}"#);
    let err = Dialect::mysql()
        .compiler()
        .compile_create("t", &schema)
        .unwrap_err();
    assert!(matches!(err, DdlError::InvalidSchema(_)));

    assert!(matches!(
        TableSchema::from_json(r#"{"meta": {}}"#),
        Err(DdlError::InvalidSchema(_))
    ));
}

#[test]
fn numeric_empty_default_matches_absent_default() {
    for dialect in [Dialect::mysql(), Dialect::postgres(), Dialect::sqlite()] {
        for ty in ["integer", "float", "boolean"] {
            assert_eq!(
                common::column(&dialect, &format!(r#"{{"name": "n", "type": "{ty}", "default": ""}}"#)),
                common::column(&dialect, &format!(r#"{{"name": "n", "type": "{ty}"}}"#)),
                "{} {ty}",
                dialect.name
            );
        }
    }
}
