//! MySQL output: inline keys, `KEY=value` table options, backtick quoting.

mod common;

use common::{column, create, schema};
use oxide_ddl_core::{DdlError, Dialect, RecordingExecutor};

#[test]
fn string_columns() {
    let dialect = Dialect::mysql();
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "testName", "type": "string", "length": 32, "null": true, "comment": "test"}"#
        ),
        "`testName` varchar(32) DEFAULT NULL COMMENT 'test'"
    );
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "testName", "type": "string", "length": 32, "null": false,
                "charset": "utf8", "collate": "utf8_unicode_ci"}"#
        ),
        "`testName` varchar(32) CHARACTER SET utf8 COLLATE utf8_unicode_ci NOT NULL"
    );
}

#[test]
fn float_with_precision() {
    let dialect = Dialect::mysql();
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "testName", "type": "float", "length": 10, "precision": 2}"#
        ),
        "`testName` decimal(10,2)"
    );
}

#[test]
fn datetime_columns() {
    let dialect = Dialect::mysql();
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "created", "type": "datetime", "default": {"raw": "CURRENT_TIMESTAMP"}, "null": false}"#
        ),
        "`created` datetime DEFAULT CURRENT_TIMESTAMP NOT NULL"
    );
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "created", "type": "datetime", "default": {"raw": "CURRENT_TIMESTAMP"}, "null": true}"#
        ),
        "`created` datetime DEFAULT CURRENT_TIMESTAMP"
    );
    assert_eq!(
        column(&dialect, r#"{"name": "modified", "type": "datetime", "null": true}"#),
        "`modified` datetime NULL"
    );
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "modified", "type": "datetime", "default": null, "null": true}"#
        ),
        "`modified` datetime NULL"
    );
}

#[test]
fn integer_defaults_are_cast() {
    let dialect = Dialect::mysql();
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "testName", "type": "integer", "length": 11, "default": 1}"#
        ),
        "`testName` int(11) DEFAULT 1"
    );
    assert_eq!(
        column(
            &dialect,
            r#"{"name": "testName", "type": "integer", "length": 11, "default": "1"}"#
        ),
        "`testName` int(11) DEFAULT 1"
    );
}

#[test]
fn unknown_type_is_reported() {
    let dialect = Dialect::mysql();
    let schema = schema(r#"{"fields": {"testName": {"type": "varchar(255)", "null": true}}}"#);
    let err = dialect
        .compiler()
        .compile_create("test_table", &schema)
        .unwrap_err();
    assert!(matches!(err, DdlError::UnknownColumnType(_)));
    assert_eq!(err.to_string(), "Column type `varchar(255)` does not exist.");
}

#[test]
fn create_schema_with_table_metas() {
    let dialect = Dialect::mysql();
    let schema = schema(
        r#"{
            "fields": {
                "id": {"type": "integer", "key": "primary"},
                "stringy": {"type": "string", "length": 128, "null": true,
                            "charset": "cp1250", "collate": "cp1250_general_ci"},
                "other_col": {"type": "string", "null": false,
                              "charset": "latin1", "comment": "Test Comment"}
            },
            "meta": {
                "indexes": {"PRIMARY": {"column": "id"}},
                "table": {"charset": "utf8", "collate": "utf8_unicode_ci", "engine": "InnoDB"}
            }
        }"#,
    );

    let mut recorder = RecordingExecutor::new();
    assert!(dialect
        .compiler()
        .drop_schema(&mut recorder, "test_table", true)
        .unwrap());

    let expected = "CREATE TABLE `test_table` (\n\
        `id` int(11) NOT NULL AUTO_INCREMENT,\n\
        `stringy` varchar(128) CHARACTER SET cp1250 COLLATE cp1250_general_ci DEFAULT NULL,\n\
        `other_col` varchar(255) CHARACTER SET latin1 NOT NULL COMMENT 'Test Comment',\n\
        PRIMARY KEY (`id`))\n\
        DEFAULT CHARSET=utf8,\n\
        COLLATE=utf8_unicode_ci,\n\
        ENGINE=InnoDB;";
    assert_eq!(create(&dialect, "test_table", &schema), vec![expected]);
}

#[test]
fn primary_key_is_synthesized_from_field() {
    let dialect = Dialect::mysql();
    let schema = schema(r#"{"fields": {"id": {"type": "integer", "key": "primary"}, "title": "string"}}"#);
    assert_eq!(
        create(&dialect, "posts", &schema),
        vec![
            "CREATE TABLE `posts` (\n`id` int(11) NOT NULL AUTO_INCREMENT,\n`title` varchar(255),\nPRIMARY KEY (`id`));"
        ]
    );
}

#[test]
fn inline_indexes_and_constraints() {
    let dialect = Dialect::mysql();
    let schema = schema(
        r#"{
            "fields": {
                "id": {"type": "integer", "key": "primary"},
                "name": {"type": "string", "null": false},
                "author_id": {"type": "integer"}
            },
            "meta": {
                "indexes": {"myIndex": {"column": ["id", "name"], "unique": true}},
                "constraints": [
                    {"type": "foreign_key", "column": "author_id", "to": "authors",
                     "toColumn": "id", "on": "DELETE CASCADE"},
                    {"type": "unique", "column": "name", "index": true},
                    {"type": "check", "expr": {"author_id": {">": 0}}},
                    {"type": "exclude", "column": "name"}
                ]
            }
        }"#,
    );
    let expected = "CREATE TABLE `books` (\n\
        `id` int(11) NOT NULL AUTO_INCREMENT,\n\
        `name` varchar(255) NOT NULL,\n\
        `author_id` int(11),\n\
        UNIQUE KEY `myIndex` (`id`, `name`),\n\
        FOREIGN KEY (`author_id`) REFERENCES `authors` (`id`) ON DELETE CASCADE,\n\
        UNIQUE KEY (`name`),\n\
        CHECK ((`author_id` > 0)),\n\
        PRIMARY KEY (`id`));";
    assert_eq!(create(&dialect, "books", &schema), vec![expected]);
}

#[test]
fn drop_schema_with_empty_name_does_nothing() {
    let dialect = Dialect::mysql();
    let mut recorder = RecordingExecutor::new();
    assert!(!dialect.compiler().drop_schema(&mut recorder, "", true).unwrap());
    assert!(recorder.statements.is_empty());
}
