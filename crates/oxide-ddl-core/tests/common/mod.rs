#![allow(dead_code)]

use oxide_ddl_core::{Dialect, FieldDefinition, RecordingExecutor, TableSchema};

pub fn column(dialect: &Dialect, json: &str) -> String {
    let field: FieldDefinition = serde_json::from_str(json)
        .unwrap_or_else(|e| panic!("Invalid field: {json}\nError: {e}"));
    dialect
        .compiler()
        .column(&field)
        .unwrap_or_else(|e| panic!("Failed to compile: {json}\nError: {e}"))
}

pub fn schema(json: &str) -> TableSchema {
    TableSchema::from_json(json).unwrap_or_else(|e| panic!("Invalid schema: {json}\nError: {e}"))
}

pub fn create(dialect: &Dialect, source: &str, schema: &TableSchema) -> Vec<String> {
    let mut recorder = RecordingExecutor::new();
    dialect
        .compiler()
        .create_schema(&mut recorder, source, schema)
        .unwrap_or_else(|e| panic!("Failed to create {source}: {e}"));
    recorder.statements
}
