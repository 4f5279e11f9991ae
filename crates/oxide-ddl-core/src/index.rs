//! Index builder.
//!
//! Dialects either declare indexes inside the `CREATE TABLE` body (MySQL
//! `UNIQUE KEY name (cols)`) or as standalone `CREATE INDEX` statements run
//! after the table is created. The `PRIMARY` index is always rendered inline
//! through the dialect's primary key template.

use indexmap::IndexMap;
use tracing::trace;

use crate::constraint::{quote_columns, render_constraint, ConstraintTemplates};
use crate::quote::Quoter;
use crate::schema::{ConstraintRequest, IndexRequest, PRIMARY_INDEX};

/// How a dialect declares indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStrategy {
    /// `[UNIQUE ]KEY name (cols)` fragments inside the table body.
    Inline,
    /// Standalone `CREATE [UNIQUE ]INDEX name ON table (cols);` statements.
    Separate {
        /// Prefix index names with the table name (`table_index`).
        table_prefix: bool,
        /// Quote the index and table names.
        quote_names: bool,
    },
}

/// Index output: body fragments and standalone statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexFragments {
    /// Fragments placed inside the `CREATE TABLE` body.
    pub inline: Vec<String>,
    /// Statements executed after the table statement.
    pub statements: Vec<String>,
}

/// Builds index fragments and statements for a table.
#[must_use]
pub fn build_indexes(
    quoter: &dyn Quoter,
    strategy: IndexStrategy,
    templates: &ConstraintTemplates,
    table: &str,
    indexes: &IndexMap<String, IndexRequest>,
) -> IndexFragments {
    let mut fragments = IndexFragments::default();
    for (name, request) in indexes {
        if name == PRIMARY_INDEX {
            let primary = ConstraintRequest::Primary {
                column: request.column.clone(),
            };
            match render_constraint(quoter, templates, &primary) {
                Some(sql) => fragments.inline.push(sql),
                None => trace!(index = %name, "no primary key template, skipping index"),
            }
            continue;
        }

        let columns = quote_columns(quoter, &request.column);
        let unique = if request.unique { "UNIQUE " } else { "" };
        match strategy {
            IndexStrategy::Inline => {
                fragments
                    .inline
                    .push(format!("{unique}KEY {} ({columns})", quoter.name(name)));
            }
            IndexStrategy::Separate {
                table_prefix,
                quote_names,
            } => {
                let index_name = if table_prefix {
                    format!("{table}_{name}")
                } else {
                    name.clone()
                };
                let (index_name, table_name) = if quote_names {
                    (quoter.name(&index_name), quoter.name(table))
                } else {
                    (index_name, table.to_string())
                };
                fragments.statements.push(format!(
                    "CREATE {unique}INDEX {index_name} ON {table_name} ({columns});"
                ));
            }
        }
    }
    fragments
}
