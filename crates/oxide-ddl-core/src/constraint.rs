//! Constraint renderer and check-condition compiler.
//!
//! Constraint kinds are rendered by filling a dialect template such as
//! `FOREIGN KEY ({column}) REFERENCES {to} ({toColumn}) {on}`. Placeholders
//! that have no value vanish together with the token they sit in, and the
//! remaining tokens are joined by single spaces.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};
use tracing::trace;

use crate::quote::Quoter;
use crate::schema::{CheckExpr, Columns, ConstraintRequest, Predicate};
use crate::types::Formatter;
use crate::value::Value;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern"));

/// Comparison operators accepted in check conditions.
const OPERATORS: &[&str] = &["=", "!=", "<>", ">", ">=", "<", "<=", "LIKE", "NOT LIKE"];

/// Template for one constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintDescriptor {
    /// Template with `{placeholder}` slots.
    pub template: &'static str,
    /// Literal token substituted for `{index}` when the request asks for it.
    pub index: Option<&'static str>,
}

impl ConstraintDescriptor {
    /// Creates a descriptor without an index token.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self {
            template,
            index: None,
        }
    }

    /// Sets the token substituted for `{index}`.
    #[must_use]
    pub const fn index(mut self, token: &'static str) -> Self {
        self.index = Some(token);
        self
    }
}

/// The constraint templates of a dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintTemplates {
    /// `primary` template.
    pub primary: Option<ConstraintDescriptor>,
    /// `foreign_key` template.
    pub foreign_key: Option<ConstraintDescriptor>,
    /// `unique` template.
    pub unique: Option<ConstraintDescriptor>,
    /// `check` template.
    pub check: Option<ConstraintDescriptor>,
}

impl ConstraintTemplates {
    /// Returns the descriptor for a request's kind.
    #[must_use]
    pub const fn for_request(&self, request: &ConstraintRequest) -> Option<&ConstraintDescriptor> {
        match request {
            ConstraintRequest::Primary { .. } => self.primary.as_ref(),
            ConstraintRequest::ForeignKey { .. } => self.foreign_key.as_ref(),
            ConstraintRequest::Unique { .. } => self.unique.as_ref(),
            ConstraintRequest::Check { .. } => self.check.as_ref(),
            ConstraintRequest::Unknown => None,
        }
    }
}

/// Fills `{name}` placeholders from `values`.
///
/// Unknown placeholders resolve to the empty string, tokens left empty are
/// dropped and the rest are joined with a single space.
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    template
        .split_whitespace()
        .map(|token| {
            PLACEHOLDER
                .replace_all(token, |caps: &Captures<'_>| {
                    values
                        .iter()
                        .find(|(name, _)| *name == &caps[1])
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
                .into_owned()
        })
        .filter(|token| !token.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quotes each column and joins them with `, `.
#[must_use]
pub fn quote_columns(quoter: &dyn Quoter, columns: &Columns) -> String {
    columns
        .iter()
        .map(|column| quoter.name(column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a constraint request, or `None` when the dialect has no template
/// for its kind or a check compiles to nothing.
#[must_use]
pub fn render_constraint(
    quoter: &dyn Quoter,
    templates: &ConstraintTemplates,
    request: &ConstraintRequest,
) -> Option<String> {
    let Some(descriptor) = templates.for_request(request) else {
        trace!(?request, "no template, skipping constraint");
        return None;
    };
    let values = match request {
        ConstraintRequest::Primary { column } => vec![("column", quote_columns(quoter, column))],
        ConstraintRequest::ForeignKey {
            column,
            to,
            to_column,
            on,
        } => vec![
            ("column", quote_columns(quoter, column)),
            ("to", quoter.name(to)),
            ("toColumn", quote_columns(quoter, to_column)),
            (
                "on",
                on.as_deref()
                    .map(|on| format!("ON {on}"))
                    .unwrap_or_default(),
            ),
        ],
        ConstraintRequest::Unique { column, index } => {
            let token = if *index { descriptor.index } else { None };
            vec![
                ("column", quote_columns(quoter, column)),
                ("index", token.unwrap_or_default().to_string()),
            ]
        }
        ConstraintRequest::Check { expr } => {
            let expr = compile_check(quoter, expr);
            if expr.trim().is_empty() {
                trace!("empty check expression, skipping constraint");
                return None;
            }
            vec![("expr", expr)]
        }
        ConstraintRequest::Unknown => return None,
    };
    Some(fill_template(descriptor.template, &values))
}

/// Compiles a check expression into SQL.
#[must_use]
pub fn compile_check(quoter: &dyn Quoter, expr: &CheckExpr) -> String {
    match expr {
        CheckExpr::Raw(sql) => sql.clone(),
        CheckExpr::Conditions(conditions) => compile_conditions(quoter, conditions),
    }
}

/// Compiles a condition map into clauses joined with `AND`.
///
/// Comparisons are parenthesized (`("value" > 0)`), bare values are
/// equalities (`"city" = 'Sandnes'`).
#[must_use]
pub fn compile_conditions(quoter: &dyn Quoter, conditions: &IndexMap<String, Predicate>) -> String {
    let mut clauses = Vec::new();
    for (column, predicate) in conditions {
        let name = quoter.name(column);
        match predicate {
            Predicate::Compare(comparisons) => {
                for (operator, operand) in comparisons {
                    let operator = operator.trim().to_ascii_uppercase();
                    if !OPERATORS.contains(&operator.as_str()) {
                        trace!(%column, %operator, "unsupported operator, skipping condition");
                        continue;
                    }
                    clauses.push(format!("({name} {operator} {})", literal(quoter, operand)));
                }
            }
            Predicate::Equals(Value::Null) => clauses.push(format!("{name} IS NULL")),
            Predicate::Equals(value) => {
                clauses.push(format!("{name} = {}", literal(quoter, value)));
            }
        }
    }
    clauses.join(" AND ")
}

fn literal(quoter: &dyn Quoter, value: &Value) -> String {
    match value {
        Value::Text(text) if value.is_numeric_like() => text.trim().to_string(),
        Value::Integer(_) | Value::Float(_) if value.is_numeric_like() => value.to_string(),
        Value::Bool(_) => quoter.value(value, Formatter::Boolean),
        _ => quoter.value(value, Formatter::String),
    }
}
