//! Identifier and literal quoting.
//!
//! The compiler never builds identifiers or literals itself; it asks a
//! [`Quoter`]. Each dialect ships a [`StandardQuoter`], and callers can plug
//! in their own (for instance one backed by a live connection's escaping).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::Formatter;
use crate::value::Value;

/// Naming and value-quoting collaborator.
pub trait Quoter: Send + Sync {
    /// Quotes an identifier. Empty input yields an empty string.
    fn name(&self, identifier: &str) -> String;

    /// Formats a scalar for inline use in SQL.
    fn value(&self, value: &Value, formatter: Formatter) -> String;
}

/// Quoter parameterized by identifier quote characters and boolean literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardQuoter {
    open: char,
    close: char,
    true_literal: &'static str,
    false_literal: &'static str,
}

impl StandardQuoter {
    /// Creates a quoter wrapping identifiers in `open`/`close`.
    #[must_use]
    pub const fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            true_literal: "1",
            false_literal: "0",
        }
    }

    /// Sets the boolean literals.
    #[must_use]
    pub const fn booleans(mut self, true_literal: &'static str, false_literal: &'static str) -> Self {
        self.true_literal = true_literal;
        self.false_literal = false_literal;
        self
    }

    fn string(text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    const fn boolean(&self, value: bool) -> &'static str {
        if value {
            self.true_literal
        } else {
            self.false_literal
        }
    }

    fn integer(value: &Value) -> String {
        match value {
            Value::Integer(i) => i.to_string(),
            Value::Float(x) if x.is_finite() => format!("{}", x.trunc()),
            Value::Float(x) => Self::string(&x.to_string()),
            Value::Bool(b) => i64::from(*b).to_string(),
            Value::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_or_else(|_| Self::string(text), |i| i.to_string()),
            Value::Null => "NULL".to_string(),
        }
    }

    fn float(value: &Value) -> String {
        match value {
            Value::Text(text) if value.is_numeric_like() => text.trim().to_string(),
            Value::Integer(_) | Value::Float(_) if value.is_numeric_like() => value.to_string(),
            Value::Float(x) => Self::string(&x.to_string()),
            _ => Self::integer(value),
        }
    }

    fn bool_value(&self, value: &Value) -> String {
        match value {
            Value::Bool(b) => self.boolean(*b).to_string(),
            Value::Integer(i) => self.boolean(*i != 0).to_string(),
            Value::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "t" | "yes" => self.boolean(true).to_string(),
                "0" | "false" | "f" | "no" => self.boolean(false).to_string(),
                _ => Self::string(text),
            },
            Value::Float(_) | Value::Null => Self::integer(value),
        }
    }

    fn date(value: &Value, format: &str) -> String {
        match value {
            Value::Text(text) => {
                reformat_date(text, format).map_or_else(|| Self::string(text), |d| Self::string(&d))
            }
            Value::Integer(timestamp) => DateTime::from_timestamp(*timestamp, 0).map_or_else(
                || timestamp.to_string(),
                |d| Self::string(&d.naive_utc().format(format).to_string()),
            ),
            Value::Null => "NULL".to_string(),
            other => Self::string(&other.to_string()),
        }
    }
}

impl Quoter for StandardQuoter {
    fn name(&self, identifier: &str) -> String {
        if identifier.is_empty() {
            return String::new();
        }
        let doubled = format!("{}{}", self.close, self.close);
        identifier
            .split('.')
            .map(|part| {
                let escaped = part.replace(self.close, &doubled);
                format!("{}{escaped}{}", self.open, self.close)
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    fn value(&self, value: &Value, formatter: Formatter) -> String {
        if matches!(value, Value::Null) {
            return "NULL".to_string();
        }
        match formatter {
            Formatter::Integer => Self::integer(value),
            Formatter::Float => Self::float(value),
            Formatter::Boolean => self.bool_value(value),
            Formatter::Date(format) => Self::date(value, format),
            Formatter::String => Self::string(&value.to_string()),
        }
    }
}

/// Parses a date, datetime or time string and re-renders it with `format`.
fn reformat_date(text: &str, format: &str) -> Option<String> {
    let text = text.trim();
    let parsed = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            let time = NaiveTime::parse_from_str(text, "%H:%M:%S").ok()?;
            NaiveDate::from_ymd_opt(1970, 1, 1).map(|date| date.and_time(time))
        })?;
    Some(parsed.format(format).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};

    fn quoter() -> StandardQuoter {
        StandardQuoter::new('"', '"')
    }

    #[test]
    fn test_name_quoting() {
        let q = quoter();
        assert_eq!(q.name("users"), "\"users\"");
        assert_eq!(q.name("main.users"), "\"main\".\"users\"");
        assert_eq!(q.name("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(q.name(""), "");
        assert_eq!(StandardQuoter::new('`', '`').name("id"), "`id`");
    }

    #[test]
    fn test_integer_values() {
        let q = quoter();
        assert_eq!(q.value(&Value::Integer(1), Formatter::Integer), "1");
        assert_eq!(q.value(&Value::from("1"), Formatter::Integer), "1");
        assert_eq!(q.value(&Value::from("abc"), Formatter::Integer), "'abc'");
        assert_eq!(q.value(&Value::Null, Formatter::Integer), "NULL");
    }

    #[test]
    fn test_string_values_are_always_quoted() {
        let q = quoter();
        assert_eq!(q.value(&Value::Integer(1), Formatter::String), "'1'");
        assert_eq!(q.value(&Value::from("it's"), Formatter::String), "'it''s'");
    }

    #[test]
    fn test_boolean_values() {
        let q = quoter().booleans("TRUE", "FALSE");
        assert_eq!(q.value(&Value::Bool(true), Formatter::Boolean), "TRUE");
        assert_eq!(q.value(&Value::Integer(0), Formatter::Boolean), "FALSE");
        assert_eq!(quoter().value(&Value::from("true"), Formatter::Boolean), "1");
    }

    #[test]
    fn test_float_values() {
        let q = quoter();
        assert_eq!(q.value(&Value::Float(2.5), Formatter::Float), "2.5");
        assert_eq!(q.value(&Value::from(" 3.75"), Formatter::Float), "3.75");
        assert_eq!(q.value(&Value::from("infinity"), Formatter::Float), "'infinity'");
        assert_eq!(q.value(&Value::from("NaN"), Formatter::Float), "'NaN'");
        assert_eq!(q.value(&Value::Float(f64::NAN), Formatter::Float), "'NaN'");
        assert_eq!(q.value(&Value::Float(f64::INFINITY), Formatter::Integer), "'inf'");
    }

    #[test]
    fn test_date_values_are_normalized() {
        let q = quoter();
        assert_eq!(
            q.value(&Value::from("2012-01-05"), Formatter::Date(DATETIME_FORMAT)),
            "'2012-01-05 00:00:00'"
        );
        assert_eq!(
            q.value(&Value::from("2012-01-05 10:20:30"), Formatter::Date(DATE_FORMAT)),
            "'2012-01-05'"
        );
        assert_eq!(
            q.value(&Value::from("10:20:30"), Formatter::Date(TIME_FORMAT)),
            "'10:20:30'"
        );
        assert_eq!(
            q.value(&Value::Integer(0), Formatter::Date(DATETIME_FORMAT)),
            "'1970-01-01 00:00:00'"
        );
        assert_eq!(
            q.value(&Value::from("tomorrow"), Formatter::Date(DATE_FORMAT)),
            "'tomorrow'"
        );
    }
}
