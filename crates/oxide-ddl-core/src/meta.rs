//! Meta renderer: named keyword/value attributes on columns and tables.

use indexmap::IndexMap;
use tracing::trace;

use crate::quote::Quoter;
use crate::types::Formatter;
use crate::value::Value;

/// Where a column meta is placed relative to the NULL/DEFAULT clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    /// Before the clause (charset, collation).
    #[default]
    Before,
    /// After the clause (comment).
    After,
}

/// Declarative rule for one named meta attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaDescriptor {
    /// Literal SQL keyword.
    pub keyword: &'static str,
    /// Whether the value is quoted as a string.
    pub escape: bool,
    /// Separator between keyword and value.
    pub join: &'static str,
    /// Whitelist of accepted values.
    pub options: Option<&'static [&'static str]>,
    /// Placement for column metas.
    pub position: Position,
}

impl MetaDescriptor {
    /// Creates an unescaped, space-joined descriptor placed before the clause.
    #[must_use]
    pub const fn new(keyword: &'static str) -> Self {
        Self {
            keyword,
            escape: false,
            join: " ",
            options: None,
            position: Position::Before,
        }
    }

    /// Quotes the value as a string literal.
    #[must_use]
    pub const fn escaped(mut self) -> Self {
        self.escape = true;
        self
    }

    /// Sets the keyword/value separator.
    #[must_use]
    pub const fn joined(mut self, join: &'static str) -> Self {
        self.join = join;
        self
    }

    /// Restricts the accepted values.
    #[must_use]
    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = Some(options);
        self
    }

    /// Places the meta after the NULL/DEFAULT clause.
    #[must_use]
    pub const fn after(mut self) -> Self {
        self.position = Position::After;
        self
    }
}

/// An ordered table of meta descriptors keyed by attribute name.
pub type MetaTable = &'static [(&'static str, MetaDescriptor)];

/// Renders one meta attribute.
///
/// Returns `None` when `name` has no descriptor or `value` is outside the
/// descriptor's whitelist.
#[must_use]
pub fn render_meta(quoter: &dyn Quoter, table: MetaTable, name: &str, value: &Value) -> Option<String> {
    let Some((_, descriptor)) = table.iter().find(|(key, _)| *key == name) else {
        trace!(meta = name, "no descriptor, skipping meta");
        return None;
    };
    let raw = value.to_string();
    if let Some(options) = descriptor.options {
        if !options.contains(&raw.as_str()) {
            trace!(meta = name, value = %raw, "value not allowed, skipping meta");
            return None;
        }
    }
    let rendered = if descriptor.escape {
        quoter.value(value, Formatter::String)
    } else {
        raw
    };
    Some(
        format!("{}{}{rendered}", descriptor.keyword, descriptor.join)
            .trim()
            .to_string(),
    )
}

/// Renders every meta present in `data`, in descriptor declaration order.
///
/// `names` restricts the rendered attributes; `position` keeps only the
/// descriptors placed there.
#[must_use]
pub fn collect_metas(
    quoter: &dyn Quoter,
    table: MetaTable,
    data: &IndexMap<String, Value>,
    names: Option<&[&str]>,
    position: Option<Position>,
) -> Vec<String> {
    table
        .iter()
        .filter(|(name, _)| names.is_none_or(|names| names.contains(name)))
        .filter(|(_, descriptor)| position.is_none_or(|p| descriptor.position == p))
        .filter_map(|(name, _)| {
            let value = data.get(*name)?;
            if matches!(value, Value::Null) || value.is_empty_text() {
                return None;
            }
            render_meta(quoter, table, name, value)
        })
        .filter(|rendered| !rendered.is_empty())
        .collect()
}

/// Renders metas as a single string, each prefixed with `joiner`.
#[must_use]
pub fn build_metas(
    quoter: &dyn Quoter,
    table: MetaTable,
    data: &IndexMap<String, Value>,
    names: Option<&[&str]>,
    joiner: &str,
) -> String {
    collect_metas(quoter, table, data, names, None)
        .iter()
        .map(|meta| format!("{joiner}{meta}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::StandardQuoter;

    const COLUMN: MetaTable = &[
        ("charset", MetaDescriptor::new("CHARACTER SET")),
        ("collate", MetaDescriptor::new("COLLATE")),
        ("comment", MetaDescriptor::new("COMMENT").escaped().after()),
    ];

    const TABLE: MetaTable = &[
        ("charset", MetaDescriptor::new("DEFAULT CHARSET").joined("=")),
        ("engine", MetaDescriptor::new("ENGINE").joined("=")),
    ];

    const SQLITE: MetaTable = &[(
        "collate",
        MetaDescriptor::new("COLLATE")
            .escaped()
            .options(&["BINARY", "NOCASE", "RTRIM"]),
    )];

    fn quoter() -> StandardQuoter {
        StandardQuoter::new('`', '`')
    }

    fn data(pairs: &[(&str, &str)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_render_meta() {
        let q = quoter();
        assert_eq!(
            render_meta(&q, COLUMN, "charset", &Value::from("utf8")).as_deref(),
            Some("CHARACTER SET utf8")
        );
        assert_eq!(
            render_meta(&q, COLUMN, "comment", &Value::from("it's")).as_deref(),
            Some("COMMENT 'it''s'")
        );
        assert_eq!(
            render_meta(&q, TABLE, "engine", &Value::from("InnoDB")).as_deref(),
            Some("ENGINE=InnoDB")
        );
        assert_eq!(render_meta(&q, COLUMN, "engine", &Value::from("InnoDB")), None);
    }

    #[test]
    fn test_options_whitelist() {
        let q = quoter();
        assert_eq!(
            render_meta(&q, SQLITE, "collate", &Value::from("NOCASE")).as_deref(),
            Some("COLLATE 'NOCASE'")
        );
        assert_eq!(render_meta(&q, SQLITE, "collate", &Value::from("utf8")), None);
    }

    #[test]
    fn test_collect_follows_descriptor_order() {
        let q = quoter();
        let field = data(&[("comment", "note"), ("collate", "utf8_bin"), ("charset", "utf8")]);
        assert_eq!(
            collect_metas(&q, COLUMN, &field, None, Some(Position::Before)),
            vec!["CHARACTER SET utf8", "COLLATE utf8_bin"]
        );
        assert_eq!(
            collect_metas(&q, COLUMN, &field, None, Some(Position::After)),
            vec!["COMMENT 'note'"]
        );
        assert_eq!(
            collect_metas(&q, COLUMN, &field, Some(&["collate"]), None),
            vec!["COLLATE utf8_bin"]
        );
    }

    #[test]
    fn test_build_metas_skips_empty_values() {
        let q = quoter();
        let table = data(&[("engine", "InnoDB"), ("charset", "")]);
        assert_eq!(build_metas(&q, TABLE, &table, None, " "), " ENGINE=InnoDB");
        assert_eq!(build_metas(&q, TABLE, &IndexMap::new(), None, " "), "");
    }
}
