//! Statement writer: prints statements instead of running them.

use std::io::{self, Write};

use oxide_ddl_core::Executor;

/// Executor that writes each statement on its own line.
pub struct SqlWriter<W> {
    out: W,
}

impl<W: Write> SqlWriter<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Executor for SqlWriter<W> {
    type Error = io::Error;

    fn execute(&mut self, sql: &str) -> io::Result<()> {
        writeln!(self.out, "{sql}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_ddl_core::Dialect;

    #[test]
    fn test_writes_one_statement_per_line() {
        let dialect = Dialect::sqlite();
        let mut writer = SqlWriter::new(Vec::new());
        assert!(dialect
            .compiler()
            .drop_schema(&mut writer, "users", true)
            .unwrap());
        assert!(dialect
            .compiler()
            .drop_schema(&mut writer, "posts", false)
            .unwrap());
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "DROP TABLE IF EXISTS \"users\";\nDROP TABLE \"posts\";\n"
        );
    }
}
