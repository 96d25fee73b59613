//! Rendering of AST nodes to SQLite text.
//!
//! Rendering is a pure walk of an already validated tree: it never fails,
//! and rendering the same tree twice yields the same text.

mod expr;
mod schema;
mod select;
mod statement;

use core::fmt;

use crate::ast::{
    quote_identifier, ColumnDef, Expr, Precedence, QualifiedName, SelectStatement, Statement,
    TableExpr,
};

/// Accumulates rendered SQL text.
#[derive(Debug, Default)]
pub struct SqlWriter {
    sql: String,
}

impl SqlWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { sql: String::new() }
    }

    /// Appends raw text.
    pub fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Appends a quoted identifier.
    pub fn ident(&mut self, name: &str) {
        self.sql.push_str(&quote_identifier(name));
    }

    /// Appends a possibly schema-qualified name.
    pub fn name(&mut self, name: &QualifiedName) {
        if let Some(schema) = &name.schema {
            self.ident(schema);
            self.sql.push('.');
        }
        self.ident(&name.name);
    }

    /// Appends `items` separated by `", "`.
    pub fn comma_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            each(self, item);
        }
    }

    /// Appends a parenthesized list of quoted identifiers.
    pub fn ident_list(&mut self, names: &[String]) {
        self.sql.push('(');
        self.comma_list(names, |w, name| w.ident(name));
        self.sql.push(')');
    }

    /// Appends a comma-separated list of expressions at the loosest tier.
    pub fn expr_list(&mut self, exprs: &[Expr]) {
        self.comma_list(exprs, |w, e| w.expr(e, Precedence::Lowest));
    }

    /// Returns the rendered text.
    #[must_use]
    pub fn finish(self) -> String {
        self.sql
    }
}

/// Types that can be rendered to SQLite text.
pub trait ToSql {
    /// Writes this node into `writer`.
    fn write_sql(&self, writer: &mut SqlWriter);

    /// Renders this node into a new string.
    fn to_sql(&self) -> String {
        let mut writer = SqlWriter::new();
        self.write_sql(&mut writer);
        writer.finish()
    }
}

impl ToSql for Expr {
    fn write_sql(&self, writer: &mut SqlWriter) {
        writer.expr(self, Precedence::Lowest);
    }
}

impl ToSql for SelectStatement {
    fn write_sql(&self, writer: &mut SqlWriter) {
        writer.select(self);
    }
}

impl ToSql for TableExpr {
    fn write_sql(&self, writer: &mut SqlWriter) {
        writer.table_expr(self);
    }
}

impl ToSql for ColumnDef {
    fn write_sql(&self, writer: &mut SqlWriter) {
        writer.column_def(self);
    }
}

impl ToSql for Statement {
    fn write_sql(&self, writer: &mut SqlWriter) {
        writer.statement(self);
    }
}

impl Statement {
    /// Renders the statement as one SQLite statement without a terminator.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_sql()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_quotes_each_part() {
        let mut w = SqlWriter::new();
        w.name(&QualifiedName::with_schema("temp", "X"));
        assert_eq!(w.finish(), r#""temp"."X""#);
    }

    #[test]
    fn test_ident_list() {
        let mut w = SqlWriter::new();
        w.ident_list(&[String::from("a"), String::from("b\"c")]);
        assert_eq!(w.finish(), r#"("a", "b""c")"#);
    }
}
