//! CREATE VIRTUAL TABLE builder.

use super::Build;
use crate::ast::{CreateVirtualTableStatement, QualifiedName, Statement};
use crate::error::Result;

/// A CREATE VIRTUAL TABLE builder.
///
/// Module arguments are opaque to SQLite's parser and are rendered exactly
/// as given.
#[derive(Debug, Clone)]
pub struct CreateVirtualTable {
    statement: CreateVirtualTableStatement,
}

/// Starts `CREATE VIRTUAL TABLE name USING module`.
#[must_use]
pub fn create_virtual_table(
    name: impl Into<QualifiedName>,
    module: impl Into<String>,
) -> CreateVirtualTable {
    CreateVirtualTable {
        statement: CreateVirtualTableStatement {
            if_not_exists: false,
            name: name.into(),
            module: module.into(),
            args: Vec::new(),
        },
    }
}

impl CreateVirtualTable {
    /// `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.statement.if_not_exists = true;
        self
    }

    /// Appends a raw module argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.statement.args.push(arg.into());
        self
    }

    /// Appends several raw module arguments.
    #[must_use]
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.statement.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Build for CreateVirtualTable {
    fn finish(self) -> Result<Statement> {
        Ok(Statement::CreateVirtualTable(self.statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fts5_table() {
        let sql = create_virtual_table("docs", "fts5")
            .if_not_exists()
            .args(["title", "body"])
            .arg("tokenize = 'porter'")
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"CREATE VIRTUAL TABLE IF NOT EXISTS "docs" USING "fts5"(title, body, tokenize = 'porter')"#
        );
    }

    #[test]
    fn test_without_args() {
        let sql = create_virtual_table(("main", "pts"), "rtree_i32")
            .build()
            .unwrap()
            .render();
        assert_eq!(sql, r#"CREATE VIRTUAL TABLE "main"."pts" USING "rtree_i32""#);
    }
}
