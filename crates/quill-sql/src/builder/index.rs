//! CREATE INDEX builder.

use super::{and_where, Build};
use crate::ast::{CreateIndexStatement, Expr, IndexedColumn, QualifiedName, Statement};
use crate::error::{Error, Result};

/// A CREATE INDEX builder.
///
/// The indexed table always lives in the index's schema, so it is named
/// without a qualifier.
#[derive(Debug, Clone)]
pub struct CreateIndex {
    statement: CreateIndexStatement,
}

/// Starts `CREATE INDEX name ON table`.
#[must_use]
pub fn create_index(name: impl Into<QualifiedName>, table: impl Into<String>) -> CreateIndex {
    CreateIndex {
        statement: CreateIndexStatement {
            unique: false,
            if_not_exists: false,
            name: name.into(),
            table: table.into(),
            columns: Vec::new(),
            where_clause: None,
        },
    }
}

impl CreateIndex {
    /// `CREATE UNIQUE INDEX`.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.statement.unique = true;
        self
    }

    /// `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.statement.if_not_exists = true;
        self
    }

    /// Appends an indexed column or expression.
    #[must_use]
    pub fn column(mut self, column: impl Into<IndexedColumn>) -> Self {
        self.statement.columns.push(column.into());
        self
    }

    /// Appends several indexed columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn columns<I, C>(mut self, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<IndexedColumn>,
    {
        let columns: Vec<IndexedColumn> = super::non_empty("CREATE INDEX", "column list", columns)?;
        self.statement.columns.extend(columns);
        Ok(self)
    }

    /// Makes a partial index; repeated calls are combined with AND.
    #[must_use]
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        and_where(&mut self.statement.where_clause, condition.into());
        self
    }
}

impl Build for CreateIndex {
    fn finish(self) -> Result<Statement> {
        if self.statement.columns.is_empty() {
            return Err(Error::state(
                "CREATE INDEX",
                "an index needs at least one column",
            ));
        }
        Ok(Statement::CreateIndex(self.statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lower};

    #[test]
    fn test_expression_index() {
        let sql = create_index("A \"useful\" index", "items")
            .column(col("price").mul(col("qty")))
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"CREATE INDEX "A ""useful"" index" ON "items" ("price" * "qty")"#
        );
    }

    #[test]
    fn test_unique_partial_index() {
        let sql = create_index(("main", "idx_email"), "users")
            .unique()
            .if_not_exists()
            .column(IndexedColumn::from(lower(col("email"))).collate("NOCASE").desc())
            .column("id")
            .where_(col("deleted_at").is_null())
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"CREATE UNIQUE INDEX IF NOT EXISTS "main"."idx_email" ON "users" (LOWER("email") COLLATE "NOCASE" DESC, "id") WHERE "deleted_at" IS NULL"#
        );
    }

    #[test]
    fn test_index_needs_columns() {
        assert!(create_index("i", "t").build().unwrap_err().is_construction_state());
        assert!(create_index("i", "t").columns(Vec::<String>::new()).is_err());
    }
}
