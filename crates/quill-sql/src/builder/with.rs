//! WITH prefixes and common table expressions.

use super::delete::{delete_from, Delete, Filtering};
use super::insert::{insert_into, insert_or, replace_into, Insert, NoSource};
use super::select::{select, select_all, select_distinct, values, Core, Prefixed, Select, Values};
use super::update::{update, update_or, NoSet, Update};
use crate::ast::{
    ConflictResolution, Cte, Expr, QualifiedName, ResultColumn, SelectStatement, TableRef,
    WithClause,
};
use crate::error::Result;

/// Builds one common table expression.
#[derive(Debug, Clone)]
pub struct CteBuilder {
    name: String,
    columns: Vec<String>,
    materialized: Option<bool>,
}

/// Starts a common table expression named `name`.
#[must_use]
pub fn cte(name: impl Into<String>) -> CteBuilder {
    CteBuilder {
        name: name.into(),
        columns: Vec::new(),
        materialized: None,
    }
}

impl CteBuilder {
    /// Sets explicit column names.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds the `MATERIALIZED` hint.
    #[must_use]
    pub const fn materialized(mut self) -> Self {
        self.materialized = Some(true);
        self
    }

    /// Adds the `NOT MATERIALIZED` hint.
    #[must_use]
    pub const fn not_materialized(mut self) -> Self {
        self.materialized = Some(false);
        self
    }

    /// Sets the body; the body may reference the CTE itself.
    #[must_use]
    pub fn as_select(self, select: impl Into<SelectStatement>) -> Cte {
        Cte {
            name: self.name,
            columns: self.columns,
            materialized: self.materialized,
            select: select.into(),
        }
    }
}

/// A WITH prefix waiting for its statement.
#[derive(Debug, Clone)]
pub struct With {
    clause: WithClause,
}

/// Starts `WITH cte`.
#[must_use]
pub fn with(cte: Cte) -> With {
    With {
        clause: WithClause {
            recursive: false,
            ctes: vec![cte],
        },
    }
}

/// Starts `WITH RECURSIVE cte`.
#[must_use]
pub fn with_recursive(cte: Cte) -> With {
    With {
        clause: WithClause {
            recursive: true,
            ctes: vec![cte],
        },
    }
}

impl With {
    /// Appends another CTE.
    #[must_use]
    pub fn cte(mut self, cte: Cte) -> Self {
        self.clause.ctes.push(cte);
        self
    }

    /// `WITH .. SELECT columns`.
    #[must_use]
    pub fn select<I, T>(self, columns: I) -> Select<Core, Prefixed>
    where
        I: IntoIterator<Item = T>,
        T: Into<ResultColumn>,
    {
        select(columns).with_prefix(self.clause)
    }

    /// `WITH .. SELECT DISTINCT columns`.
    #[must_use]
    pub fn select_distinct<I, T>(self, columns: I) -> Select<Core, Prefixed>
    where
        I: IntoIterator<Item = T>,
        T: Into<ResultColumn>,
    {
        select_distinct(columns).with_prefix(self.clause)
    }

    /// `WITH .. SELECT *`.
    #[must_use]
    pub fn select_all(self) -> Select<Core, Prefixed> {
        select_all().with_prefix(self.clause)
    }

    /// `WITH .. VALUES ..`.
    ///
    /// # Errors
    ///
    /// Same as [`values`](super::values).
    pub fn values<I, R, T>(self, rows: I) -> Result<Select<Values, Prefixed>>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        Ok(values(rows)?.with_prefix(self.clause))
    }

    /// `WITH .. INSERT INTO table`.
    #[must_use]
    pub fn insert_into(self, table: impl Into<QualifiedName>) -> Insert<NoSource> {
        insert_into(table).with_prefix(self.clause)
    }

    /// `WITH .. REPLACE INTO table`.
    #[must_use]
    pub fn replace_into(self, table: impl Into<QualifiedName>) -> Insert<NoSource> {
        replace_into(table).with_prefix(self.clause)
    }

    /// `WITH .. INSERT OR action INTO table`.
    #[must_use]
    pub fn insert_or(
        self,
        action: ConflictResolution,
        table: impl Into<QualifiedName>,
    ) -> Insert<NoSource> {
        insert_or(action, table).with_prefix(self.clause)
    }

    /// `WITH .. UPDATE table`.
    #[must_use]
    pub fn update(self, table: impl Into<TableRef>) -> Update<NoSet> {
        update(table).with_prefix(self.clause)
    }

    /// `WITH .. UPDATE OR action table`.
    #[must_use]
    pub fn update_or(self, action: ConflictResolution, table: impl Into<TableRef>) -> Update<NoSet> {
        update_or(action, table).with_prefix(self.clause)
    }

    /// `WITH .. DELETE FROM table`.
    #[must_use]
    pub fn delete_from(self, table: impl Into<TableRef>) -> Delete<Filtering> {
        delete_from(table).with_prefix(self.clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lit, Build};

    #[test]
    fn test_recursive_cte() {
        let counter = cte("cnt").columns(["x"]).as_select(
            select([lit(1)]).union_all(select([col("x").add(1)]).from("cnt").where_(col("x").lt(5))),
        );
        let sql = with_recursive(counter)
            .select([col("x")])
            .from("cnt")
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"WITH RECURSIVE "cnt"("x") AS (SELECT 1 UNION ALL SELECT "x" + 1 FROM "cnt" WHERE "x" < 5) SELECT "x" FROM "cnt""#
        );
    }

    #[test]
    fn test_ctes_keep_order_and_hints() {
        let a = cte("a").materialized().as_select(select([lit(1)]));
        let b = cte("b").not_materialized().as_select(select_all().from("a"));
        let sql = with(a).cte(b).select_all().from("b").build().unwrap().render();
        assert_eq!(
            sql,
            r#"WITH "a" AS MATERIALIZED (SELECT 1), "b" AS NOT MATERIALIZED (SELECT * FROM "a") SELECT * FROM "b""#
        );
    }
}
