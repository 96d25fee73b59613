//! UPDATE statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::select::{Limited, Offset, Ordered};
use super::{and_where, Build};
use crate::ast::{
    Assignment, ConflictResolution, Expr, OrderingTerm, ResultColumn, Statement, TableExpr,
    TableRef, UpdateStatement, WithClause,
};
use crate::error::Result;

// Typestate markers (zero-sized types)

/// Marker: no SET assignment yet.
pub struct NoSet;
/// Marker: at least one SET assignment.
pub struct HasSet;

/// `column = value`.
#[must_use]
pub fn assign(column: impl Into<String>, value: impl Into<Expr>) -> Assignment {
    Assignment {
        columns: vec![column.into()],
        value: value.into(),
    }
}

/// `(columns) = value`, where `value` is a row value or subquery.
///
/// # Errors
///
/// Returns [`Error::ConstructionState`](crate::Error::ConstructionState)
/// if `columns` is empty.
pub fn assign_row<I, C>(columns: I, value: impl Into<Expr>) -> Result<Assignment>
where
    I: IntoIterator<Item = C>,
    C: Into<String>,
{
    Ok(Assignment {
        columns: super::non_empty("SET", "column tuple", columns)?,
        value: value.into(),
    })
}

/// An UPDATE statement builder.
pub struct Update<S> {
    statement: UpdateStatement,
    _state: PhantomData<S>,
}

/// Starts `UPDATE table`.
#[must_use]
pub fn update(table: impl Into<TableRef>) -> Update<NoSet> {
    start(None, table.into())
}

/// Starts `UPDATE OR action table`.
#[must_use]
pub fn update_or(action: ConflictResolution, table: impl Into<TableRef>) -> Update<NoSet> {
    start(Some(action), table.into())
}

fn start(or: Option<ConflictResolution>, table: TableRef) -> Update<NoSet> {
    Update {
        statement: UpdateStatement {
            with: None,
            or,
            table,
            assignments: Vec::new(),
            from: None,
            where_clause: None,
            returning: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        },
        _state: PhantomData,
    }
}

impl<S> Update<S> {
    fn into_state<T>(self) -> Update<T> {
        Update {
            statement: self.statement,
            _state: PhantomData,
        }
    }

    pub(crate) fn with_prefix(mut self, with: WithClause) -> Self {
        self.statement.with = Some(with);
        self
    }
}

mod sealed {
    pub trait Assignable {}
    impl Assignable for super::NoSet {}
    impl Assignable for super::HasSet {}
}

impl<S: sealed::Assignable> Update<S> {
    /// Adds `column = value`.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Update<HasSet> {
        self.statement.assignments.push(assign(column, value));
        self.into_state()
    }

    /// Adds `(columns) = value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`](crate::Error::ConstructionState)
    /// if `columns` is empty.
    pub fn set_row<I, C>(mut self, columns: I, value: impl Into<Expr>) -> Result<Update<HasSet>>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.statement.assignments.push(assign_row(columns, value)?);
        Ok(self.into_state())
    }
}

impl Update<HasSet> {
    /// Adds a FROM clause.
    #[must_use]
    pub fn from(mut self, from: impl Into<TableExpr>) -> Self {
        self.statement.from = Some(from.into());
        self
    }

    /// Adds a WHERE condition; repeated calls are combined with AND.
    #[must_use]
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        and_where(&mut self.statement.where_clause, condition.into());
        self
    }

    /// Appends RETURNING columns.
    #[must_use]
    pub fn returning<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResultColumn>,
    {
        self.statement
            .returning
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds ORDER BY; a LIMIT must follow.
    #[must_use]
    pub fn order_by<I, T>(mut self, terms: I) -> Update<Ordered>
    where
        I: IntoIterator<Item = T>,
        T: Into<OrderingTerm>,
    {
        self.statement
            .order_by
            .extend(terms.into_iter().map(Into::into));
        self.into_state()
    }

    /// Adds LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Expr>) -> Update<Limited> {
        self.statement.limit = Some(limit.into());
        self.into_state()
    }
}

impl Update<Ordered> {
    /// Adds LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Expr>) -> Update<Limited> {
        self.statement.limit = Some(limit.into());
        self.into_state()
    }
}

impl Update<Limited> {
    /// Adds OFFSET.
    #[must_use]
    pub fn offset(mut self, offset: impl Into<Expr>) -> Update<Offset> {
        self.statement.offset = Some(offset.into());
        self.into_state()
    }
}

macro_rules! buildable {
    ($($state:ty),*) => {
        $(
            impl Build for Update<$state> {
                fn finish(self) -> Result<Statement> {
                    Ok(Statement::Update(self.statement))
                }
            }
        )*
    };
}

buildable!(HasSet, Limited, Offset);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lit, row, select, subquery, table};

    fn render(update: impl Build) -> String {
        update.build().unwrap().render()
    }

    #[test]
    fn test_update_set_where() {
        let sql = render(
            update("users")
                .set("name", "Bob")
                .set("age", col("age").add(1))
                .where_(col("id").eq(1)),
        );
        assert_eq!(
            sql,
            r#"UPDATE "users" SET "name" = 'Bob', "age" = "age" + 1 WHERE "id" = 1"#
        );
    }

    #[test]
    fn test_update_or_with_hint_and_row_set() {
        let sql = render(
            update_or(ConflictResolution::Rollback, table("t").indexed_by("t_a"))
                .set_row(["a", "b"], row([lit(1), lit(2)]))
                .unwrap()
                .where_(col("a").is_null()),
        );
        assert_eq!(
            sql,
            r#"UPDATE OR ROLLBACK "t" INDEXED BY "t_a" SET ("a", "b") = (1, 2) WHERE "a" IS NULL"#
        );
    }

    #[test]
    fn test_update_from_returning_order_limit() {
        let sql = render(
            update("inventory")
                .set("qty", col("qty").sub(table("s").col("n")))
                .from(subquery(select([col("n")]).from("sales")).alias("s").unwrap())
                .returning([col("qty")])
                .order_by([col("id")])
                .limit(5)
                .offset(1),
        );
        assert_eq!(
            sql,
            r#"UPDATE "inventory" SET "qty" = "qty" - "s"."n" FROM (SELECT "n" FROM "sales") AS "s" RETURNING "qty" ORDER BY "id" LIMIT 5 OFFSET 1"#
        );
    }

    #[test]
    fn test_set_row_requires_columns() {
        let err = update("t").set_row(Vec::<String>::new(), row([lit(1)]));
        assert!(err.is_err());
    }
}
