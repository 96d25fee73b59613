//! FROM-clause construction: tables, subqueries and joins.

use crate::ast::{
    Expr, Join, JoinConstraint, JoinKind, JoinOperator, QualifiedName, SelectStatement,
    TableExpr, TableRef,
};
use crate::error::{Error, Result};

/// Creates a table reference.
///
/// ```rust
/// use quill_sql::builder::{table, Joinable};
/// use quill_sql::render::ToSql;
///
/// let e = table("Employees").alias("e");
/// let d = table("Departments").alias("d");
/// let from = e.clone().left_join(d.clone()).on(e.col("dept_id").eq(d.col("id")));
/// assert_eq!(
///     from.to_sql(),
///     r#""Employees" AS "e" LEFT JOIN "Departments" AS "d" ON "e"."dept_id" = "d"."id""#
/// );
/// ```
#[must_use]
pub fn table(name: impl Into<QualifiedName>) -> TableRef {
    TableRef::new(name)
}

/// A parenthesized subquery in a FROM clause.
#[must_use]
pub fn subquery(select: impl Into<SelectStatement>) -> TableExpr {
    TableExpr::Subquery {
        select: Box::new(select.into()),
        alias: None,
    }
}

/// A table-valued function call such as `json_each(..)`.
#[must_use]
pub fn table_function<I, T>(name: impl Into<QualifiedName>, args: I) -> TableExpr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    TableExpr::Function {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
        alias: None,
    }
}

impl TableExpr {
    /// Aliases a table, subquery or table-valued function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] for a join, which cannot be
    /// aliased.
    pub fn alias(self, name: impl Into<String>) -> Result<Self> {
        let name = Some(name.into());
        match self {
            Self::Table(table) => Ok(Self::Table(TableRef {
                alias: name,
                ..table
            })),
            Self::Subquery { select, .. } => Ok(Self::Subquery {
                select,
                alias: name,
            }),
            Self::Function { name: func, args, .. } => Ok(Self::Function {
                name: func,
                args,
                alias: name,
            }),
            Self::Join(_) => Err(Error::state("FROM", "a join cannot be aliased")),
        }
    }
}

/// A join whose constraint has not been given yet.
///
/// A join without a constraint is valid SQL, so the builder converts into a
/// [`TableExpr`] as is.
#[derive(Debug, Clone)]
pub struct JoinBuilder {
    left: TableExpr,
    kind: JoinKind,
    right: TableExpr,
}

impl JoinBuilder {
    fn finish(self, constraint: Option<JoinConstraint>) -> TableExpr {
        TableExpr::Join(Box::new(Join {
            left: self.left,
            operator: JoinOperator {
                natural: false,
                kind: self.kind,
            },
            right: self.right,
            constraint,
        }))
    }

    /// Adds an `ON` constraint.
    #[must_use]
    pub fn on(self, condition: impl Into<Expr>) -> TableExpr {
        self.finish(Some(JoinConstraint::On(condition.into())))
    }

    /// Adds a `USING (cols)` constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn using<I, S>(self, columns: I) -> Result<TableExpr>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = super::non_empty("JOIN", "USING column list", columns)?;
        Ok(self.finish(Some(JoinConstraint::Using(columns))))
    }
}

impl From<JoinBuilder> for TableExpr {
    fn from(join: JoinBuilder) -> Self {
        join.finish(None)
    }
}

/// Join operators for anything usable as the left side of a join.
pub trait Joinable: Into<TableExpr> {
    /// Starts a join of the given kind.
    fn join_with(self, kind: JoinKind, right: impl Into<TableExpr>) -> JoinBuilder {
        JoinBuilder {
            left: self.into(),
            kind,
            right: right.into(),
        }
    }

    /// `JOIN`.
    fn join(self, right: impl Into<TableExpr>) -> JoinBuilder {
        self.join_with(JoinKind::Plain, right)
    }

    /// `INNER JOIN`.
    fn inner_join(self, right: impl Into<TableExpr>) -> JoinBuilder {
        self.join_with(JoinKind::Inner, right)
    }

    /// `LEFT JOIN`.
    fn left_join(self, right: impl Into<TableExpr>) -> JoinBuilder {
        self.join_with(JoinKind::Left, right)
    }

    /// `LEFT OUTER JOIN`.
    fn left_outer_join(self, right: impl Into<TableExpr>) -> JoinBuilder {
        self.join_with(JoinKind::LeftOuter, right)
    }

    /// `RIGHT JOIN`.
    fn right_join(self, right: impl Into<TableExpr>) -> JoinBuilder {
        self.join_with(JoinKind::Right, right)
    }

    /// `FULL OUTER JOIN`.
    fn full_outer_join(self, right: impl Into<TableExpr>) -> JoinBuilder {
        self.join_with(JoinKind::FullOuter, right)
    }

    /// `CROSS JOIN`, which takes no constraint.
    fn cross_join(self, right: impl Into<TableExpr>) -> TableExpr {
        self.join_with(JoinKind::Cross, right).into()
    }

    /// The comma join `a, b`.
    fn comma_join(self, right: impl Into<TableExpr>) -> TableExpr {
        self.join_with(JoinKind::Comma, right).into()
    }

    /// `NATURAL <kind>`, which takes no constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] for comma and cross joins,
    /// which cannot be natural.
    fn natural(self, kind: JoinKind, right: impl Into<TableExpr>) -> Result<TableExpr> {
        if matches!(kind, JoinKind::Comma | JoinKind::Cross) {
            return Err(Error::state(
                "JOIN",
                format!("`{}` cannot be NATURAL", kind.as_str()),
            ));
        }
        Ok(TableExpr::Join(Box::new(Join {
            left: self.into(),
            operator: JoinOperator {
                natural: true,
                kind,
            },
            right: right.into(),
            constraint: None,
        })))
    }
}

impl Joinable for TableRef {}
impl Joinable for TableExpr {}
impl Joinable for JoinBuilder {}
