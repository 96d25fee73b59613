//! Expression constructors.

use std::marker::PhantomData;

use crate::ast::{
    ColumnRef, Expr, Literal, OrderingTerm, QualifiedName, Qualifier, RaiseAction, ResultColumn,
    SelectStatement,
};

/// Creates an unqualified column reference.
///
/// ```rust
/// use quill_sql::builder::col;
/// use quill_sql::render::ToSql;
///
/// assert_eq!(col("price").mul(col("qty")).to_sql(), r#""price" * "qty""#);
/// ```
#[must_use]
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Column(ColumnRef {
        qualifier: None,
        column: name.into(),
    })
}

/// Creates a column reference qualified by a (possibly schema-qualified) table.
#[must_use]
pub fn table_col(table: impl Into<QualifiedName>, column: impl Into<String>) -> Expr {
    Expr::Column(ColumnRef {
        qualifier: Some(Qualifier::Table(table.into())),
        column: column.into(),
    })
}

/// References a column of the `NEW` row inside a trigger.
#[must_use]
pub fn new_row(column: impl Into<String>) -> Expr {
    Expr::Column(ColumnRef {
        qualifier: Some(Qualifier::New),
        column: column.into(),
    })
}

/// References a column of the `OLD` row inside a trigger.
#[must_use]
pub fn old_row(column: impl Into<String>) -> Expr {
    Expr::Column(ColumnRef {
        qualifier: Some(Qualifier::Old),
        column: column.into(),
    })
}

/// References a column of the row proposed for insertion in an upsert.
#[must_use]
pub fn excluded(column: impl Into<String>) -> Expr {
    table_col("excluded", column)
}

/// Creates a literal expression.
#[must_use]
pub fn lit(value: impl Into<Literal>) -> Expr {
    Expr::Literal(value.into())
}

/// `NULL`.
#[must_use]
pub const fn null() -> Expr {
    Expr::Literal(Literal::Null)
}

/// `CURRENT_TIME`.
#[must_use]
pub const fn current_time() -> Expr {
    Expr::Literal(Literal::CurrentTime)
}

/// `CURRENT_DATE`.
#[must_use]
pub const fn current_date() -> Expr {
    Expr::Literal(Literal::CurrentDate)
}

/// `CURRENT_TIMESTAMP`.
#[must_use]
pub const fn current_timestamp() -> Expr {
    Expr::Literal(Literal::CurrentTimestamp)
}

/// The `*` result column.
#[must_use]
pub const fn star() -> ResultColumn {
    ResultColumn::Star
}

/// A row value `(a, b, ...)`.
#[must_use]
pub fn row<I, T>(items: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::Row(items.into_iter().map(Into::into).collect())
}

/// A scalar subquery.
#[must_use]
pub fn scalar(select: impl Into<SelectStatement>) -> Expr {
    Expr::Subquery(Box::new(select.into()))
}

/// `EXISTS (select)`.
#[must_use]
pub fn exists(select: impl Into<SelectStatement>) -> Expr {
    Expr::Exists {
        select: Box::new(select.into()),
        negated: false,
    }
}

/// `NOT EXISTS (select)`.
#[must_use]
pub fn not_exists(select: impl Into<SelectStatement>) -> Expr {
    Expr::Exists {
        select: Box::new(select.into()),
        negated: true,
    }
}

/// `RAISE(IGNORE)`.
#[must_use]
pub const fn raise_ignore() -> Expr {
    Expr::Raise(RaiseAction::Ignore)
}

/// `RAISE(ROLLBACK, message)`.
#[must_use]
pub fn raise_rollback(message: impl Into<String>) -> Expr {
    Expr::Raise(RaiseAction::Rollback(message.into()))
}

/// `RAISE(ABORT, message)`.
#[must_use]
pub fn raise_abort(message: impl Into<String>) -> Expr {
    Expr::Raise(RaiseAction::Abort(message.into()))
}

/// `RAISE(FAIL, message)`.
#[must_use]
pub fn raise_fail(message: impl Into<String>) -> Expr {
    Expr::Raise(RaiseAction::Fail(message.into()))
}

impl Expr {
    /// Orders by this expression ascending.
    #[must_use]
    pub fn asc(self) -> OrderingTerm {
        OrderingTerm::from(self).asc()
    }

    /// Orders by this expression descending.
    #[must_use]
    pub fn desc(self) -> OrderingTerm {
        OrderingTerm::from(self).desc()
    }
}

// CASE typestate markers

/// Marker: no WHEN branch yet.
pub struct NoWhen;
/// Marker: at least one WHEN branch.
pub struct HasWhen;

/// Builds a `CASE` expression; at least one WHEN branch is required.
pub struct CaseBuilder<S> {
    operand: Option<Box<Expr>>,
    when_then: Vec<(Expr, Expr)>,
    _state: PhantomData<S>,
}

/// Starts a searched `CASE WHEN cond THEN ...` expression.
#[must_use]
pub const fn case() -> CaseBuilder<NoWhen> {
    CaseBuilder {
        operand: None,
        when_then: Vec::new(),
        _state: PhantomData,
    }
}

/// Starts a simple `CASE operand WHEN value THEN ...` expression.
#[must_use]
pub fn case_on(operand: impl Into<Expr>) -> CaseBuilder<NoWhen> {
    CaseBuilder {
        operand: Some(Box::new(operand.into())),
        when_then: Vec::new(),
        _state: PhantomData,
    }
}

impl<S> CaseBuilder<S> {
    /// Adds a `WHEN .. THEN ..` branch.
    #[must_use]
    pub fn when(mut self, when: impl Into<Expr>, then: impl Into<Expr>) -> CaseBuilder<HasWhen> {
        self.when_then.push((when.into(), then.into()));
        CaseBuilder {
            operand: self.operand,
            when_then: self.when_then,
            _state: PhantomData,
        }
    }
}

impl CaseBuilder<HasWhen> {
    /// Finishes with an `ELSE` branch.
    #[must_use]
    pub fn otherwise(self, result: impl Into<Expr>) -> Expr {
        Expr::Case {
            operand: self.operand,
            when_then: self.when_then,
            else_result: Some(Box::new(result.into())),
        }
    }

    /// Finishes without an `ELSE` branch.
    #[must_use]
    pub fn end(self) -> Expr {
        Expr::Case {
            operand: self.operand,
            when_then: self.when_then,
            else_result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ToSql;

    #[test]
    fn test_qualified_columns() {
        assert_eq!(table_col(("main", "t"), "a").to_sql(), r#""main"."t"."a""#);
        assert_eq!(new_row("id").to_sql(), r#"NEW."id""#);
        assert_eq!(old_row("id").to_sql(), r#"OLD."id""#);
    }

    #[test]
    fn test_case() {
        let expr = case()
            .when(col("a").gt(0), "pos")
            .when(col("a").lt(0), "neg")
            .otherwise("zero");
        assert_eq!(
            expr.to_sql(),
            r#"CASE WHEN "a" > 0 THEN 'pos' WHEN "a" < 0 THEN 'neg' ELSE 'zero' END"#
        );
        let expr = case_on(col("k")).when(1, "one").end();
        assert_eq!(expr.to_sql(), r#"CASE "k" WHEN 1 THEN 'one' END"#);
    }

    #[test]
    fn test_row_value() {
        assert_eq!(row([col("a"), col("b")]).to_sql(), r#"("a", "b")"#);
    }
}
