//! SELECT statement builder using the typestate pattern.
//!
//! A select starts as a single core whose clauses are still open. Set
//! operators append further cores and close the core clauses; ORDER BY,
//! LIMIT and OFFSET bind to the whole compound and close it for good.

use std::marker::PhantomData;

use super::{and_where, Build};
use crate::ast::{
    CompoundOperator, Expr, OrderingTerm, ResultColumn, SelectBody, SelectCore, SelectStatement,
    Statement, TableExpr, WithClause,
};
use crate::error::{Error, Result};

// Typestate markers (zero-sized types)

/// Marker: a single SELECT core whose clauses are still open.
pub struct Core;
/// Marker: a single VALUES core.
pub struct Values;
/// Marker: two or more cores joined by set operators.
pub struct Compound;
/// Marker: ORDER BY has been attached.
pub struct Ordered;
/// Marker: LIMIT has been attached.
pub struct Limited;
/// Marker: OFFSET has been attached.
pub struct Offset;

/// Marker: no WITH prefix; the select may become part of a compound.
pub struct Plain;
/// Marker: the select carries a WITH prefix and can only lead a compound.
pub struct Prefixed;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Core {}
    impl Sealed for super::Values {}
    impl Sealed for super::Compound {}
}

/// States that accept another set operator and ORDER BY / LIMIT.
pub trait Compoundable: sealed::Sealed {}
impl Compoundable for Core {}
impl Compoundable for Values {}
impl Compoundable for Compound {}

/// States holding exactly one core.
pub trait SingleCore: Compoundable {}
impl SingleCore for Core {}
impl SingleCore for Values {}

/// A SELECT statement builder.
///
/// `S` tracks the construction state and `W` whether a WITH prefix is
/// attached.
pub struct Select<S, W = Plain> {
    statement: SelectStatement,
    _state: PhantomData<(S, W)>,
}

impl<S, W> Select<S, W> {
    const fn wrap(statement: SelectStatement) -> Self {
        Self {
            statement,
            _state: PhantomData,
        }
    }

    fn into_state<T>(self) -> Select<T, W> {
        Select::wrap(self.statement)
    }

    pub(crate) fn with_prefix(mut self, with: WithClause) -> Select<S, Prefixed> {
        self.statement.with = Some(with);
        Select::wrap(self.statement)
    }

    fn edit_core(mut self, edit: impl FnOnce(&mut SelectCore)) -> Self {
        if let SelectBody::Select(core) = &mut self.statement.body {
            edit(core);
        }
        self
    }
}

pub(crate) fn select_core(distinct: bool, columns: Vec<ResultColumn>) -> SelectStatement {
    SelectStatement::from_body(SelectBody::Select(SelectCore {
        distinct,
        columns,
        ..SelectCore::default()
    }))
}

pub(crate) fn values_body<I, R, T>(rows: I) -> Result<SelectStatement>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    let rows: Vec<Vec<Expr>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect();
    check_rows("VALUES", &rows, None)?;
    Ok(SelectStatement::from_body(SelectBody::Values(rows)))
}

/// Checks that rows are non-empty and of equal width (and of `width` if given).
pub(crate) fn check_rows(
    builder: &'static str,
    rows: &[Vec<Expr>],
    width: Option<usize>,
) -> Result<()> {
    let Some(first) = rows.first() else {
        return Err(Error::state(builder, "at least one row is required"));
    };
    let width = width.unwrap_or(first.len());
    if width == 0 {
        return Err(Error::state(builder, "a row must have at least one value"));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != width) {
        return Err(Error::state(
            builder,
            format!("row has {} values, expected {width}", row.len()),
        ));
    }
    Ok(())
}

/// Starts `SELECT columns`; an empty column list renders as `*`.
#[must_use]
pub fn select<I, T>(columns: I) -> Select<Core>
where
    I: IntoIterator<Item = T>,
    T: Into<ResultColumn>,
{
    Select::wrap(select_core(false, columns.into_iter().map(Into::into).collect()))
}

/// Starts `SELECT DISTINCT columns`.
#[must_use]
pub fn select_distinct<I, T>(columns: I) -> Select<Core>
where
    I: IntoIterator<Item = T>,
    T: Into<ResultColumn>,
{
    Select::wrap(select_core(true, columns.into_iter().map(Into::into).collect()))
}

/// Starts `SELECT *`.
#[must_use]
pub fn select_all() -> Select<Core> {
    Select::wrap(select_core(false, Vec::new()))
}

/// Starts a `VALUES (..), (..)` select.
///
/// # Errors
///
/// Returns [`Error::ConstructionState`] if there are no rows, a row is
/// empty, or the rows differ in width.
pub fn values<I, R, T>(rows: I) -> Result<Select<Values>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    values_body(rows).map(Select::wrap)
}

impl<W> Select<Core, W> {
    /// Adds DISTINCT.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.edit_core(|core| core.distinct = true)
    }

    /// Sets the FROM clause.
    #[must_use]
    pub fn from(self, from: impl Into<TableExpr>) -> Self {
        self.edit_core(|core| core.from = Some(from.into()))
    }

    /// Adds a WHERE condition; repeated calls are combined with AND.
    #[must_use]
    pub fn where_(self, condition: impl Into<Expr>) -> Self {
        self.edit_core(|core| and_where(&mut core.where_clause, condition.into()))
    }

    /// Appends GROUP BY expressions.
    #[must_use]
    pub fn group_by<I, T>(self, exprs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.edit_core(|core| core.group_by.extend(exprs.into_iter().map(Into::into)))
    }

    /// Adds a HAVING condition; repeated calls are combined with AND.
    #[must_use]
    pub fn having(self, condition: impl Into<Expr>) -> Self {
        self.edit_core(|core| and_where(&mut core.having, condition.into()))
    }
}

impl<S: Compoundable, W> Select<S, W> {
    fn compound<C: SingleCore>(
        mut self,
        op: CompoundOperator,
        other: Select<C, Plain>,
    ) -> Select<Compound, W> {
        self.statement.compounds.push((op, other.statement.body));
        self.into_state()
    }

    /// Appends `UNION other`.
    #[must_use]
    pub fn union<C: SingleCore>(self, other: Select<C, Plain>) -> Select<Compound, W> {
        self.compound(CompoundOperator::Union, other)
    }

    /// Appends `UNION ALL other`.
    #[must_use]
    pub fn union_all<C: SingleCore>(self, other: Select<C, Plain>) -> Select<Compound, W> {
        self.compound(CompoundOperator::UnionAll, other)
    }

    /// Appends `INTERSECT other`.
    #[must_use]
    pub fn intersect<C: SingleCore>(self, other: Select<C, Plain>) -> Select<Compound, W> {
        self.compound(CompoundOperator::Intersect, other)
    }

    /// Appends `EXCEPT other`.
    #[must_use]
    pub fn except<C: SingleCore>(self, other: Select<C, Plain>) -> Select<Compound, W> {
        self.compound(CompoundOperator::Except, other)
    }

    /// Attaches ORDER BY to the whole statement.
    #[must_use]
    pub fn order_by<I, T>(mut self, terms: I) -> Select<Ordered, W>
    where
        I: IntoIterator<Item = T>,
        T: Into<OrderingTerm>,
    {
        self.statement
            .order_by
            .extend(terms.into_iter().map(Into::into));
        self.into_state()
    }

    /// Attaches LIMIT to the whole statement.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Expr>) -> Select<Limited, W> {
        self.statement.limit = Some(limit.into());
        self.into_state()
    }
}

impl<W> Select<Ordered, W> {
    /// Appends more ORDER BY terms.
    #[must_use]
    pub fn then_by<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OrderingTerm>,
    {
        self.statement
            .order_by
            .extend(terms.into_iter().map(Into::into));
        self
    }

    /// Attaches LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Expr>) -> Select<Limited, W> {
        self.statement.limit = Some(limit.into());
        self.into_state()
    }
}

impl<W> Select<Limited, W> {
    /// Attaches OFFSET.
    #[must_use]
    pub fn offset(mut self, offset: impl Into<Expr>) -> Select<Offset, W> {
        self.statement.offset = Some(offset.into());
        self.into_state()
    }
}

impl<S, W> From<Select<S, W>> for SelectStatement {
    fn from(select: Select<S, W>) -> Self {
        select.statement
    }
}

impl<S, W> Build for Select<S, W> {
    fn finish(self) -> Result<Statement> {
        Ok(Statement::Select(self.statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, count_star, lit};

    fn render(select: impl Build) -> String {
        select.build().unwrap().render()
    }

    #[test]
    fn test_select_star() {
        assert_eq!(render(select_all().from("users")), r#"SELECT * FROM "users""#);
    }

    #[test]
    fn test_where_is_and_combined() {
        let sql = render(
            select([col("id")])
                .from("t")
                .where_(col("a").eq(1))
                .where_(col("b").eq(2).or(col("c").eq(3))),
        );
        assert_eq!(
            sql,
            r#"SELECT "id" FROM "t" WHERE "a" = 1 AND ("b" = 2 OR "c" = 3)"#
        );
    }

    #[test]
    fn test_group_by_having() {
        let sql = render(
            select([ResultColumn::from(col("dept")), count_star().alias("n")])
                .from("emp")
                .group_by([col("dept")])
                .having(count_star().gt(5)),
        );
        assert_eq!(
            sql,
            r#"SELECT "dept", COUNT(*) AS "n" FROM "emp" GROUP BY "dept" HAVING COUNT(*) > 5"#
        );
    }

    #[test]
    fn test_compound_order_limit_bind_once() {
        let sql = render(
            select([col("a")])
                .from("t1")
                .union_all(select([col("b")]).from("t2"))
                .union(select([col("c")]).from("t3"))
                .order_by([lit(1)])
                .limit(10)
                .offset(5),
        );
        assert_eq!(
            sql,
            r#"SELECT "a" FROM "t1" UNION ALL SELECT "b" FROM "t2" UNION SELECT "c" FROM "t3" ORDER BY 1 LIMIT 10 OFFSET 5"#
        );
    }

    #[test]
    fn test_values_rows() {
        let sql = render(values([[lit(1), lit("a")], [lit(2), lit("b")]]).unwrap());
        assert_eq!(sql, "VALUES (1, 'a'), (2, 'b')");
    }

    #[test]
    fn test_values_rejects_ragged_and_empty() {
        let ragged = values(vec![vec![lit(1), lit(2)], vec![lit(3)]]);
        assert!(ragged.err().is_some_and(|e| e.is_construction_state()));
        let empty = values(Vec::<Vec<Expr>>::new());
        assert!(empty.err().is_some_and(|e| e.is_construction_state()));
        let empty_row = values(vec![Vec::<Expr>::new()]);
        assert!(empty_row.is_err());
    }

    #[test]
    fn test_order_terms() {
        let sql = render(
            select_all()
                .from("t")
                .order_by([col("name").desc().collate("NOCASE").nulls_last()])
                .then_by([col("id").asc()]),
        );
        assert_eq!(
            sql,
            r#"SELECT * FROM "t" ORDER BY "name" COLLATE "NOCASE" DESC NULLS LAST, "id" ASC"#
        );
    }

    #[test]
    fn test_raise_outside_trigger_rejected() {
        let err = select([crate::builder::raise_ignore()]).build();
        assert!(err.unwrap_err().is_construction_state());
    }
}
