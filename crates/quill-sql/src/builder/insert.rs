//! INSERT / REPLACE statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::select::check_rows;
use super::update::{assign, assign_row};
use super::{and_where, Build};
use crate::ast::{
    Assignment, ConflictResolution, Expr, IndexedColumn, InsertSource, InsertStatement,
    InsertVerb, QualifiedName, ResultColumn, SelectStatement, Statement, Upsert, UpsertAction,
    UpsertTarget, WithClause,
};
use crate::error::{Error, Result};

// Typestate markers (zero-sized types)

/// Marker: no column list and no source yet.
pub struct NoSource;
/// Marker: a column list was given, no source yet.
pub struct HasColumns;
/// Marker: the source is a list of rows.
pub struct Rows;
/// Marker: the source is `DEFAULT VALUES`.
pub struct DefaultValues;
/// Marker: the source is a select statement.
pub struct FromSelect;

/// States in which the source has not been chosen.
pub trait Unsourced {}
impl Unsourced for NoSource {}
impl Unsourced for HasColumns {}

/// States with a source.
pub trait Sourced {}
impl Sourced for Rows {}
impl Sourced for DefaultValues {}
impl Sourced for FromSelect {}

/// An INSERT statement builder.
///
/// The conflict-resolution variant is fixed by the entry point
/// ([`insert_into`], [`replace_into`], [`insert_or`]).
pub struct Insert<S> {
    with: Option<WithClause>,
    verb: InsertVerb,
    table: QualifiedName,
    alias: Option<String>,
    columns: Vec<String>,
    rows: Vec<Vec<Expr>>,
    select: Option<SelectStatement>,
    upserts: Vec<Upsert>,
    returning: Vec<ResultColumn>,
    _state: PhantomData<S>,
}

fn start(verb: InsertVerb, table: QualifiedName) -> Insert<NoSource> {
    Insert {
        with: None,
        verb,
        table,
        alias: None,
        columns: Vec::new(),
        rows: Vec::new(),
        select: None,
        upserts: Vec::new(),
        returning: Vec::new(),
        _state: PhantomData,
    }
}

/// Starts `INSERT INTO table`.
#[must_use]
pub fn insert_into(table: impl Into<QualifiedName>) -> Insert<NoSource> {
    start(InsertVerb::Insert, table.into())
}

/// Starts `REPLACE INTO table`.
#[must_use]
pub fn replace_into(table: impl Into<QualifiedName>) -> Insert<NoSource> {
    start(InsertVerb::Replace, table.into())
}

/// Starts `INSERT OR action INTO table`.
#[must_use]
pub fn insert_or(action: ConflictResolution, table: impl Into<QualifiedName>) -> Insert<NoSource> {
    start(InsertVerb::InsertOr(action), table.into())
}

impl<S> Insert<S> {
    fn into_state<T>(self) -> Insert<T> {
        Insert {
            with: self.with,
            verb: self.verb,
            table: self.table,
            alias: self.alias,
            columns: self.columns,
            rows: self.rows,
            select: self.select,
            upserts: self.upserts,
            returning: self.returning,
            _state: PhantomData,
        }
    }

    pub(crate) fn with_prefix(mut self, with: WithClause) -> Self {
        self.with = Some(with);
        self
    }
}

impl<S: Unsourced> Insert<S> {
    /// Aliases the target table (`INSERT INTO t AS alias`).
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds the first row of values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if the row is empty or does not
    /// match the column list.
    pub fn values<I, T>(mut self, row: I) -> Result<Insert<Rows>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.push_row(row.into_iter().map(Into::into).collect())?;
        Ok(self.into_state())
    }

    /// Uses a select statement as the source.
    #[must_use]
    pub fn select(mut self, select: impl Into<SelectStatement>) -> Insert<FromSelect> {
        self.select = Some(select.into());
        self.into_state()
    }
}

impl<S> Insert<S> {
    fn push_row(&mut self, row: Vec<Expr>) -> Result<()> {
        let width = if self.columns.is_empty() {
            self.rows.first().map(Vec::len)
        } else {
            Some(self.columns.len())
        };
        check_rows("INSERT", core::slice::from_ref(&row), width)?;
        self.rows.push(row);
        Ok(())
    }
}

impl Insert<NoSource> {
    /// Sets the column list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn columns<I, C>(mut self, columns: I) -> Result<Insert<HasColumns>>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.columns = super::non_empty("INSERT", "column list", columns)?;
        Ok(self.into_state())
    }

    /// Uses `DEFAULT VALUES` as the source.
    #[must_use]
    pub fn default_values(self) -> Insert<DefaultValues> {
        self.into_state()
    }
}

impl Insert<Rows> {
    /// Appends another row of values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if the row width differs from
    /// the previous rows.
    pub fn values<I, T>(mut self, row: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.push_row(row.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    fn open_conflict(self, target: Option<UpsertTarget>) -> Result<ConflictClause> {
        if self.upserts.iter().any(|upsert| upsert.target.is_none()) {
            return Err(Error::state(
                "INSERT",
                "only the last ON CONFLICT clause may omit its conflict target",
            ));
        }
        Ok(ConflictClause {
            insert: self,
            target,
        })
    }

    /// Starts `ON CONFLICT (columns)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty or a
    /// previous clause omitted its target.
    pub fn on_conflict<I, C>(self, columns: I) -> Result<ConflictClause>
    where
        I: IntoIterator<Item = C>,
        C: Into<IndexedColumn>,
    {
        let columns = super::non_empty("ON CONFLICT", "conflict target", columns)?;
        self.open_conflict(Some(UpsertTarget {
            columns,
            where_clause: None,
        }))
    }

    /// Starts `ON CONFLICT` without a target, matching any uniqueness
    /// constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if a previous clause omitted its
    /// target.
    pub fn on_any_conflict(self) -> Result<ConflictClause> {
        self.open_conflict(None)
    }
}

impl<S: Sourced> Insert<S> {
    /// Appends RETURNING columns.
    #[must_use]
    pub fn returning<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResultColumn>,
    {
        self.returning.extend(columns.into_iter().map(Into::into));
        self
    }
}

/// An `ON CONFLICT` clause waiting for its action.
pub struct ConflictClause {
    insert: Insert<Rows>,
    target: Option<UpsertTarget>,
}

impl ConflictClause {
    /// Adds a partial-index predicate to the conflict target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] for a clause without a target.
    pub fn target_where(mut self, condition: impl Into<Expr>) -> Result<Self> {
        let Some(target) = self.target.as_mut() else {
            return Err(Error::state(
                "ON CONFLICT",
                "a target predicate needs a conflict target",
            ));
        };
        and_where(&mut target.where_clause, condition.into());
        Ok(self)
    }

    fn close(mut self, action: UpsertAction) -> Insert<Rows> {
        self.insert.upserts.push(Upsert {
            target: self.target,
            action,
        });
        self.insert
    }

    /// `DO NOTHING`.
    #[must_use]
    pub fn do_nothing(self) -> Insert<Rows> {
        self.close(UpsertAction::Nothing)
    }

    /// Starts `DO UPDATE SET column = value`.
    #[must_use]
    pub fn do_update(self, column: impl Into<String>, value: impl Into<Expr>) -> DoUpdate {
        DoUpdate {
            clause: self,
            assignments: vec![assign(column, value)],
            where_clause: None,
        }
    }
}

/// A `DO UPDATE SET ..` action with at least one assignment.
pub struct DoUpdate {
    clause: ConflictClause,
    assignments: Vec<Assignment>,
    where_clause: Option<Expr>,
}

impl DoUpdate {
    /// Adds `column = value`.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.assignments.push(assign(column, value));
        self
    }

    /// Adds `(columns) = row`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn set_row<I, C>(mut self, columns: I, value: impl Into<Expr>) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.assignments.push(assign_row(columns, value)?);
        Ok(self)
    }

    /// Adds a WHERE condition to the update action.
    #[must_use]
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        and_where(&mut self.where_clause, condition.into());
        self
    }

    /// Closes the clause and returns to the INSERT builder.
    #[must_use]
    pub fn done(self) -> Insert<Rows> {
        self.clause.close(UpsertAction::Update {
            assignments: self.assignments,
            where_clause: self.where_clause,
        })
    }
}

impl<S: Sourced> Insert<S> {
    fn source(&mut self) -> InsertSource {
        if let Some(select) = self.select.take() {
            InsertSource::Select(Box::new(select))
        } else if self.rows.is_empty() {
            InsertSource::DefaultValues
        } else {
            InsertSource::Values(std::mem::take(&mut self.rows))
        }
    }
}

impl<S: Sourced> Build for Insert<S> {
    fn finish(mut self) -> Result<Statement> {
        let source = self.source();
        Ok(Statement::Insert(InsertStatement {
            with: self.with,
            verb: self.verb,
            table: self.table,
            alias: self.alias,
            columns: self.columns,
            source,
            upserts: self.upserts,
            returning: self.returning,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, excluded, lit, select};

    fn render(insert: impl Build) -> String {
        insert.build().unwrap().render()
    }

    #[test]
    fn test_insert_rows() {
        let sql = render(
            insert_into("users")
                .columns(["name", "age"])
                .unwrap()
                .values([lit("Alice"), lit(30)])
                .unwrap()
                .values([lit("Bob"), lit(25)])
                .unwrap(),
        );
        assert_eq!(
            sql,
            r#"INSERT INTO "users" ("name", "age") VALUES ('Alice', 30), ('Bob', 25)"#
        );
    }

    #[test]
    fn test_conflict_variants() {
        let sql = render(insert_or(ConflictResolution::Ignore, "t").default_values());
        assert_eq!(sql, r#"INSERT OR IGNORE INTO "t" DEFAULT VALUES"#);
        let sql = render(replace_into(("aux", "t")).select(select([col("a")]).from("s")));
        assert_eq!(sql, r#"REPLACE INTO "aux"."t" SELECT "a" FROM "s""#);
    }

    #[test]
    fn test_row_width_checked() {
        let err = insert_into("t")
            .columns(["a", "b"])
            .unwrap()
            .values([lit(1)]);
        assert!(err.err().is_some_and(|e| e.is_construction_state()));
        let err = insert_into("t")
            .values([lit(1), lit(2)])
            .unwrap()
            .values([lit(3)]);
        assert!(err.is_err());
    }

    #[test]
    fn test_upsert() {
        let sql = render(
            insert_into("kv")
                .columns(["k", "v"])
                .unwrap()
                .values([lit("a"), lit(1)])
                .unwrap()
                .on_conflict(["k"])
                .unwrap()
                .do_update("v", excluded("v"))
                .where_(col("v").lt(excluded("v")))
                .done()
                .returning([col("k")]),
        );
        assert_eq!(
            sql,
            r#"INSERT INTO "kv" ("k", "v") VALUES ('a', 1) ON CONFLICT ("k") DO UPDATE SET "v" = "excluded"."v" WHERE "v" < "excluded"."v" RETURNING "k""#
        );
    }

    #[test]
    fn test_untargeted_upsert_must_be_last() {
        let insert = insert_into("t")
            .values([lit(1)])
            .unwrap()
            .on_any_conflict()
            .unwrap()
            .do_nothing();
        assert!(insert.on_conflict(["a"]).is_err());
    }
}
