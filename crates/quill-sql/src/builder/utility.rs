//! Transaction control, database attachment, maintenance and EXPLAIN.
//!
//! These statements have no construction states of their own, so most
//! entry points return a finished [`Statement`] directly.

use super::Build;
use crate::ast::{Expr, QualifiedName, Statement, TransactionMode};
use crate::error::{Error, Result};

/// `BEGIN TRANSACTION`.
#[must_use]
pub const fn begin() -> Statement {
    Statement::Begin(None)
}

/// `BEGIN mode TRANSACTION`.
#[must_use]
pub const fn begin_with(mode: TransactionMode) -> Statement {
    Statement::Begin(Some(mode))
}

/// `COMMIT`.
#[must_use]
pub const fn commit() -> Statement {
    Statement::Commit
}

/// `ROLLBACK`.
#[must_use]
pub const fn rollback() -> Statement {
    Statement::Rollback(None)
}

/// `ROLLBACK TO SAVEPOINT name`.
#[must_use]
pub fn rollback_to(savepoint: impl Into<String>) -> Statement {
    Statement::Rollback(Some(savepoint.into()))
}

/// `SAVEPOINT name`.
#[must_use]
pub fn savepoint(name: impl Into<String>) -> Statement {
    Statement::Savepoint(name.into())
}

/// `RELEASE SAVEPOINT name`.
#[must_use]
pub fn release(name: impl Into<String>) -> Statement {
    Statement::Release(name.into())
}

/// `ATTACH DATABASE file AS schema`. The file may be any expression.
#[must_use]
pub fn attach(file: impl Into<Expr>, schema: impl Into<String>) -> Statement {
    Statement::Attach {
        file: file.into(),
        schema: schema.into(),
    }
}

/// `DETACH DATABASE schema`.
#[must_use]
pub fn detach(schema: impl Into<String>) -> Statement {
    Statement::Detach(schema.into())
}

/// `REINDEX [schema.]name`, where name is a table, index or collation.
#[must_use]
pub fn reindex(target: impl Into<QualifiedName>) -> Statement {
    Statement::Reindex(Some(target.into()))
}

/// `REINDEX`.
#[must_use]
pub const fn reindex_all() -> Statement {
    Statement::Reindex(None)
}

/// `ANALYZE [schema.]name`.
#[must_use]
pub fn analyze(target: impl Into<QualifiedName>) -> Statement {
    Statement::Analyze(Some(target.into()))
}

/// `ANALYZE`.
#[must_use]
pub const fn analyze_all() -> Statement {
    Statement::Analyze(None)
}

/// A VACUUM builder.
#[derive(Debug, Clone, Default)]
pub struct Vacuum {
    schema: Option<String>,
    into: Option<Expr>,
}

/// Starts `VACUUM`.
#[must_use]
pub fn vacuum() -> Vacuum {
    Vacuum::default()
}

impl Vacuum {
    /// Vacuums one attached schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// `INTO file`, writing the result to a new database.
    #[must_use]
    pub fn into_file(mut self, file: impl Into<Expr>) -> Self {
        self.into = Some(file.into());
        self
    }
}

impl Build for Vacuum {
    fn finish(self) -> Result<Statement> {
        Ok(Statement::Vacuum {
            schema: self.schema,
            into: self.into,
        })
    }
}

fn wrap_explain(query_plan: bool, statement: impl Build) -> Result<Statement> {
    let statement = statement.build()?;
    if matches!(statement, Statement::Explain { .. }) {
        return Err(Error::state("EXPLAIN", "EXPLAIN cannot wrap another EXPLAIN"));
    }
    Ok(Statement::Explain {
        query_plan,
        statement: Box::new(statement),
    })
}

/// `EXPLAIN statement`.
///
/// # Errors
///
/// Returns [`Error::ConstructionState`] if the statement fails to build or
/// is itself an EXPLAIN.
pub fn explain(statement: impl Build) -> Result<Statement> {
    wrap_explain(false, statement)
}

/// `EXPLAIN QUERY PLAN statement`.
///
/// # Errors
///
/// Returns [`Error::ConstructionState`] if the statement fails to build or
/// is itself an EXPLAIN.
pub fn explain_query_plan(statement: impl Build) -> Result<Statement> {
    wrap_explain(true, statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lit, select};

    #[test]
    fn test_transactions() {
        assert_eq!(begin().render(), "BEGIN TRANSACTION");
        assert_eq!(
            begin_with(TransactionMode::Immediate).render(),
            "BEGIN IMMEDIATE TRANSACTION"
        );
        assert_eq!(commit().render(), "COMMIT");
        assert_eq!(rollback().render(), "ROLLBACK");
        assert_eq!(rollback_to("sp1").render(), r#"ROLLBACK TO SAVEPOINT "sp1""#);
        assert_eq!(savepoint("sp1").render(), r#"SAVEPOINT "sp1""#);
        assert_eq!(release("sp1").render(), r#"RELEASE SAVEPOINT "sp1""#);
    }

    #[test]
    fn test_attach_escapes_path() {
        assert_eq!(
            attach("C:/'file1'.db", "aux").render(),
            r#"ATTACH DATABASE 'C:/''file1''.db' AS "aux""#
        );
        assert_eq!(detach("aux").render(), r#"DETACH DATABASE "aux""#);
    }

    #[test]
    fn test_maintenance() {
        assert_eq!(reindex(("temp", "X")).render(), r#"REINDEX "temp"."X""#);
        assert_eq!(reindex_all().render(), "REINDEX");
        assert_eq!(analyze("users").render(), r#"ANALYZE "users""#);
        assert_eq!(analyze_all().render(), "ANALYZE");
        assert_eq!(vacuum().build().unwrap().render(), "VACUUM");
        assert_eq!(
            vacuum()
                .schema("main")
                .into_file(lit("backup.db"))
                .build()
                .unwrap()
                .render(),
            r#"VACUUM "main" INTO 'backup.db'"#
        );
    }

    #[test]
    fn test_explain() {
        let plan = explain_query_plan(select([col("a")]).from("t")).unwrap();
        assert_eq!(plan.render(), r#"EXPLAIN QUERY PLAN SELECT "a" FROM "t""#);
        assert!(explain(plan).is_err());
        assert_eq!(explain(commit()).unwrap().render(), "EXPLAIN COMMIT");
    }
}
