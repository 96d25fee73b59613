//! Statement AST types: DML, utility statements and the root `Statement`.

use super::expression::Expr;
use super::ident::QualifiedName;
use super::schema::{
    AlterTableStatement, CreateIndexStatement, CreateTableStatement, CreateTriggerStatement,
    CreateViewStatement, CreateVirtualTableStatement, DropStatement, IndexedColumn,
};
use super::select::{OrderingTerm, ResultColumn, SelectStatement, WithClause};
use super::table::{TableExpr, TableRef};

/// Conflict-resolution algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictResolution {
    /// `ROLLBACK`.
    Rollback,
    /// `ABORT`.
    Abort,
    /// `FAIL`.
    Fail,
    /// `IGNORE`.
    Ignore,
    /// `REPLACE`.
    Replace,
}

impl ConflictResolution {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

/// The leading verb of an INSERT statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertVerb {
    /// `INSERT`.
    Insert,
    /// `REPLACE`.
    Replace,
    /// `INSERT OR action`.
    InsertOr(ConflictResolution),
}

/// The rows an INSERT statement writes.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `VALUES (..), (..)`; non-empty rows of equal width.
    Values(Vec<Vec<Expr>>),
    /// A select statement.
    Select(Box<SelectStatement>),
    /// `DEFAULT VALUES`.
    DefaultValues,
}

/// A SET assignment: one column, or a column tuple assigned a row value.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target columns, never empty.
    pub columns: Vec<String>,
    /// Assigned value.
    pub value: Expr,
}

/// The conflict target of an upsert clause.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertTarget {
    /// Indexed columns matching a uniqueness constraint.
    pub columns: Vec<IndexedColumn>,
    /// Partial index predicate.
    pub where_clause: Option<Expr>,
}

/// What an upsert clause does on conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertAction {
    /// `DO NOTHING`.
    Nothing,
    /// `DO UPDATE SET .. [WHERE ..]`.
    Update {
        /// Assignments, never empty.
        assignments: Vec<Assignment>,
        /// Filter.
        where_clause: Option<Expr>,
    },
}

/// An `ON CONFLICT` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    /// Conflict target; only the last clause may omit it.
    pub target: Option<UpsertTarget>,
    /// Action.
    pub action: UpsertAction,
}

/// `INSERT` / `REPLACE`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// WITH prefix.
    pub with: Option<WithClause>,
    /// Leading verb.
    pub verb: InsertVerb,
    /// Target table.
    pub table: QualifiedName,
    /// Target alias.
    pub alias: Option<String>,
    /// Column list.
    pub columns: Vec<String>,
    /// Source rows.
    pub source: InsertSource,
    /// Upsert clauses.
    pub upserts: Vec<Upsert>,
    /// RETURNING list.
    pub returning: Vec<ResultColumn>,
}

/// `UPDATE`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// WITH prefix.
    pub with: Option<WithClause>,
    /// `OR action`.
    pub or: Option<ConflictResolution>,
    /// Target table with alias and index hint.
    pub table: TableRef,
    /// Assignments, never empty.
    pub assignments: Vec<Assignment>,
    /// `FROM` clause.
    pub from: Option<TableExpr>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING list.
    pub returning: Vec<ResultColumn>,
    /// ORDER BY terms; only present with a limit.
    pub order_by: Vec<OrderingTerm>,
    /// LIMIT.
    pub limit: Option<Expr>,
    /// OFFSET; only present with a limit.
    pub offset: Option<Expr>,
}

/// `DELETE`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// WITH prefix.
    pub with: Option<WithClause>,
    /// Target table with alias and index hint.
    pub table: TableRef,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING list.
    pub returning: Vec<ResultColumn>,
    /// ORDER BY terms; only present with a limit.
    pub order_by: Vec<OrderingTerm>,
    /// LIMIT.
    pub limit: Option<Expr>,
    /// OFFSET; only present with a limit.
    pub offset: Option<Expr>,
}

/// Transaction locking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionMode {
    /// `DEFERRED`.
    Deferred,
    /// `IMMEDIATE`.
    Immediate,
    /// `EXCLUSIVE`.
    Exclusive,
}

impl TransactionMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deferred => "DEFERRED",
            Self::Immediate => "IMMEDIATE",
            Self::Exclusive => "EXCLUSIVE",
        }
    }
}

/// A complete SQLite statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT or VALUES, possibly compound.
    Select(SelectStatement),
    /// INSERT / REPLACE.
    Insert(InsertStatement),
    /// UPDATE.
    Update(UpdateStatement),
    /// DELETE.
    Delete(DeleteStatement),
    /// CREATE TABLE.
    CreateTable(CreateTableStatement),
    /// CREATE INDEX.
    CreateIndex(CreateIndexStatement),
    /// CREATE VIEW.
    CreateView(CreateViewStatement),
    /// CREATE TRIGGER.
    CreateTrigger(CreateTriggerStatement),
    /// CREATE VIRTUAL TABLE.
    CreateVirtualTable(CreateVirtualTableStatement),
    /// ALTER TABLE.
    AlterTable(AlterTableStatement),
    /// DROP TABLE / INDEX / TRIGGER / VIEW.
    Drop(DropStatement),
    /// `BEGIN [mode] TRANSACTION`.
    Begin(Option<TransactionMode>),
    /// `COMMIT`.
    Commit,
    /// `ROLLBACK [TO SAVEPOINT name]`.
    Rollback(Option<String>),
    /// `SAVEPOINT name`.
    Savepoint(String),
    /// `RELEASE SAVEPOINT name`.
    Release(String),
    /// `ATTACH DATABASE file AS schema`.
    Attach {
        /// File name expression.
        file: Expr,
        /// Schema alias.
        schema: String,
    },
    /// `DETACH DATABASE schema`.
    Detach(String),
    /// `VACUUM [schema] [INTO file]`.
    Vacuum {
        /// Schema.
        schema: Option<String>,
        /// Output file expression.
        into: Option<Expr>,
    },
    /// `REINDEX [name]`.
    Reindex(Option<QualifiedName>),
    /// `ANALYZE [name]`.
    Analyze(Option<QualifiedName>),
    /// `EXPLAIN [QUERY PLAN] statement`.
    Explain {
        /// Whether QUERY PLAN was specified.
        query_plan: bool,
        /// The explained statement, never itself an EXPLAIN.
        statement: Box<Statement>,
    },
}

impl Statement {
    /// Returns a short name of the statement kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::CreateTable(_) => "CREATE TABLE",
            Self::CreateIndex(_) => "CREATE INDEX",
            Self::CreateView(_) => "CREATE VIEW",
            Self::CreateTrigger(_) => "CREATE TRIGGER",
            Self::CreateVirtualTable(_) => "CREATE VIRTUAL TABLE",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::Drop(_) => "DROP",
            Self::Begin(_) => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback(_) => "ROLLBACK",
            Self::Savepoint(_) => "SAVEPOINT",
            Self::Release(_) => "RELEASE",
            Self::Attach { .. } => "ATTACH",
            Self::Detach(_) => "DETACH",
            Self::Vacuum { .. } => "VACUUM",
            Self::Reindex(_) => "REINDEX",
            Self::Analyze(_) => "ANALYZE",
            Self::Explain { .. } => "EXPLAIN",
        }
    }
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Self::Select(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_resolution() {
        assert_eq!(ConflictResolution::Replace.as_str(), "REPLACE");
        assert_eq!(ConflictResolution::Rollback.as_str(), "ROLLBACK");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Statement::Commit.kind(), "COMMIT");
        assert_eq!(Statement::Detach(String::from("aux")).kind(), "DETACH");
    }
}
