//! Abstract Syntax Tree (AST) types for SQLite statements.

mod expression;
mod ident;
mod literal;
mod schema;
mod select;
mod statement;
mod table;
mod visit;

pub use expression::{
    Associativity, BinaryOp, ColumnRef, Expr, FunctionArgs, FunctionCall, FunctionName, LikeOp,
    PostfixOp, Precedence, Qualifier, RaiseAction, UnaryOp,
};
pub use ident::{quote_identifier, QualifiedName};
pub use literal::{escape_text, FiniteReal, Literal, Numeral};
pub use schema::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnConstraintKind, ColumnDef,
    CreateIndexStatement, CreateTableBody, CreateTableStatement, CreateTriggerStatement,
    CreateViewStatement, CreateVirtualTableStatement, DefaultValue, Deferrable, DropStatement,
    ForeignKey, ForeignKeyAction, GeneratedKind, IndexedColumn, InitialCheck, ObjectKind,
    TableConstraint, TableConstraintKind, TriggerEvent, TriggerTiming,
};
pub use select::{
    CompoundOperator, Cte, NullOrdering, OrderDirection, OrderingTerm, ResultColumn, SelectBody,
    SelectCore, SelectStatement, WithClause,
};
pub use statement::{
    Assignment, ConflictResolution, DeleteStatement, InsertSource, InsertStatement, InsertVerb,
    Statement, TransactionMode, UpdateStatement, Upsert, UpsertAction, UpsertTarget,
};
pub use table::{IndexHint, Join, JoinConstraint, JoinKind, JoinOperator, TableExpr, TableRef};
