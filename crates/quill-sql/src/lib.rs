//! # quill-sql
//!
//! Typestate builders and a precedence-aware renderer for SQLite statements.
//!
//! This crate provides:
//! - A typed AST for the SQLite statement grammar: queries, DML, DDL,
//!   transactions and maintenance statements
//! - Builders that only expose the clauses valid in their current state
//! - A renderer that quotes identifiers, escapes literals and adds exactly
//!   the parentheses operator precedence requires
//!
//! ## Building statements
//!
//! ```rust
//! use quill_sql::prelude::*;
//!
//! let statement = create_table("users")
//!     .if_not_exists()
//!     .column(column_def("id").type_name("INTEGER").primary_key())
//!     .column(column_def("email").type_name("TEXT").not_null().unique())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     statement.render(),
//!     r#"CREATE TABLE IF NOT EXISTS "users" ("id" INTEGER PRIMARY KEY, "email" TEXT NOT NULL UNIQUE)"#
//! );
//! ```
//!
//! Clauses in the wrong order do not compile:
//!
//! ```compile_fail
//! use quill_sql::prelude::*;
//!
//! // OFFSET needs a LIMIT first.
//! let query = select([col("id")]).from("users").offset(10);
//! ```
//!
//! ## Literals
//!
//! Values are rendered inline as SQLite literals; there are no placeholders.
//!
//! ```rust
//! use quill_sql::prelude::*;
//!
//! let statement = attach("C:/'file1'.db", "aux");
//! assert_eq!(statement.render(), r#"ATTACH DATABASE 'C:/''file1''.db' AS "aux""#);
//! ```

pub mod ast;
pub mod builder;
mod error;
pub mod render;

pub use ast::Statement;
pub use builder::Build;
pub use error::{Error, Result};

/// Builder entry points, extension traits and the AST types commonly
/// passed to them.
pub mod prelude {
    pub use crate::ast::{
        ConflictResolution, Expr, ForeignKeyAction, GeneratedKind, IndexedColumn, InitialCheck,
        JoinKind, Literal, OrderDirection, Statement, TableConstraint, TransactionMode,
        TriggerEvent,
    };
    pub use crate::builder::*;
    pub use crate::render::ToSql;
    pub use crate::Error;
}
