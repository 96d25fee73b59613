//! DROP TABLE / INDEX / TRIGGER / VIEW.

use super::Build;
use crate::ast::{DropStatement, ObjectKind, QualifiedName, Statement};
use crate::error::Result;

/// A DROP statement builder.
#[derive(Debug, Clone)]
pub struct DropObject {
    statement: DropStatement,
}

const fn drop_object(kind: ObjectKind, name: QualifiedName) -> DropObject {
    DropObject {
        statement: DropStatement {
            kind,
            if_exists: false,
            name,
        },
    }
}

/// `DROP TABLE name`.
#[must_use]
pub fn drop_table(name: impl Into<QualifiedName>) -> DropObject {
    drop_object(ObjectKind::Table, name.into())
}

/// `DROP INDEX name`.
#[must_use]
pub fn drop_index(name: impl Into<QualifiedName>) -> DropObject {
    drop_object(ObjectKind::Index, name.into())
}

/// `DROP TRIGGER name`.
#[must_use]
pub fn drop_trigger(name: impl Into<QualifiedName>) -> DropObject {
    drop_object(ObjectKind::Trigger, name.into())
}

/// `DROP VIEW name`.
#[must_use]
pub fn drop_view(name: impl Into<QualifiedName>) -> DropObject {
    drop_object(ObjectKind::View, name.into())
}

impl DropObject {
    /// `IF EXISTS`.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.statement.if_exists = true;
        self
    }
}

impl Build for DropObject {
    fn finish(self) -> Result<Statement> {
        Ok(Statement::Drop(self.statement))
    }
}
