//! ALTER TABLE builder using the typestate pattern.

use std::marker::PhantomData;

use super::Build;
use crate::ast::{AlterTableAction, AlterTableStatement, ColumnDef, QualifiedName, Statement};
use crate::error::{Error, Result};

// Typestate markers (zero-sized types)

/// Marker: no action chosen yet.
pub struct Pending;
/// Marker: the single action is set.
pub struct AlterAction;

/// An ALTER TABLE builder. Exactly one action must be chosen before it can
/// be built.
pub struct AlterTable<S> {
    table: QualifiedName,
    action: Option<AlterTableAction>,
    _state: PhantomData<S>,
}

/// Starts `ALTER TABLE name`.
#[must_use]
pub fn alter_table(table: impl Into<QualifiedName>) -> AlterTable<Pending> {
    AlterTable {
        table: table.into(),
        action: None,
        _state: PhantomData,
    }
}

impl AlterTable<Pending> {
    fn act(self, action: AlterTableAction) -> AlterTable<AlterAction> {
        AlterTable {
            table: self.table,
            action: Some(action),
            _state: PhantomData,
        }
    }

    /// `RENAME TO name`.
    #[must_use]
    pub fn rename_to(self, name: impl Into<String>) -> AlterTable<AlterAction> {
        self.act(AlterTableAction::RenameTo(name.into()))
    }

    /// `RENAME COLUMN from TO to`.
    #[must_use]
    pub fn rename_column(
        self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> AlterTable<AlterAction> {
        self.act(AlterTableAction::RenameColumn {
            from: from.into(),
            to: to.into(),
        })
    }

    /// `ADD COLUMN def`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if the column is a PRIMARY KEY
    /// or UNIQUE, which SQLite cannot add to an existing table.
    pub fn add_column(self, column: ColumnDef) -> Result<AlterTable<AlterAction>> {
        if column.is_primary_key() || column.is_unique() {
            return Err(Error::state(
                "ALTER TABLE",
                format!(
                    "added column `{}` cannot be PRIMARY KEY or UNIQUE",
                    column.name
                ),
            ));
        }
        Ok(self.act(AlterTableAction::AddColumn(column)))
    }

    /// `DROP COLUMN name`.
    #[must_use]
    pub fn drop_column(self, name: impl Into<String>) -> AlterTable<AlterAction> {
        self.act(AlterTableAction::DropColumn(name.into()))
    }
}

impl Build for AlterTable<AlterAction> {
    fn finish(self) -> Result<Statement> {
        let action = self
            .action
            .ok_or_else(|| Error::state("ALTER TABLE", "no action was given"))?;
        Ok(Statement::AlterTable(AlterTableStatement {
            table: self.table,
            action,
        }))
    }
}
