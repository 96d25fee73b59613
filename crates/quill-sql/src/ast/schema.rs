//! DDL AST types: tables, columns, constraints, indexes, views, triggers.

use super::expression::Expr;
use super::ident::QualifiedName;
use super::literal::Literal;
use super::select::{OrderDirection, SelectStatement};
use super::statement::{ConflictResolution, Statement};

/// A column of an index, a table PRIMARY KEY/UNIQUE list or an upsert target.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedColumn {
    /// Column name or expression.
    pub expr: Expr,
    /// Optional collation.
    pub collation: Option<String>,
    /// Optional sort order.
    pub order: Option<OrderDirection>,
}

impl IndexedColumn {
    /// Sets the collation.
    #[must_use]
    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sorts ascending.
    #[must_use]
    pub fn asc(mut self) -> Self {
        self.order = Some(OrderDirection::Asc);
        self
    }

    /// Sorts descending.
    #[must_use]
    pub fn desc(mut self) -> Self {
        self.order = Some(OrderDirection::Desc);
        self
    }
}

impl From<Expr> for IndexedColumn {
    fn from(expr: Expr) -> Self {
        Self {
            expr,
            collation: None,
            order: None,
        }
    }
}

/// A bare string names a column.
impl From<&str> for IndexedColumn {
    fn from(column: &str) -> Self {
        Self::from(crate::builder::col(column))
    }
}

impl From<String> for IndexedColumn {
    fn from(column: String) -> Self {
        Self::from(crate::builder::col(column))
    }
}

/// A foreign key `ON DELETE` / `ON UPDATE` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKeyAction {
    /// `SET NULL`.
    SetNull,
    /// `SET DEFAULT`.
    SetDefault,
    /// `CASCADE`.
    Cascade,
    /// `RESTRICT`.
    Restrict,
    /// `NO ACTION`.
    NoAction,
}

impl ForeignKeyAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// When a deferrable foreign key is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitialCheck {
    /// `INITIALLY DEFERRED`.
    Deferred,
    /// `INITIALLY IMMEDIATE`.
    Immediate,
}

/// Foreign key deferrability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferrable {
    /// `NOT DEFERRABLE`.
    NotDeferrable,
    /// `DEFERRABLE [INITIALLY ...]`.
    Deferrable(Option<InitialCheck>),
}

/// A `REFERENCES` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table.
    pub table: String,
    /// Referenced columns; empty means the parent's primary key.
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<ForeignKeyAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ForeignKeyAction>,
    /// Deferrability.
    pub deferrable: Option<Deferrable>,
}

impl ForeignKey {
    /// Creates a reference to a table's primary key.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            on_delete: None,
            on_update: None,
            deferrable: None,
        }
    }

    /// Sets the referenced columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the `ON DELETE` action.
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `ON UPDATE` action.
    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Marks the reference `NOT DEFERRABLE`.
    #[must_use]
    pub const fn not_deferrable(mut self) -> Self {
        self.deferrable = Some(Deferrable::NotDeferrable);
        self
    }

    /// Marks the reference `DEFERRABLE`, optionally with an initial check mode.
    #[must_use]
    pub const fn deferrable(mut self, initially: Option<InitialCheck>) -> Self {
        self.deferrable = Some(Deferrable::Deferrable(initially));
        self
    }
}

/// Storage of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratedKind {
    /// `STORED`.
    Stored,
    /// `VIRTUAL`.
    Virtual,
}

/// A column `DEFAULT` value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal, signed number or time keyword.
    Literal(Literal),
    /// A parenthesized expression.
    Expr(Expr),
}

/// The body of a column constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraintKind {
    /// `PRIMARY KEY [ASC|DESC] [ON CONFLICT ..] [AUTOINCREMENT]`.
    PrimaryKey {
        /// Sort order.
        order: Option<OrderDirection>,
        /// Conflict clause.
        conflict: Option<ConflictResolution>,
        /// Whether AUTOINCREMENT was specified.
        autoincrement: bool,
    },
    /// `NOT NULL [ON CONFLICT ..]`.
    NotNull(Option<ConflictResolution>),
    /// `NULL`.
    Null,
    /// `UNIQUE [ON CONFLICT ..]`.
    Unique(Option<ConflictResolution>),
    /// `CHECK (expr)`.
    Check(Expr),
    /// `DEFAULT ..`.
    Default(DefaultValue),
    /// `COLLATE name`.
    Collate(String),
    /// `REFERENCES ..`.
    References(ForeignKey),
    /// `GENERATED ALWAYS AS (expr) [STORED|VIRTUAL]`.
    Generated {
        /// The generating expression.
        expr: Expr,
        /// Storage.
        kind: Option<GeneratedKind>,
    },
}

/// A possibly named column constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    /// `CONSTRAINT` name.
    pub name: Option<String>,
    /// The constraint body.
    pub kind: ColumnConstraintKind,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Free-form type text, rendered verbatim.
    pub type_name: Option<String>,
    /// Constraints in declaration order.
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    /// Returns whether any constraint is a PRIMARY KEY.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::PrimaryKey { .. }))
    }

    /// Returns whether any constraint is UNIQUE.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::Unique(_)))
    }
}

/// The body of a table constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    /// `PRIMARY KEY (cols) [ON CONFLICT ..]`.
    PrimaryKey {
        /// Key columns, never empty.
        columns: Vec<IndexedColumn>,
        /// Conflict clause.
        conflict: Option<ConflictResolution>,
    },
    /// `UNIQUE (cols) [ON CONFLICT ..]`.
    Unique {
        /// Key columns, never empty.
        columns: Vec<IndexedColumn>,
        /// Conflict clause.
        conflict: Option<ConflictResolution>,
    },
    /// `CHECK (expr)`.
    Check(Expr),
    /// `FOREIGN KEY (cols) REFERENCES ..`.
    ForeignKey {
        /// Child columns, never empty.
        columns: Vec<String>,
        /// The referenced table.
        references: ForeignKey,
    },
}

/// A possibly named table constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    /// `CONSTRAINT` name.
    pub name: Option<String>,
    /// The constraint body.
    pub kind: TableConstraintKind,
}

/// The body of a CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateTableBody {
    /// Column and constraint definitions.
    Columns {
        /// Columns, never empty.
        columns: Vec<ColumnDef>,
        /// Table constraints.
        constraints: Vec<TableConstraint>,
        /// `WITHOUT ROWID`.
        without_rowid: bool,
        /// `STRICT`.
        strict: bool,
    },
    /// `AS select`.
    AsSelect(Box<SelectStatement>),
}

/// `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// `TEMP`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Table name.
    pub name: QualifiedName,
    /// Definition.
    pub body: CreateTableBody,
}

/// `CREATE INDEX`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    /// `UNIQUE`.
    pub unique: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Index name.
    pub name: QualifiedName,
    /// Indexed table, always in the index's schema.
    pub table: String,
    /// Indexed columns, never empty.
    pub columns: Vec<IndexedColumn>,
    /// Partial index predicate.
    pub where_clause: Option<Expr>,
}

/// `CREATE VIEW`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    /// `TEMP`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// View name.
    pub name: QualifiedName,
    /// Optional column names.
    pub columns: Vec<String>,
    /// The view body.
    pub select: SelectStatement,
}

/// When a trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerTiming {
    /// `BEFORE`.
    Before,
    /// `AFTER`.
    After,
    /// `INSTEAD OF`.
    InsteadOf,
}

impl TriggerTiming {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        }
    }
}

/// The event a trigger fires on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// `DELETE`.
    Delete,
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `UPDATE OF cols`; an empty list renders as plain `UPDATE`.
    UpdateOf(Vec<String>),
}

/// `CREATE TRIGGER`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTriggerStatement {
    /// `TEMP`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Trigger name.
    pub name: QualifiedName,
    /// Timing; SQLite defaults to BEFORE.
    pub timing: Option<TriggerTiming>,
    /// Event.
    pub event: TriggerEvent,
    /// Target table.
    pub table: String,
    /// `FOR EACH ROW`.
    pub for_each_row: bool,
    /// `WHEN` predicate.
    pub when: Option<Expr>,
    /// Body statements, never empty.
    pub steps: Vec<Statement>,
}

/// `CREATE VIRTUAL TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVirtualTableStatement {
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Table name.
    pub name: QualifiedName,
    /// Module name.
    pub module: String,
    /// Raw module arguments, rendered verbatim.
    pub args: Vec<String>,
}

/// The single action of an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    /// `RENAME TO name`.
    RenameTo(String),
    /// `RENAME COLUMN old TO new`.
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// `ADD COLUMN def`.
    AddColumn(ColumnDef),
    /// `DROP COLUMN name`.
    DropColumn(String),
}

/// `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    /// Table name.
    pub table: QualifiedName,
    /// Action.
    pub action: AlterTableAction,
}

/// Kinds of schema objects that can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// `TABLE`.
    Table,
    /// `INDEX`.
    Index,
    /// `TRIGGER`.
    Trigger,
    /// `VIEW`.
    View,
}

impl ObjectKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::Trigger => "TRIGGER",
            Self::View => "VIEW",
        }
    }
}

/// `DROP {TABLE|INDEX|TRIGGER|VIEW}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    /// Object kind.
    pub kind: ObjectKind,
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// Object name.
    pub name: QualifiedName,
}
