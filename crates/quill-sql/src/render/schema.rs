use crate::ast::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnConstraintKind, ColumnDef,
    ConflictResolution, CreateIndexStatement, CreateTableBody, CreateTableStatement,
    CreateTriggerStatement, CreateViewStatement, CreateVirtualTableStatement, DefaultValue,
    Deferrable, Expr, ForeignKey, GeneratedKind, IndexedColumn, InitialCheck, Precedence,
    TableConstraint, TableConstraintKind, TriggerEvent,
};

use super::SqlWriter;

impl SqlWriter {
    fn create_prefix(&mut self, temporary: bool, object: &str, if_not_exists: bool) {
        self.push("CREATE ");
        if temporary {
            self.push("TEMP ");
        }
        self.push(object);
        self.push(if if_not_exists { " IF NOT EXISTS " } else { " " });
    }

    pub(crate) fn create_table(&mut self, create: &CreateTableStatement) {
        self.create_prefix(create.temporary, "TABLE", create.if_not_exists);
        self.name(&create.name);
        match &create.body {
            CreateTableBody::Columns {
                columns,
                constraints,
                without_rowid,
                strict,
            } => {
                self.push(" (");
                self.comma_list(columns, Self::column_def);
                for constraint in constraints {
                    self.push(", ");
                    self.table_constraint(constraint);
                }
                self.push(")");
                let options: Vec<&str> = [(*without_rowid, "WITHOUT ROWID"), (*strict, "STRICT")]
                    .into_iter()
                    .filter_map(|(on, option)| on.then_some(option))
                    .collect();
                if !options.is_empty() {
                    self.push(" ");
                    self.push(&options.join(", "));
                }
            }
            CreateTableBody::AsSelect(select) => {
                self.push(" AS ");
                self.select(select);
            }
        }
    }

    /// Appends a column definition.
    pub fn column_def(&mut self, column: &ColumnDef) {
        self.ident(&column.name);
        if let Some(type_name) = &column.type_name {
            self.push(" ");
            self.push(type_name);
        }
        for constraint in &column.constraints {
            self.push(" ");
            self.column_constraint(constraint);
        }
    }

    fn constraint_name(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.push("CONSTRAINT ");
            self.ident(name);
            self.push(" ");
        }
    }

    fn on_conflict(&mut self, conflict: Option<ConflictResolution>) {
        if let Some(conflict) = conflict {
            self.push(" ON CONFLICT ");
            self.push(conflict.as_str());
        }
    }

    fn column_constraint(&mut self, constraint: &ColumnConstraint) {
        self.constraint_name(constraint.name.as_deref());
        match &constraint.kind {
            ColumnConstraintKind::PrimaryKey {
                order,
                conflict,
                autoincrement,
            } => {
                self.push("PRIMARY KEY");
                if let Some(order) = order {
                    self.push(" ");
                    self.push(order.as_str());
                }
                self.on_conflict(*conflict);
                if *autoincrement {
                    self.push(" AUTOINCREMENT");
                }
            }
            ColumnConstraintKind::NotNull(conflict) => {
                self.push("NOT NULL");
                self.on_conflict(*conflict);
            }
            ColumnConstraintKind::Null => self.push("NULL"),
            ColumnConstraintKind::Unique(conflict) => {
                self.push("UNIQUE");
                self.on_conflict(*conflict);
            }
            ColumnConstraintKind::Check(expr) => self.check(expr),
            ColumnConstraintKind::Default(DefaultValue::Literal(lit)) => {
                self.push("DEFAULT ");
                self.push(&lit.to_sql());
            }
            ColumnConstraintKind::Default(DefaultValue::Expr(expr)) => {
                self.push("DEFAULT (");
                self.expr(expr, Precedence::Lowest);
                self.push(")");
            }
            ColumnConstraintKind::Collate(collation) => {
                self.push("COLLATE ");
                self.ident(collation);
            }
            ColumnConstraintKind::References(fk) => self.references(fk),
            ColumnConstraintKind::Generated { expr, kind } => {
                self.push("GENERATED ALWAYS AS (");
                self.expr(expr, Precedence::Lowest);
                self.push(")");
                match kind {
                    Some(GeneratedKind::Stored) => self.push(" STORED"),
                    Some(GeneratedKind::Virtual) => self.push(" VIRTUAL"),
                    None => {}
                }
            }
        }
    }

    fn check(&mut self, expr: &Expr) {
        self.push("CHECK (");
        self.expr(expr, Precedence::Lowest);
        self.push(")");
    }

    fn references(&mut self, fk: &ForeignKey) {
        self.push("REFERENCES ");
        self.ident(&fk.table);
        if !fk.columns.is_empty() {
            self.push(" ");
            self.ident_list(&fk.columns);
        }
        if let Some(action) = fk.on_delete {
            self.push(" ON DELETE ");
            self.push(action.as_str());
        }
        if let Some(action) = fk.on_update {
            self.push(" ON UPDATE ");
            self.push(action.as_str());
        }
        match fk.deferrable {
            Some(Deferrable::NotDeferrable) => self.push(" NOT DEFERRABLE"),
            Some(Deferrable::Deferrable(initially)) => {
                self.push(" DEFERRABLE");
                match initially {
                    Some(InitialCheck::Deferred) => self.push(" INITIALLY DEFERRED"),
                    Some(InitialCheck::Immediate) => self.push(" INITIALLY IMMEDIATE"),
                    None => {}
                }
            }
            None => {}
        }
    }

    fn table_constraint(&mut self, constraint: &TableConstraint) {
        self.constraint_name(constraint.name.as_deref());
        match &constraint.kind {
            TableConstraintKind::PrimaryKey { columns, conflict } => {
                self.push("PRIMARY KEY (");
                self.comma_list(columns, Self::indexed_column);
                self.push(")");
                self.on_conflict(*conflict);
            }
            TableConstraintKind::Unique { columns, conflict } => {
                self.push("UNIQUE (");
                self.comma_list(columns, Self::indexed_column);
                self.push(")");
                self.on_conflict(*conflict);
            }
            TableConstraintKind::Check(expr) => self.check(expr),
            TableConstraintKind::ForeignKey {
                columns,
                references,
            } => {
                self.push("FOREIGN KEY ");
                self.ident_list(columns);
                self.push(" ");
                self.references(references);
            }
        }
    }

    pub(crate) fn indexed_column(&mut self, column: &IndexedColumn) {
        if let Some(collation) = &column.collation {
            self.expr(&column.expr, Precedence::Collate);
            self.push(" COLLATE ");
            self.ident(collation);
        } else {
            self.expr(&column.expr, Precedence::Lowest);
        }
        if let Some(order) = column.order {
            self.push(" ");
            self.push(order.as_str());
        }
    }

    pub(crate) fn create_index(&mut self, create: &CreateIndexStatement) {
        self.push("CREATE ");
        if create.unique {
            self.push("UNIQUE ");
        }
        self.push(if create.if_not_exists {
            "INDEX IF NOT EXISTS "
        } else {
            "INDEX "
        });
        self.name(&create.name);
        self.push(" ON ");
        self.ident(&create.table);
        self.push(" (");
        self.comma_list(&create.columns, Self::indexed_column);
        self.push(")");
        if let Some(filter) = &create.where_clause {
            self.push(" WHERE ");
            self.expr(filter, Precedence::Lowest);
        }
    }

    pub(crate) fn create_view(&mut self, create: &CreateViewStatement) {
        self.create_prefix(create.temporary, "VIEW", create.if_not_exists);
        self.name(&create.name);
        if !create.columns.is_empty() {
            self.push(" ");
            self.ident_list(&create.columns);
        }
        self.push(" AS ");
        self.select(&create.select);
    }

    pub(crate) fn create_trigger(&mut self, create: &CreateTriggerStatement) {
        self.create_prefix(create.temporary, "TRIGGER", create.if_not_exists);
        self.name(&create.name);
        if let Some(timing) = create.timing {
            self.push(" ");
            self.push(timing.as_str());
        }
        match &create.event {
            TriggerEvent::Delete => self.push(" DELETE"),
            TriggerEvent::Insert => self.push(" INSERT"),
            TriggerEvent::Update => self.push(" UPDATE"),
            TriggerEvent::UpdateOf(columns) if columns.is_empty() => self.push(" UPDATE"),
            TriggerEvent::UpdateOf(columns) => {
                self.push(" UPDATE OF ");
                self.comma_list(columns, |w, column| w.ident(column));
            }
        }
        self.push(" ON ");
        self.ident(&create.table);
        if create.for_each_row {
            self.push(" FOR EACH ROW");
        }
        if let Some(when) = &create.when {
            self.push(" WHEN ");
            self.expr(when, Precedence::Lowest);
        }
        self.push(" BEGIN ");
        for step in &create.steps {
            self.statement(step);
            self.push("; ");
        }
        self.push("END");
    }

    pub(crate) fn create_virtual_table(&mut self, create: &CreateVirtualTableStatement) {
        self.create_prefix(false, "VIRTUAL TABLE", create.if_not_exists);
        self.name(&create.name);
        self.push(" USING ");
        self.ident(&create.module);
        if !create.args.is_empty() {
            self.push("(");
            self.push(&create.args.join(", "));
            self.push(")");
        }
    }

    pub(crate) fn alter_table(&mut self, alter: &AlterTableStatement) {
        self.push("ALTER TABLE ");
        self.name(&alter.table);
        match &alter.action {
            AlterTableAction::RenameTo(name) => {
                self.push(" RENAME TO ");
                self.ident(name);
            }
            AlterTableAction::RenameColumn { from, to } => {
                self.push(" RENAME COLUMN ");
                self.ident(from);
                self.push(" TO ");
                self.ident(to);
            }
            AlterTableAction::AddColumn(column) => {
                self.push(" ADD COLUMN ");
                self.column_def(column);
            }
            AlterTableAction::DropColumn(name) => {
                self.push(" DROP COLUMN ");
                self.ident(name);
            }
        }
    }
}
