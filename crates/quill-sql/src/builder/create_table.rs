//! CREATE TABLE builder and table constraints.

use super::Build;
use crate::ast::{
    ColumnDef, ConflictResolution, CreateTableBody, CreateTableStatement, Expr, ForeignKey,
    IndexedColumn, QualifiedName, SelectStatement, Statement, TableConstraint, TableConstraintKind,
};
use crate::error::{Error, Result};

impl TableConstraint {
    const fn anonymous(kind: TableConstraintKind) -> Self {
        Self { name: None, kind }
    }

    /// `PRIMARY KEY (columns)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn primary_key<I, C>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<IndexedColumn>,
    {
        Ok(Self::anonymous(TableConstraintKind::PrimaryKey {
            columns: super::non_empty("PRIMARY KEY", "column list", columns)?,
            conflict: None,
        }))
    }

    /// `UNIQUE (columns)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn unique<I, C>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<IndexedColumn>,
    {
        Ok(Self::anonymous(TableConstraintKind::Unique {
            columns: super::non_empty("UNIQUE", "column list", columns)?,
            conflict: None,
        }))
    }

    /// `CHECK (expr)`.
    #[must_use]
    pub fn check(expr: impl Into<Expr>) -> Self {
        Self::anonymous(TableConstraintKind::Check(expr.into()))
    }

    /// `FOREIGN KEY (columns) REFERENCES ..`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty, or if the
    /// reference names a different number of parent columns.
    pub fn foreign_key<I, C>(columns: I, references: ForeignKey) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let columns: Vec<String> = super::non_empty("FOREIGN KEY", "column list", columns)?;
        if !references.columns.is_empty() && references.columns.len() != columns.len() {
            return Err(Error::state(
                "FOREIGN KEY",
                format!(
                    "{} child columns but {} parent columns",
                    columns.len(),
                    references.columns.len()
                ),
            ));
        }
        Ok(Self::anonymous(TableConstraintKind::ForeignKey {
            columns,
            references,
        }))
    }

    /// Names the constraint: `CONSTRAINT "name" ...`.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds `ON CONFLICT action` to a PRIMARY KEY or UNIQUE constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] for CHECK and FOREIGN KEY
    /// constraints, which take no conflict clause.
    pub fn on_conflict(mut self, action: ConflictResolution) -> Result<Self> {
        match &mut self.kind {
            TableConstraintKind::PrimaryKey { conflict, .. }
            | TableConstraintKind::Unique { conflict, .. } => {
                *conflict = Some(action);
                Ok(self)
            }
            TableConstraintKind::Check(_) | TableConstraintKind::ForeignKey { .. } => Err(
                Error::state("ON CONFLICT", "only PRIMARY KEY and UNIQUE take a conflict clause"),
            ),
        }
    }
}

/// A CREATE TABLE builder for column definitions.
///
/// Use [`CreateTable::as_select`] instead of columns to create the table
/// from a query.
#[derive(Debug, Clone)]
pub struct CreateTable {
    temporary: bool,
    if_not_exists: bool,
    name: QualifiedName,
    columns: Vec<ColumnDef>,
    constraints: Vec<TableConstraint>,
    without_rowid: bool,
    strict: bool,
}

/// Starts `CREATE TABLE name`.
#[must_use]
pub fn create_table(name: impl Into<QualifiedName>) -> CreateTable {
    CreateTable {
        temporary: false,
        if_not_exists: false,
        name: name.into(),
        columns: Vec::new(),
        constraints: Vec::new(),
        without_rowid: false,
        strict: false,
    }
}

impl CreateTable {
    /// `CREATE TEMP TABLE`.
    #[must_use]
    pub const fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Appends a column definition.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a table constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds `WITHOUT ROWID`.
    #[must_use]
    pub const fn without_rowid(mut self) -> Self {
        self.without_rowid = true;
        self
    }

    /// Adds `STRICT`.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Switches to `CREATE TABLE .. AS select`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if columns, constraints or
    /// table options were already given.
    pub fn as_select(self, select: impl Into<SelectStatement>) -> Result<CreateTableAs> {
        if !self.columns.is_empty() || !self.constraints.is_empty() {
            return Err(Error::state(
                "CREATE TABLE",
                "AS SELECT cannot be combined with column definitions",
            ));
        }
        if self.without_rowid || self.strict {
            return Err(Error::state(
                "CREATE TABLE",
                "AS SELECT cannot be combined with table options",
            ));
        }
        Ok(CreateTableAs {
            temporary: self.temporary,
            if_not_exists: self.if_not_exists,
            name: self.name,
            select: select.into(),
        })
    }

    fn has_primary_key(&self) -> bool {
        self.columns.iter().any(ColumnDef::is_primary_key)
            || self
                .constraints
                .iter()
                .any(|c| matches!(c.kind, TableConstraintKind::PrimaryKey { .. }))
    }
}

fn check_temp_schema(temporary: bool, name: &QualifiedName) -> Result<()> {
    match &name.schema {
        Some(schema) if temporary && !schema.eq_ignore_ascii_case("temp") => Err(Error::state(
            "CREATE TABLE",
            format!("a temporary table cannot be created in schema `{schema}`"),
        )),
        _ => Ok(()),
    }
}

impl Build for CreateTable {
    fn finish(self) -> Result<Statement> {
        if self.columns.is_empty() {
            return Err(Error::state(
                "CREATE TABLE",
                "a table needs at least one column or an AS SELECT source",
            ));
        }
        if self.without_rowid && !self.has_primary_key() {
            return Err(Error::state(
                "CREATE TABLE",
                "WITHOUT ROWID requires a PRIMARY KEY",
            ));
        }
        check_temp_schema(self.temporary, &self.name)?;
        Ok(Statement::CreateTable(CreateTableStatement {
            temporary: self.temporary,
            if_not_exists: self.if_not_exists,
            name: self.name,
            body: CreateTableBody::Columns {
                columns: self.columns,
                constraints: self.constraints,
                without_rowid: self.without_rowid,
                strict: self.strict,
            },
        }))
    }
}

/// A `CREATE TABLE .. AS select` builder.
#[derive(Debug, Clone)]
pub struct CreateTableAs {
    temporary: bool,
    if_not_exists: bool,
    name: QualifiedName,
    select: SelectStatement,
}

impl Build for CreateTableAs {
    fn finish(self) -> Result<Statement> {
        check_temp_schema(self.temporary, &self.name)?;
        Ok(Statement::CreateTable(CreateTableStatement {
            temporary: self.temporary,
            if_not_exists: self.if_not_exists,
            name: self.name,
            body: CreateTableBody::AsSelect(Box::new(self.select)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, column_def, references, select, ColumnConstraints};

    fn render(create: impl Build) -> String {
        create.build().unwrap().render()
    }

    #[test]
    fn test_create_table_full() {
        let sql = render(
            create_table("orders")
                .if_not_exists()
                .column(column_def("id").type_name("INTEGER").primary_key())
                .column(column_def("customer").type_name("INTEGER").not_null())
                .column(column_def("qty").type_name("INTEGER").default(1))
                .constraint(
                    TableConstraint::foreign_key(["customer"], references("customers"))
                        .unwrap()
                        .named("fk_customer"),
                )
                .constraint(TableConstraint::check(col("qty").gt(0)))
                .strict(),
        );
        assert_eq!(
            sql,
            r#"CREATE TABLE IF NOT EXISTS "orders" ("id" INTEGER PRIMARY KEY, "customer" INTEGER NOT NULL, "qty" INTEGER DEFAULT 1, CONSTRAINT "fk_customer" FOREIGN KEY ("customer") REFERENCES "customers", CHECK ("qty" > 0)) STRICT"#
        );
    }

    #[test]
    fn test_without_rowid() {
        let sql = render(
            create_table("kv")
                .column(column_def("k").type_name("TEXT"))
                .column(column_def("v"))
                .constraint(
                    TableConstraint::primary_key(["k"])
                        .unwrap()
                        .on_conflict(ConflictResolution::Replace)
                        .unwrap(),
                )
                .without_rowid()
                .strict(),
        );
        assert_eq!(
            sql,
            r#"CREATE TABLE "kv" ("k" TEXT, "v", PRIMARY KEY ("k") ON CONFLICT REPLACE) WITHOUT ROWID, STRICT"#
        );
        let err = create_table("t").column(column_def("a")).without_rowid().build();
        assert!(err.unwrap_err().is_construction_state());
    }

    #[test]
    fn test_needs_columns_or_select() {
        let err = create_table("empty").build().unwrap_err();
        assert!(err.is_construction_state());
    }

    #[test]
    fn test_as_select_is_exclusive() {
        let sql = render(
            create_table(("temp", "copy"))
                .temporary()
                .as_select(select([col("a")]).from("src"))
                .unwrap(),
        );
        assert_eq!(sql, r#"CREATE TEMP TABLE "temp"."copy" AS SELECT "a" FROM "src""#);
        let err = create_table("t")
            .column(column_def("a"))
            .as_select(select([col("a")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_temp_schema_mismatch() {
        let err = create_table(("main", "t"))
            .temporary()
            .column(column_def("a"))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_check_rejects_conflict_clause() {
        assert!(TableConstraint::check(col("a").gt(0))
            .on_conflict(ConflictResolution::Abort)
            .is_err());
        assert!(TableConstraint::unique(Vec::<String>::new()).is_err());
    }
}
