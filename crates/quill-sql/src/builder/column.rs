//! Column definitions and column constraints.

use crate::ast::{
    ColumnConstraint, ColumnConstraintKind, ColumnDef, ConflictResolution, DefaultValue, Expr,
    ForeignKey, GeneratedKind, Literal, OrderDirection,
};

/// Starts a column definition.
///
/// ```rust
/// use quill_sql::prelude::*;
///
/// let id = column_def("id").type_name("INTEGER").primary_key().not_null();
/// assert_eq!(id.to_sql(), r#""id" INTEGER PRIMARY KEY NOT NULL"#);
/// ```
#[must_use]
pub fn column_def(name: impl Into<String>) -> ColumnDef {
    ColumnDef {
        name: name.into(),
        type_name: None,
        constraints: Vec::new(),
    }
}

/// Starts a `REFERENCES table` clause.
#[must_use]
pub fn references(table: impl Into<String>) -> ForeignKey {
    ForeignKey::new(table)
}

impl ColumnDef {
    /// Sets the free-form type text, rendered verbatim.
    #[must_use]
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Names the next constraint: `CONSTRAINT "name" ...`.
    #[must_use]
    pub fn constraint(self, name: impl Into<String>) -> NamedConstraint {
        NamedConstraint {
            column: self,
            name: name.into(),
        }
    }
}

/// A column waiting for the body of a named constraint.
pub struct NamedConstraint {
    column: ColumnDef,
    name: String,
}

/// Column constraint operations shared by [`ColumnDef`] (anonymous
/// constraints) and [`NamedConstraint`].
pub trait ColumnConstraints: Sized {
    /// Appends a constraint body.
    fn constrain(self, kind: ColumnConstraintKind) -> ColumnDef;

    /// `PRIMARY KEY`.
    fn primary_key(self) -> ColumnDef {
        self.primary_key_with(None, None, false)
    }

    /// `PRIMARY KEY AUTOINCREMENT`.
    fn primary_key_autoincrement(self) -> ColumnDef {
        self.primary_key_with(None, None, true)
    }

    /// `PRIMARY KEY [ASC|DESC] [ON CONFLICT ..] [AUTOINCREMENT]`.
    fn primary_key_with(
        self,
        order: Option<OrderDirection>,
        conflict: Option<ConflictResolution>,
        autoincrement: bool,
    ) -> ColumnDef {
        self.constrain(ColumnConstraintKind::PrimaryKey {
            order,
            conflict,
            autoincrement,
        })
    }

    /// `NOT NULL`.
    fn not_null(self) -> ColumnDef {
        self.constrain(ColumnConstraintKind::NotNull(None))
    }

    /// `NOT NULL ON CONFLICT action`.
    fn not_null_on_conflict(self, action: ConflictResolution) -> ColumnDef {
        self.constrain(ColumnConstraintKind::NotNull(Some(action)))
    }

    /// `NULL`.
    fn null(self) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Null)
    }

    /// `UNIQUE`.
    fn unique(self) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Unique(None))
    }

    /// `UNIQUE ON CONFLICT action`.
    fn unique_on_conflict(self, action: ConflictResolution) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Unique(Some(action)))
    }

    /// `CHECK (expr)`.
    fn check(self, expr: impl Into<Expr>) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Check(expr.into()))
    }

    /// `DEFAULT literal`, including signed numbers and the
    /// `CURRENT_TIME`/`CURRENT_DATE`/`CURRENT_TIMESTAMP` keywords.
    fn default(self, value: impl Into<Literal>) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Default(DefaultValue::Literal(
            value.into(),
        )))
    }

    /// `DEFAULT (expr)`.
    fn default_expr(self, expr: impl Into<Expr>) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Default(DefaultValue::Expr(expr.into())))
    }

    /// `COLLATE name`.
    fn collate(self, collation: impl Into<String>) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Collate(collation.into()))
    }

    /// `REFERENCES ..`.
    fn references(self, foreign_key: ForeignKey) -> ColumnDef {
        self.constrain(ColumnConstraintKind::References(foreign_key))
    }

    /// `GENERATED ALWAYS AS (expr) [STORED|VIRTUAL]`.
    fn generated(self, expr: impl Into<Expr>, kind: Option<GeneratedKind>) -> ColumnDef {
        self.constrain(ColumnConstraintKind::Generated {
            expr: expr.into(),
            kind,
        })
    }
}

impl ColumnConstraints for ColumnDef {
    fn constrain(mut self, kind: ColumnConstraintKind) -> ColumnDef {
        self.constraints.push(ColumnConstraint { name: None, kind });
        self
    }
}

impl ColumnConstraints for NamedConstraint {
    fn constrain(mut self, kind: ColumnConstraintKind) -> ColumnDef {
        self.column.constraints.push(ColumnConstraint {
            name: Some(self.name),
            kind,
        });
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ForeignKeyAction, InitialCheck, Literal};
    use crate::builder::col;
    use crate::render::ToSql;

    #[test]
    fn test_named_vs_anonymous_check() {
        let named = column_def("price")
            .constraint("check constraint")
            .check(col("price").gt(0));
        assert_eq!(
            named.to_sql(),
            r#""price" CONSTRAINT "check constraint" CHECK ("price" > 0)"#
        );
        let anonymous = column_def("price").check(col("price").gt(0));
        assert_eq!(anonymous.to_sql(), r#""price" CHECK ("price" > 0)"#);
    }

    #[test]
    fn test_defaults() {
        let c = column_def("n").type_name("INTEGER").default(-1);
        assert_eq!(c.to_sql(), r#""n" INTEGER DEFAULT -1"#);
        let c = column_def("at").default(Literal::CurrentTimestamp);
        assert_eq!(c.to_sql(), r#""at" DEFAULT CURRENT_TIMESTAMP"#);
        let c = column_def("t").default_expr(crate::builder::random());
        assert_eq!(c.to_sql(), r#""t" DEFAULT (RANDOM())"#);
    }

    #[test]
    fn test_references_with_deferrability() {
        let c = column_def("owner").type_name("INTEGER").references(
            references("users")
                .columns(["id"])
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::SetNull)
                .deferrable(Some(InitialCheck::Deferred)),
        );
        assert_eq!(
            c.to_sql(),
            r#""owner" INTEGER REFERENCES "users" ("id") ON DELETE CASCADE ON UPDATE SET NULL DEFERRABLE INITIALLY DEFERRED"#
        );
    }

    #[test]
    fn test_primary_key_options_and_generated() {
        let c = column_def("id").type_name("INTEGER").primary_key_with(
            Some(OrderDirection::Desc),
            Some(ConflictResolution::Replace),
            true,
        );
        assert_eq!(
            c.to_sql(),
            r#""id" INTEGER PRIMARY KEY DESC ON CONFLICT REPLACE AUTOINCREMENT"#
        );
        let c = column_def("total")
            .generated(col("a").mul(col("b")), Some(GeneratedKind::Stored))
            .collate("BINARY");
        assert_eq!(
            c.to_sql(),
            r#""total" GENERATED ALWAYS AS ("a" * "b") STORED COLLATE "BINARY""#
        );
    }
}
