//! Typestate statement builders.
//!
//! Each builder only exposes the operations its grammar allows in the
//! current construction state: calling them out of order does not compile.
//! Rules that depend on data (empty lists, row widths, a source chosen at
//! runtime) are checked at the offending call and reported as
//! [`Error::ConstructionState`].
//!
//! # Example
//!
//! ```rust
//! use quill_sql::prelude::*;
//!
//! let statement = select([col("id"), col("name")])
//!     .from("users")
//!     .where_(col("active").eq(true))
//!     .order_by([col("name")])
//!     .limit(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     statement.render(),
//!     r#"SELECT "id", "name" FROM "users" WHERE "active" = TRUE ORDER BY "name" LIMIT 10"#
//! );
//! ```

mod alter;
mod column;
mod create_table;
mod delete;
mod drop;
mod expr;
mod functions;
mod index;
mod insert;
mod select;
mod table_ref;
mod trigger;
mod update;
mod utility;
mod view;
mod virtual_table;
mod with;

pub use alter::{alter_table, AlterAction, AlterTable, Pending};
pub use column::{column_def, references, ColumnConstraints, NamedConstraint};
pub use create_table::{create_table, CreateTable, CreateTableAs};
pub use delete::{delete_from, Delete, Filtering};
pub use drop::{drop_index, drop_table, drop_trigger, drop_view, DropObject};
pub use expr::{
    case, case_on, col, current_date, current_time, current_timestamp, excluded, exists, lit,
    new_row, not_exists, null, old_row, raise_abort, raise_fail, raise_ignore, raise_rollback,
    row, scalar, star, table_col, CaseBuilder, HasWhen, NoWhen,
};
pub use functions::*;
pub use index::{create_index, CreateIndex};
pub use insert::{
    insert_into, insert_or, replace_into, ConflictClause, DefaultValues, DoUpdate, FromSelect,
    HasColumns, Insert, NoSource, Rows,
};
pub use select::{
    select, select_all, select_distinct, values, Compound, Core, Limited, Offset, Ordered, Plain,
    Prefixed, Select, Values,
};
pub use table_ref::{subquery, table, table_function, JoinBuilder, Joinable};
pub use trigger::{create_trigger, CreateTrigger, HasSteps, Targeted, Timed, Unbound};
pub use update::{assign, assign_row, update, update_or, HasSet, NoSet, Update};
pub use utility::{
    analyze, analyze_all, attach, begin, begin_with, commit, detach, explain, explain_query_plan,
    reindex, reindex_all, release, rollback, rollback_to, savepoint, vacuum, Vacuum,
};
pub use view::{create_view, CreateView, HasBody, NoBody};
pub use virtual_table::{create_virtual_table, CreateVirtualTable};
pub use with::{cte, with, with_recursive, CteBuilder, With};

use crate::ast::{
    CreateTableBody, Expr, InsertSource, SelectBody, SelectStatement, Statement,
};
use crate::error::{Error, Result};

/// Finalizes a builder into an immutable [`Statement`].
pub trait Build: Sized {
    /// Assembles the statement without the whole-statement checks of
    /// [`Build::build`].
    #[doc(hidden)]
    fn finish(self) -> Result<Statement>;

    /// Builds the statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if the statement cannot be
    /// finalized in its current state, or if it uses `RAISE` outside of a
    /// trigger body.
    fn build(self) -> Result<Statement> {
        let statement = self.finish()?;
        if statement.contains_raise() {
            return Err(Error::state(
                statement.kind(),
                "RAISE is only valid inside a trigger body",
            ));
        }
        tracing::trace!(kind = statement.kind(), "statement built");
        Ok(statement)
    }
}

/// A statement assembled directly from the AST gets the data checks the
/// builders apply at the offending call.
impl Build for Statement {
    fn finish(self) -> Result<Statement> {
        check_shape(&self)?;
        Ok(self)
    }
}

fn check_shape(statement: &Statement) -> Result<()> {
    let kind = statement.kind();
    let reject = |message: &str| -> Result<()> { Err(Error::state(kind, message)) };
    match statement {
        Statement::Select(select) => check_select(kind, select),
        Statement::Insert(insert) => match &insert.source {
            InsertSource::Values(rows) => check_rows(kind, rows),
            InsertSource::Select(select) => check_select(kind, select),
            InsertSource::DefaultValues => Ok(()),
        },
        Statement::Update(update) if update.assignments.is_empty() => {
            reject("SET must not be empty")
        }
        Statement::CreateTable(create) => match &create.body {
            CreateTableBody::Columns { columns, .. } if columns.is_empty() => {
                reject("a table needs at least one column or an AS SELECT source")
            }
            CreateTableBody::Columns { .. } => Ok(()),
            CreateTableBody::AsSelect(select) => check_select(kind, select),
        },
        Statement::CreateIndex(index) if index.columns.is_empty() => {
            reject("an index needs at least one column")
        }
        Statement::CreateView(view) => check_select(kind, &view.select),
        Statement::CreateTrigger(trigger) if trigger.steps.is_empty() => {
            reject("a trigger needs at least one step")
        }
        Statement::CreateTrigger(trigger) => trigger.steps.iter().try_for_each(check_shape),
        Statement::Explain { statement, .. } if matches!(**statement, Statement::Explain { .. }) => {
            reject("EXPLAIN cannot be nested")
        }
        Statement::Explain { statement, .. } => check_shape(statement),
        _ => Ok(()),
    }
}

fn check_select(kind: &'static str, select: &SelectStatement) -> Result<()> {
    if select.offset.is_some() && select.limit.is_none() {
        return Err(Error::state(kind, "OFFSET requires LIMIT"));
    }
    core::iter::once(&select.body)
        .chain(select.compounds.iter().map(|(_, body)| body))
        .try_for_each(|body| match body {
            SelectBody::Values(rows) => check_rows(kind, rows),
            SelectBody::Select(_) => Ok(()),
        })
}

fn check_rows(kind: &'static str, rows: &[Vec<Expr>]) -> Result<()> {
    let Some(first) = rows.first() else {
        return Err(Error::state(kind, "VALUES must not be empty"));
    };
    if first.is_empty() {
        return Err(Error::state(kind, "a VALUES row must not be empty"));
    }
    if rows.iter().any(|row| row.len() != first.len()) {
        return Err(Error::state(kind, "all VALUES rows must have the same width"));
    }
    Ok(())
}

/// Adds `condition` to an optional filter, combining with AND.
pub(crate) fn and_where(filter: &mut Option<Expr>, condition: Expr) {
    *filter = Some(match filter.take() {
        Some(existing) => existing.and(condition),
        None => condition,
    });
}

/// Collects items into a vector, rejecting an empty result.
pub(crate) fn non_empty<I, T, U>(builder: &'static str, what: &str, items: I) -> Result<Vec<U>>
where
    I: IntoIterator<Item = T>,
    T: Into<U>,
{
    let items: Vec<U> = items.into_iter().map(Into::into).collect();
    if items.is_empty() {
        return Err(Error::state(builder, format!("{what} must not be empty")));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, QualifiedName,
        TriggerEvent,
    };

    fn assert_state_error(statement: Statement) {
        assert!(statement.build().unwrap_err().is_construction_state());
    }

    #[test]
    fn test_raw_create_table_without_columns_rejected() {
        assert_state_error(Statement::CreateTable(CreateTableStatement {
            temporary: false,
            if_not_exists: false,
            name: QualifiedName::new("x"),
            body: CreateTableBody::Columns {
                columns: Vec::new(),
                constraints: Vec::new(),
                without_rowid: false,
                strict: false,
            },
        }));
    }

    #[test]
    fn test_raw_index_and_trigger_need_content() {
        assert_state_error(Statement::CreateIndex(CreateIndexStatement {
            unique: false,
            if_not_exists: false,
            name: QualifiedName::new("idx"),
            table: String::from("t"),
            columns: Vec::new(),
            where_clause: None,
        }));
        assert_state_error(Statement::CreateTrigger(CreateTriggerStatement {
            temporary: false,
            if_not_exists: false,
            name: QualifiedName::new("trg"),
            timing: None,
            event: TriggerEvent::Delete,
            table: String::from("t"),
            for_each_row: false,
            when: None,
            steps: Vec::new(),
        }));
    }

    #[test]
    fn test_raw_values_rows_checked() {
        let Statement::Select(mut select) = values([[lit(1), lit(2)]]).unwrap().build().unwrap()
        else {
            panic!("expected a select");
        };
        if let SelectBody::Values(rows) = &mut select.body {
            rows.push(vec![lit(3)]);
        }
        assert_state_error(Statement::Select(select));
    }

    #[test]
    fn test_raw_statement_passes_through() {
        let statement = select([col("a")]).from("t").build().unwrap();
        assert_eq!(statement.clone().build().unwrap(), statement);
        assert_eq!(commit().build().unwrap(), Statement::Commit);
    }
}
