//! Read-only traversal of expression trees.

use super::expression::{Expr, FunctionArgs};
use super::schema::{
    AlterTableAction, ColumnConstraintKind, ColumnDef, CreateTableBody, DefaultValue, IndexedColumn,
    TableConstraintKind,
};
use super::select::{ResultColumn, SelectBody, SelectStatement, WithClause};
use super::statement::{Assignment, InsertSource, Statement, UpsertAction};
use super::table::{JoinConstraint, TableExpr};

type Pred<'a> = dyn FnMut(&Expr) -> bool + 'a;

impl Expr {
    /// Returns whether `pred` holds for this expression or any expression
    /// nested in it, subqueries included.
    pub fn any(&self, pred: &mut Pred<'_>) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            Self::Literal(_) | Self::Column(_) | Self::Raise(_) => false,
            Self::Unary { operand, .. } | Self::Postfix { operand, .. } => operand.any(pred),
            Self::Binary { left, right, .. } => left.any(pred) || right.any(pred),
            Self::Collate { expr, .. } | Self::Cast { expr, .. } => expr.any(pred),
            Self::Like {
                expr,
                pattern,
                escape,
                ..
            } => {
                expr.any(pred)
                    || pattern.any(pred)
                    || escape.as_ref().is_some_and(|e| e.any(pred))
            }
            Self::Between {
                expr, low, high, ..
            } => expr.any(pred) || low.any(pred) || high.any(pred),
            Self::InList { expr, list, .. } => expr.any(pred) || any_of(list, pred),
            Self::InSelect { expr, select, .. } => expr.any(pred) || select.any_expr(pred),
            Self::Exists { select, .. } | Self::Subquery(select) => select.any_expr(pred),
            Self::Function(call) => match &call.args {
                FunctionArgs::Star => false,
                FunctionArgs::List(args) => any_of(args, pred),
            },
            Self::Case {
                operand,
                when_then,
                else_result,
            } => {
                operand.as_ref().is_some_and(|e| e.any(pred))
                    || when_then
                        .iter()
                        .any(|(when, then)| when.any(pred) || then.any(pred))
                    || else_result.as_ref().is_some_and(|e| e.any(pred))
            }
            Self::Row(items) => any_of(items, pred),
        }
    }
}

fn any_of(exprs: &[Expr], pred: &mut Pred<'_>) -> bool {
    exprs.iter().any(|e| e.any(pred))
}

fn any_opt(expr: Option<&Expr>, pred: &mut Pred<'_>) -> bool {
    expr.is_some_and(|e| e.any(pred))
}

fn any_result(columns: &[ResultColumn], pred: &mut Pred<'_>) -> bool {
    columns.iter().any(|c| match c {
        ResultColumn::Expr { expr, .. } => expr.any(pred),
        ResultColumn::Star | ResultColumn::TableStar(_) => false,
    })
}

fn any_with(with: Option<&WithClause>, pred: &mut Pred<'_>) -> bool {
    with.is_some_and(|w| w.ctes.iter().any(|cte| cte.select.any_expr(pred)))
}

fn any_assignment(assignments: &[Assignment], pred: &mut Pred<'_>) -> bool {
    assignments.iter().any(|a| a.value.any(pred))
}

fn any_indexed(columns: &[IndexedColumn], pred: &mut Pred<'_>) -> bool {
    columns.iter().any(|c| c.expr.any(pred))
}

fn any_column_def(def: &ColumnDef, pred: &mut Pred<'_>) -> bool {
    def.constraints.iter().any(|c| match &c.kind {
        ColumnConstraintKind::Check(expr)
        | ColumnConstraintKind::Default(DefaultValue::Expr(expr))
        | ColumnConstraintKind::Generated { expr, .. } => expr.any(pred),
        _ => false,
    })
}

impl SelectStatement {
    /// Returns whether `pred` holds for any expression of the statement.
    pub fn any_expr(&self, pred: &mut Pred<'_>) -> bool {
        any_with(self.with.as_ref(), pred)
            || self.bodies().any(|body| match body {
                SelectBody::Select(core) => {
                    any_result(&core.columns, pred)
                        || core.from.as_ref().is_some_and(|from| from.any_expr(pred))
                        || any_opt(core.where_clause.as_ref(), pred)
                        || any_of(&core.group_by, pred)
                        || any_opt(core.having.as_ref(), pred)
                }
                SelectBody::Values(rows) => rows.iter().any(|row| any_of(row, pred)),
            })
            || self.order_by.iter().any(|term| term.expr.any(pred))
            || any_opt(self.limit.as_ref(), pred)
            || any_opt(self.offset.as_ref(), pred)
    }
}

impl TableExpr {
    /// Returns whether `pred` holds for any expression of the FROM tree.
    pub fn any_expr(&self, pred: &mut Pred<'_>) -> bool {
        match self {
            Self::Table(_) => false,
            Self::Subquery { select, .. } => select.any_expr(pred),
            Self::Function { args, .. } => any_of(args, pred),
            Self::Join(join) => {
                join.left.any_expr(pred)
                    || join.right.any_expr(pred)
                    || matches!(&join.constraint, Some(JoinConstraint::On(on)) if on.any(pred))
            }
        }
    }
}

impl Statement {
    /// Returns whether a `RAISE` appears outside of a trigger body.
    pub(crate) fn contains_raise(&self) -> bool {
        self.any_expr_outside_triggers(&mut |e: &Expr| matches!(e, Expr::Raise(_)))
    }

    fn any_expr_outside_triggers(&self, pred: &mut Pred<'_>) -> bool {
        match self {
            Self::Select(select) => select.any_expr(pred),
            Self::Insert(insert) => {
                any_with(insert.with.as_ref(), pred)
                    || match &insert.source {
                        InsertSource::Values(rows) => rows.iter().any(|row| any_of(row, pred)),
                        InsertSource::Select(select) => select.any_expr(pred),
                        InsertSource::DefaultValues => false,
                    }
                    || insert.upserts.iter().any(|upsert| {
                        upsert.target.as_ref().is_some_and(|t| {
                            any_indexed(&t.columns, pred) || any_opt(t.where_clause.as_ref(), pred)
                        }) || match &upsert.action {
                            UpsertAction::Nothing => false,
                            UpsertAction::Update {
                                assignments,
                                where_clause,
                            } => {
                                any_assignment(assignments, pred)
                                    || any_opt(where_clause.as_ref(), pred)
                            }
                        }
                    })
                    || any_result(&insert.returning, pred)
            }
            Self::Update(update) => {
                any_with(update.with.as_ref(), pred)
                    || any_assignment(&update.assignments, pred)
                    || update.from.as_ref().is_some_and(|from| from.any_expr(pred))
                    || any_opt(update.where_clause.as_ref(), pred)
                    || any_result(&update.returning, pred)
                    || update.order_by.iter().any(|term| term.expr.any(pred))
                    || any_opt(update.limit.as_ref(), pred)
                    || any_opt(update.offset.as_ref(), pred)
            }
            Self::Delete(delete) => {
                any_with(delete.with.as_ref(), pred)
                    || any_opt(delete.where_clause.as_ref(), pred)
                    || any_result(&delete.returning, pred)
                    || delete.order_by.iter().any(|term| term.expr.any(pred))
                    || any_opt(delete.limit.as_ref(), pred)
                    || any_opt(delete.offset.as_ref(), pred)
            }
            Self::CreateTable(create) => match &create.body {
                CreateTableBody::Columns {
                    columns,
                    constraints,
                    ..
                } => {
                    columns.iter().any(|def| any_column_def(def, pred))
                        || constraints.iter().any(|c| match &c.kind {
                            TableConstraintKind::PrimaryKey { columns, .. }
                            | TableConstraintKind::Unique { columns, .. } => {
                                any_indexed(columns, pred)
                            }
                            TableConstraintKind::Check(expr) => expr.any(pred),
                            TableConstraintKind::ForeignKey { .. } => false,
                        })
                }
                CreateTableBody::AsSelect(select) => select.any_expr(pred),
            },
            Self::CreateIndex(index) => {
                any_indexed(&index.columns, pred) || any_opt(index.where_clause.as_ref(), pred)
            }
            Self::CreateView(view) => view.select.any_expr(pred),
            Self::AlterTable(alter) => match &alter.action {
                AlterTableAction::AddColumn(def) => any_column_def(def, pred),
                _ => false,
            },
            Self::Attach { file, .. } => file.any(pred),
            Self::Vacuum { into, .. } => any_opt(into.as_ref(), pred),
            Self::Explain { statement, .. } => statement.any_expr_outside_triggers(pred),
            Self::CreateTrigger(_)
            | Self::CreateVirtualTable(_)
            | Self::Drop(_)
            | Self::Begin(_)
            | Self::Commit
            | Self::Rollback(_)
            | Self::Savepoint(_)
            | Self::Release(_)
            | Self::Detach(_)
            | Self::Reindex(_)
            | Self::Analyze(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RaiseAction;

    #[test]
    fn test_any_finds_nested_raise() {
        let expr = Expr::from(1).add(Expr::Raise(RaiseAction::Ignore)).eq(2);
        assert!(expr.any(&mut |e: &Expr| matches!(e, Expr::Raise(_))));
        assert!(!Expr::from(1).any(&mut |e: &Expr| matches!(e, Expr::Raise(_))));
    }

    #[test]
    fn test_statement_contains_raise() {
        let select = SelectStatement::from_body(SelectBody::Values(vec![vec![Expr::Raise(
            RaiseAction::Abort(String::from("no")),
        )]]));
        assert!(Statement::Select(select).contains_raise());
        assert!(!Statement::Commit.contains_raise());
    }
}
