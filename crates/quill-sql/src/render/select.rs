use crate::ast::{
    Cte, Expr, IndexHint, JoinConstraint, JoinKind, OrderingTerm, Precedence, ResultColumn, SelectBody,
    SelectCore, SelectStatement, TableExpr, TableRef, WithClause,
};

use super::SqlWriter;

impl SqlWriter {
    /// Appends a complete, possibly compound, select statement.
    pub fn select(&mut self, select: &SelectStatement) {
        if let Some(with) = &select.with {
            self.with_clause(with);
        }
        self.select_body(&select.body);
        for (op, body) in &select.compounds {
            self.push(" ");
            self.push(op.as_str());
            self.push(" ");
            self.select_body(body);
        }
        self.order_by(&select.order_by);
        self.limit_offset(select.limit.as_ref(), select.offset.as_ref());
    }

    /// Appends `WITH [RECURSIVE] ...` followed by a space.
    pub(crate) fn with_clause(&mut self, with: &WithClause) {
        self.push(if with.recursive { "WITH RECURSIVE " } else { "WITH " });
        self.comma_list(&with.ctes, Self::cte);
        self.push(" ");
    }

    fn cte(&mut self, cte: &Cte) {
        self.ident(&cte.name);
        if !cte.columns.is_empty() {
            self.ident_list(&cte.columns);
        }
        self.push(" AS ");
        match cte.materialized {
            Some(true) => self.push("MATERIALIZED "),
            Some(false) => self.push("NOT MATERIALIZED "),
            None => {}
        }
        self.push("(");
        self.select(&cte.select);
        self.push(")");
    }

    fn select_body(&mut self, body: &SelectBody) {
        match body {
            SelectBody::Select(core) => self.select_core(core),
            SelectBody::Values(rows) => {
                self.push("VALUES ");
                self.values_rows(rows);
            }
        }
    }

    pub(crate) fn values_rows(&mut self, rows: &[Vec<Expr>]) {
        self.comma_list(rows, |w, row| {
            w.push("(");
            w.expr_list(row);
            w.push(")");
        });
    }

    fn select_core(&mut self, core: &SelectCore) {
        self.push(if core.distinct { "SELECT DISTINCT " } else { "SELECT " });
        if core.columns.is_empty() {
            self.push("*");
        } else {
            self.result_columns(&core.columns);
        }
        if let Some(from) = &core.from {
            self.push(" FROM ");
            self.table_expr(from);
        }
        if let Some(filter) = &core.where_clause {
            self.push(" WHERE ");
            self.expr(filter, Precedence::Lowest);
        }
        if !core.group_by.is_empty() {
            self.push(" GROUP BY ");
            self.expr_list(&core.group_by);
        }
        if let Some(having) = &core.having {
            self.push(" HAVING ");
            self.expr(having, Precedence::Lowest);
        }
    }

    pub(crate) fn result_columns(&mut self, columns: &[ResultColumn]) {
        self.comma_list(columns, |w, column| match column {
            ResultColumn::Star => w.push("*"),
            ResultColumn::TableStar(table) => {
                w.ident(table);
                w.push(".*");
            }
            ResultColumn::Expr { expr, alias } => {
                w.expr(expr, Precedence::Lowest);
                if let Some(alias) = alias {
                    w.push(" AS ");
                    w.ident(alias);
                }
            }
        });
    }

    /// Appends ` ORDER BY ...` when `terms` is non-empty.
    pub(crate) fn order_by(&mut self, terms: &[OrderingTerm]) {
        if terms.is_empty() {
            return;
        }
        self.push(" ORDER BY ");
        self.comma_list(terms, |w, term| {
            if let Some(collation) = &term.collation {
                w.expr(&term.expr, Precedence::Collate);
                w.push(" COLLATE ");
                w.ident(collation);
            } else {
                w.expr(&term.expr, Precedence::Lowest);
            }
            if let Some(direction) = term.direction {
                w.push(" ");
                w.push(direction.as_str());
            }
            if let Some(nulls) = term.nulls {
                w.push(" ");
                w.push(nulls.as_str());
            }
        });
    }

    pub(crate) fn limit_offset(&mut self, limit: Option<&Expr>, offset: Option<&Expr>) {
        if let Some(limit) = limit {
            self.push(" LIMIT ");
            self.expr(limit, Precedence::Lowest);
        }
        if let Some(offset) = offset {
            self.push(" OFFSET ");
            self.expr(offset, Precedence::Lowest);
        }
    }

    /// Appends a FROM-clause tree.
    pub fn table_expr(&mut self, table: &TableExpr) {
        match table {
            TableExpr::Table(table) => self.table_ref(table),
            TableExpr::Subquery { select, alias } => {
                self.push("(");
                self.select(select);
                self.push(")");
                self.alias(alias.as_deref());
            }
            TableExpr::Function { name, args, alias } => {
                self.name(name);
                self.push("(");
                self.expr_list(args);
                self.push(")");
                self.alias(alias.as_deref());
            }
            TableExpr::Join(join) => {
                self.table_expr(&join.left);
                if join.operator.kind == JoinKind::Comma {
                    self.push(", ");
                } else {
                    self.push(if join.operator.natural { " NATURAL " } else { " " });
                    self.push(join.operator.kind.as_str());
                    self.push(" ");
                }
                if matches!(join.right, TableExpr::Join(_)) {
                    self.push("(");
                    self.table_expr(&join.right);
                    self.push(")");
                } else {
                    self.table_expr(&join.right);
                }
                match &join.constraint {
                    Some(JoinConstraint::On(on)) => {
                        self.push(" ON ");
                        self.expr(on, Precedence::Lowest);
                    }
                    Some(JoinConstraint::Using(columns)) => {
                        self.push(" USING ");
                        self.ident_list(columns);
                    }
                    None => {}
                }
            }
        }
    }

    /// Appends a named table with its alias and index hint.
    pub(crate) fn table_ref(&mut self, table: &TableRef) {
        self.name(&table.name);
        self.alias(table.alias.as_deref());
        match &table.hint {
            Some(IndexHint::IndexedBy(index)) => {
                self.push(" INDEXED BY ");
                self.ident(index);
            }
            Some(IndexHint::NotIndexed) => self.push(" NOT INDEXED"),
            None => {}
        }
    }

    fn alias(&mut self, alias: Option<&str>) {
        if let Some(alias) = alias {
            self.push(" AS ");
            self.ident(alias);
        }
    }
}
