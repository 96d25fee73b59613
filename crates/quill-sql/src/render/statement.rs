use crate::ast::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, InsertVerb, Precedence, ResultColumn,
    Statement, UpdateStatement, Upsert, UpsertAction,
};

use super::SqlWriter;

impl SqlWriter {
    /// Appends any statement.
    pub fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Select(select) => self.select(select),
            Statement::Insert(insert) => self.insert(insert),
            Statement::Update(update) => self.update(update),
            Statement::Delete(delete) => self.delete(delete),
            Statement::CreateTable(create) => self.create_table(create),
            Statement::CreateIndex(create) => self.create_index(create),
            Statement::CreateView(create) => self.create_view(create),
            Statement::CreateTrigger(create) => self.create_trigger(create),
            Statement::CreateVirtualTable(create) => self.create_virtual_table(create),
            Statement::AlterTable(alter) => self.alter_table(alter),
            Statement::Drop(drop) => {
                self.push("DROP ");
                self.push(drop.kind.as_str());
                if drop.if_exists {
                    self.push(" IF EXISTS");
                }
                self.push(" ");
                self.name(&drop.name);
            }
            Statement::Begin(mode) => {
                self.push("BEGIN ");
                if let Some(mode) = mode {
                    self.push(mode.as_str());
                    self.push(" ");
                }
                self.push("TRANSACTION");
            }
            Statement::Commit => self.push("COMMIT"),
            Statement::Rollback(savepoint) => {
                self.push("ROLLBACK");
                if let Some(savepoint) = savepoint {
                    self.push(" TO SAVEPOINT ");
                    self.ident(savepoint);
                }
            }
            Statement::Savepoint(name) => {
                self.push("SAVEPOINT ");
                self.ident(name);
            }
            Statement::Release(name) => {
                self.push("RELEASE SAVEPOINT ");
                self.ident(name);
            }
            Statement::Attach { file, schema } => {
                self.push("ATTACH DATABASE ");
                self.expr(file, Precedence::Lowest);
                self.push(" AS ");
                self.ident(schema);
            }
            Statement::Detach(schema) => {
                self.push("DETACH DATABASE ");
                self.ident(schema);
            }
            Statement::Vacuum { schema, into } => {
                self.push("VACUUM");
                if let Some(schema) = schema {
                    self.push(" ");
                    self.ident(schema);
                }
                if let Some(into) = into {
                    self.push(" INTO ");
                    self.expr(into, Precedence::Lowest);
                }
            }
            Statement::Reindex(target) | Statement::Analyze(target) => {
                self.push(statement.kind());
                if let Some(target) = target {
                    self.push(" ");
                    self.name(target);
                }
            }
            Statement::Explain {
                query_plan,
                statement,
            } => {
                self.push(if *query_plan {
                    "EXPLAIN QUERY PLAN "
                } else {
                    "EXPLAIN "
                });
                self.statement(statement);
            }
        }
    }

    fn insert(&mut self, insert: &InsertStatement) {
        if let Some(with) = &insert.with {
            self.with_clause(with);
        }
        match insert.verb {
            InsertVerb::Insert => self.push("INSERT INTO "),
            InsertVerb::Replace => self.push("REPLACE INTO "),
            InsertVerb::InsertOr(action) => {
                self.push("INSERT OR ");
                self.push(action.as_str());
                self.push(" INTO ");
            }
        }
        self.name(&insert.table);
        if let Some(alias) = &insert.alias {
            self.push(" AS ");
            self.ident(alias);
        }
        if !insert.columns.is_empty() {
            self.push(" ");
            self.ident_list(&insert.columns);
        }
        match &insert.source {
            InsertSource::Values(rows) => {
                self.push(" VALUES ");
                self.values_rows(rows);
            }
            InsertSource::Select(select) => {
                self.push(" ");
                self.select(select);
            }
            InsertSource::DefaultValues => self.push(" DEFAULT VALUES"),
        }
        for upsert in &insert.upserts {
            self.upsert(upsert);
        }
        self.returning(&insert.returning);
    }

    fn upsert(&mut self, upsert: &Upsert) {
        self.push(" ON CONFLICT");
        if let Some(target) = &upsert.target {
            self.push(" (");
            self.comma_list(&target.columns, Self::indexed_column);
            self.push(")");
            if let Some(filter) = &target.where_clause {
                self.push(" WHERE ");
                self.expr(filter, Precedence::Lowest);
            }
        }
        match &upsert.action {
            UpsertAction::Nothing => self.push(" DO NOTHING"),
            UpsertAction::Update {
                assignments,
                where_clause,
            } => {
                self.push(" DO UPDATE SET ");
                self.assignments(assignments);
                if let Some(filter) = where_clause {
                    self.push(" WHERE ");
                    self.expr(filter, Precedence::Lowest);
                }
            }
        }
    }

    fn assignments(&mut self, assignments: &[Assignment]) {
        self.comma_list(assignments, |w, assignment| {
            if let [column] = assignment.columns.as_slice() {
                w.ident(column);
            } else {
                w.ident_list(&assignment.columns);
            }
            w.push(" = ");
            w.expr(&assignment.value, Precedence::Lowest);
        });
    }

    fn returning(&mut self, columns: &[ResultColumn]) {
        if !columns.is_empty() {
            self.push(" RETURNING ");
            self.result_columns(columns);
        }
    }

    fn update(&mut self, update: &UpdateStatement) {
        if let Some(with) = &update.with {
            self.with_clause(with);
        }
        self.push("UPDATE ");
        if let Some(action) = update.or {
            self.push("OR ");
            self.push(action.as_str());
            self.push(" ");
        }
        self.table_ref(&update.table);
        self.push(" SET ");
        self.assignments(&update.assignments);
        if let Some(from) = &update.from {
            self.push(" FROM ");
            self.table_expr(from);
        }
        if let Some(filter) = &update.where_clause {
            self.push(" WHERE ");
            self.expr(filter, Precedence::Lowest);
        }
        self.returning(&update.returning);
        self.order_by(&update.order_by);
        self.limit_offset(update.limit.as_ref(), update.offset.as_ref());
    }

    fn delete(&mut self, delete: &DeleteStatement) {
        if let Some(with) = &delete.with {
            self.with_clause(with);
        }
        self.push("DELETE FROM ");
        self.table_ref(&delete.table);
        if let Some(filter) = &delete.where_clause {
            self.push(" WHERE ");
            self.expr(filter, Precedence::Lowest);
        }
        self.returning(&delete.returning);
        self.order_by(&delete.order_by);
        self.limit_offset(delete.limit.as_ref(), delete.offset.as_ref());
    }
}
