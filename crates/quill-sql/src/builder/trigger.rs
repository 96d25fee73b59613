//! CREATE TRIGGER builder using the typestate pattern.
//!
//! A trigger is named, then timed against an event, then bound to a table,
//! and only then accepts body statements. Body statements may use `NEW` and
//! `OLD` references and `RAISE`.

use std::marker::PhantomData;

use super::{and_where, Build};
use crate::ast::{
    CreateTriggerStatement, Expr, InsertSource, QualifiedName, Statement, TableRef,
    TriggerEvent, TriggerTiming,
};
use crate::error::{Error, Result};

// Typestate markers (zero-sized types)

/// Marker: no timing or event yet.
pub struct Unbound;
/// Marker: timing and event are set, the table is not.
pub struct Timed;
/// Marker: the target table is set, no body statements yet.
pub struct Targeted;
/// Marker: at least one body statement.
pub struct HasSteps;

/// A CREATE TRIGGER builder.
pub struct CreateTrigger<S> {
    statement: CreateTriggerStatement,
    _state: PhantomData<S>,
}

/// Starts `CREATE TRIGGER name`.
#[must_use]
pub fn create_trigger(name: impl Into<QualifiedName>) -> CreateTrigger<Unbound> {
    CreateTrigger {
        statement: CreateTriggerStatement {
            temporary: false,
            if_not_exists: false,
            name: name.into(),
            timing: None,
            event: TriggerEvent::Insert,
            table: String::new(),
            for_each_row: false,
            when: None,
            steps: Vec::new(),
        },
        _state: PhantomData,
    }
}

impl TriggerEvent {
    /// `UPDATE OF columns`.
    #[must_use]
    pub fn update_of<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self::UpdateOf(columns.into_iter().map(Into::into).collect())
    }
}

impl<S> CreateTrigger<S> {
    fn into_state<T>(self) -> CreateTrigger<T> {
        CreateTrigger {
            statement: self.statement,
            _state: PhantomData,
        }
    }

    fn push_step(&mut self, step: impl Build) -> Result<()> {
        let step = step.finish()?;
        check_step(&step)?;
        self.statement.steps.push(step);
        Ok(())
    }
}

impl CreateTrigger<Unbound> {
    /// `CREATE TEMP TRIGGER`.
    #[must_use]
    pub const fn temporary(mut self) -> Self {
        self.statement.temporary = true;
        self
    }

    /// `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.statement.if_not_exists = true;
        self
    }

    fn timed(mut self, timing: Option<TriggerTiming>, event: TriggerEvent) -> CreateTrigger<Timed> {
        self.statement.timing = timing;
        self.statement.event = event;
        self.into_state()
    }

    /// `BEFORE event`.
    #[must_use]
    pub fn before(self, event: TriggerEvent) -> CreateTrigger<Timed> {
        self.timed(Some(TriggerTiming::Before), event)
    }

    /// `AFTER event`.
    #[must_use]
    pub fn after(self, event: TriggerEvent) -> CreateTrigger<Timed> {
        self.timed(Some(TriggerTiming::After), event)
    }

    /// `INSTEAD OF event`, for triggers on views.
    #[must_use]
    pub fn instead_of(self, event: TriggerEvent) -> CreateTrigger<Timed> {
        self.timed(Some(TriggerTiming::InsteadOf), event)
    }

    /// The event alone, leaving the timing to SQLite's default.
    #[must_use]
    pub fn on_event(self, event: TriggerEvent) -> CreateTrigger<Timed> {
        self.timed(None, event)
    }
}

impl CreateTrigger<Timed> {
    /// `ON table`.
    #[must_use]
    pub fn on(mut self, table: impl Into<String>) -> CreateTrigger<Targeted> {
        self.statement.table = table.into();
        self.into_state()
    }
}

impl CreateTrigger<Targeted> {
    /// `FOR EACH ROW`.
    #[must_use]
    pub const fn for_each_row(mut self) -> Self {
        self.statement.for_each_row = true;
        self
    }

    /// `WHEN condition`; repeated calls are combined with AND.
    #[must_use]
    pub fn when(mut self, condition: impl Into<Expr>) -> Self {
        and_where(&mut self.statement.when, condition.into());
        self
    }

    /// Appends the first body statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if the statement cannot appear
    /// in a trigger body.
    pub fn step(mut self, step: impl Build) -> Result<CreateTrigger<HasSteps>> {
        self.push_step(step)?;
        Ok(self.into_state())
    }
}

impl CreateTrigger<HasSteps> {
    /// Appends another body statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if the statement cannot appear
    /// in a trigger body.
    pub fn step(mut self, step: impl Build) -> Result<Self> {
        self.push_step(step)?;
        Ok(self)
    }
}

impl Build for CreateTrigger<HasSteps> {
    fn finish(self) -> Result<Statement> {
        Ok(Statement::CreateTrigger(self.statement))
    }
}

fn reject(message: &str) -> Result<()> {
    Err(Error::state("CREATE TRIGGER", message))
}

fn check_target(table: &TableRef) -> Result<()> {
    if table.name.schema.is_some() {
        return reject("tables in a trigger body cannot be schema-qualified");
    }
    if table.alias.is_some() || table.hint.is_some() {
        return reject("tables in a trigger body cannot be aliased or indexed");
    }
    Ok(())
}

fn check_step(step: &Statement) -> Result<()> {
    match step {
        Statement::Select(select) if select.with.is_some() => {
            reject("WITH is not allowed in a trigger body")
        }
        Statement::Select(_) => Ok(()),
        Statement::Insert(insert) => {
            if insert.with.is_some() {
                return reject("WITH is not allowed in a trigger body");
            }
            if insert.table.schema.is_some() || insert.alias.is_some() {
                return reject("tables in a trigger body cannot be schema-qualified or aliased");
            }
            if matches!(insert.source, InsertSource::DefaultValues) {
                return reject("DEFAULT VALUES is not allowed in a trigger body");
            }
            if !insert.returning.is_empty() {
                return reject("RETURNING is not allowed in a trigger body");
            }
            Ok(())
        }
        Statement::Update(update) => {
            if update.with.is_some() {
                return reject("WITH is not allowed in a trigger body");
            }
            check_target(&update.table)?;
            if !update.returning.is_empty() {
                return reject("RETURNING is not allowed in a trigger body");
            }
            if !update.order_by.is_empty() || update.limit.is_some() {
                return reject("ORDER BY and LIMIT are not allowed in a trigger body");
            }
            Ok(())
        }
        Statement::Delete(delete) => {
            if delete.with.is_some() {
                return reject("WITH is not allowed in a trigger body");
            }
            check_target(&delete.table)?;
            if !delete.returning.is_empty() {
                return reject("RETURNING is not allowed in a trigger body");
            }
            if !delete.order_by.is_empty() || delete.limit.is_some() {
                return reject("ORDER BY and LIMIT are not allowed in a trigger body");
            }
            Ok(())
        }
        other => Err(Error::state(
            "CREATE TRIGGER",
            format!("{} cannot appear in a trigger body", other.kind()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{
        col, commit, cte, delete_from, insert_into, new_row, old_row, raise_abort, select, table,
        update,
    };

    #[test]
    fn test_audit_trigger() {
        let sql = create_trigger("log_price")
            .if_not_exists()
            .after(TriggerEvent::update_of(["price"]))
            .on("items")
            .for_each_row()
            .when(old_row("price").not_eq(new_row("price")))
            .step(
                insert_into("audit")
                    .columns(["item", "old", "new"])
                    .unwrap()
                    .values([new_row("id"), old_row("price"), new_row("price")])
                    .unwrap(),
            )
            .unwrap()
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"CREATE TRIGGER IF NOT EXISTS "log_price" AFTER UPDATE OF "price" ON "items" FOR EACH ROW WHEN OLD."price" != NEW."price" BEGIN INSERT INTO "audit" ("item", "old", "new") VALUES (NEW."id", OLD."price", NEW."price"); END"#
        );
    }

    #[test]
    fn test_raise_inside_trigger() {
        let sql = create_trigger(("temp", "guard"))
            .temporary()
            .before(TriggerEvent::Delete)
            .on("accounts")
            .step(select([raise_abort("locked")]).where_(old_row("locked")))
            .unwrap()
            .step(delete_from("sessions").where_(col("account").eq(old_row("id"))))
            .unwrap()
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"CREATE TEMP TRIGGER "temp"."guard" BEFORE DELETE ON "accounts" BEGIN SELECT RAISE(ABORT, 'locked') WHERE OLD."locked"; DELETE FROM "sessions" WHERE "account" = OLD."id"; END"#
        );
    }

    #[test]
    fn test_rejected_steps() {
        let start = || create_trigger("t").on_event(TriggerEvent::Insert).on("a");
        assert!(start().step(commit()).is_err());
        assert!(start()
            .step(update(table("b").alias("x")).set("c", 1))
            .is_err());
        assert!(start()
            .step(delete_from(("main", "b")).order_by([col("c")]).limit(1))
            .is_err());
        assert!(start().step(insert_into("b").default_values()).is_err());
        let prefixed = crate::builder::with(cte("c").as_select(select([col("x")])))
            .select([col("x")])
            .from("c");
        assert!(start().step(prefixed).is_err());
    }

    #[test]
    fn test_default_timing() {
        let sql = create_trigger("t")
            .on_event(TriggerEvent::Insert)
            .on("a")
            .step(update("b").set("n", col("n").add(1)))
            .unwrap()
            .build()
            .unwrap()
            .render();
        assert_eq!(
            sql,
            r#"CREATE TRIGGER "t" INSERT ON "a" BEGIN UPDATE "b" SET "n" = "n" + 1; END"#
        );
    }
}
