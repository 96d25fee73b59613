//! Tests for transaction, attachment, maintenance and EXPLAIN statements.

mod common;
use common::*;

use quill_sql::prelude::*;

#[test]
fn transaction_statements() {
    assert_eq!(
        begin_with(TransactionMode::Exclusive).render(),
        "BEGIN EXCLUSIVE TRANSACTION"
    );
    assert_eq!(savepoint("before import").render(), r#"SAVEPOINT "before import""#);
    assert_eq!(
        rollback_to("before import").render(),
        r#"ROLLBACK TO SAVEPOINT "before import""#
    );
    assert_eq!(release("before import").render(), r#"RELEASE SAVEPOINT "before import""#);
    assert_eq!(commit().render(), "COMMIT");
}

#[test]
fn attach_takes_any_expression() {
    let path = lit("/data/").concat(col("name"));
    assert_eq!(
        attach(path, "archive").render(),
        r#"ATTACH DATABASE '/data/' || "name" AS "archive""#
    );
    assert_eq!(
        attach("C:/'file1'.db", "db1").render(),
        r#"ATTACH DATABASE 'C:/''file1''.db' AS "db1""#
    );
}

#[test]
fn maintenance_statements() {
    assert_eq!(reindex(("temp", "X")).render(), r#"REINDEX "temp"."X""#);
    assert_eq!(analyze(("main", "users")).render(), r#"ANALYZE "main"."users""#);
    assert_eq!(
        sql(vacuum().into_file("/tmp/copy.db")),
        "VACUUM INTO '/tmp/copy.db'"
    );
}

#[test]
fn explain_wraps_any_statement() {
    let plan = explain_query_plan(delete_from("t").where_(col("a").eq(1))).unwrap();
    assert_eq!(
        plan.render(),
        r#"EXPLAIN QUERY PLAN DELETE FROM "t" WHERE "a" = 1"#
    );
    assert_eq!(
        explain(create_table("t").column(column_def("a"))).unwrap().render(),
        r#"EXPLAIN CREATE TABLE "t" ("a")"#
    );
    state_err(explain(plan));
}

#[test]
fn explain_propagates_builder_errors() {
    state_err(explain(create_table("t")));
}
