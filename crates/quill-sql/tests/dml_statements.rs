//! Tests for INSERT, UPDATE and DELETE construction.

mod common;
use common::*;

use quill_sql::prelude::*;

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_from_cte_select() {
    let staged = cte("staged").as_select(select([col("name")]).from("import"));
    let insert = with(staged)
        .insert_into("users")
        .columns(["name"])
        .unwrap()
        .select(select([col("name")]).from("staged"));
    assert_eq!(
        sql(insert),
        r#"WITH "staged" AS (SELECT "name" FROM "import") INSERT INTO "users" ("name") SELECT "name" FROM "staged""#
    );
}

#[test]
fn insert_upsert_chain() {
    let insert = insert_into("counters")
        .columns(["key", "hits"])
        .unwrap()
        .values([lit("home"), lit(1)])
        .unwrap()
        .on_conflict(["key"])
        .unwrap()
        .do_update("hits", col("hits").add(excluded("hits")))
        .done()
        .on_any_conflict()
        .unwrap()
        .do_nothing();
    assert_eq!(
        sql(insert),
        r#"INSERT INTO "counters" ("key", "hits") VALUES ('home', 1) ON CONFLICT ("key") DO UPDATE SET "hits" = "hits" + "excluded"."hits" ON CONFLICT DO NOTHING"#
    );
}

#[test]
fn insert_rejects_bad_rows() {
    state_err(insert_into("t").columns(Vec::<String>::new()));
    state_err(
        insert_into("t")
            .columns(["a", "b"])
            .unwrap()
            .values([lit(1), lit(2), lit(3)]),
    );
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_or_ignore_with_returning() {
    let update = update_or(ConflictResolution::Ignore, "users")
        .set("email", lower(col("email")))
        .where_(col("email").not_eq(lower(col("email"))))
        .returning([col("id")]);
    assert_eq!(
        sql(update),
        r#"UPDATE OR IGNORE "users" SET "email" = LOWER("email") WHERE "email" != LOWER("email") RETURNING "id""#
    );
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_ordered_limit() {
    let delete = delete_from("Log")
        .order_by([length(col("message"))])
        .limit(100);
    assert_eq!(
        sql(delete),
        r#"DELETE FROM "Log" ORDER BY LENGTH("message") LIMIT 100"#
    );
}

#[test]
fn delete_with_subquery_filter() {
    let delete = delete_from(table("sessions").not_indexed())
        .where_(col("user_id").not_in_select(select([col("id")]).from("users")))
        .returning([star()]);
    assert_eq!(
        sql(delete),
        r#"DELETE FROM "sessions" NOT INDEXED WHERE "user_id" NOT IN (SELECT "id" FROM "users") RETURNING *"#
    );
}
