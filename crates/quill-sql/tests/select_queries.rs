//! Tests for SELECT construction: cores, compounds, CTEs and FROM clauses.

mod common;
use common::*;

use quill_sql::prelude::*;

// ===================================================================
// Compound selects
// ===================================================================

#[test]
fn compound_operators_render_in_declared_order() {
    let query = select([col("a")])
        .from("t1")
        .union_all(select([col("b")]).from("t2"))
        .union(select([col("c")]).from("t3"))
        .order_by([lit(1)])
        .limit(20);
    assert_eq!(
        sql(query),
        r#"SELECT "a" FROM "t1" UNION ALL SELECT "b" FROM "t2" UNION SELECT "c" FROM "t3" ORDER BY 1 LIMIT 20"#
    );
}

#[test]
fn intersect_and_except_with_values() {
    let rows = values([[lit(1)], [lit(2)]]).unwrap();
    let query = select([col("id")])
        .from("a")
        .intersect(select([col("id")]).from("b"))
        .except(rows);
    assert_eq!(
        sql(query),
        r#"SELECT "id" FROM "a" INTERSECT SELECT "id" FROM "b" EXCEPT VALUES (1), (2)"#
    );
}

#[test]
fn values_rows_must_be_rectangular() {
    state_err(values(vec![vec![lit(1), lit(2)], vec![lit(3)]]));
}

// ===================================================================
// FROM clause
// ===================================================================

#[test]
fn aliased_table_qualifies_columns_with_alias() {
    let users = table("users").alias("u");
    let orders = table("orders").alias("o");
    let query = select([users.col("name"), count_star()])
        .from(
            users
                .clone()
                .left_join(orders.clone())
                .on(orders.col("user_id").eq(users.col("id"))),
        )
        .group_by([users.col("name")]);
    assert_eq!(
        sql(query),
        r#"SELECT "u"."name", COUNT(*) FROM "users" AS "u" LEFT JOIN "orders" AS "o" ON "o"."user_id" = "u"."id" GROUP BY "u"."name""#
    );
}

#[test]
fn table_valued_function_and_subquery() {
    let query = select([col("value")])
        .from(table_function("json_each", [lit("[1,2]")]))
        .where_(col("value").in_select(select([col("n")]).from("allowed")));
    assert_eq!(
        sql(query),
        r#"SELECT "value" FROM "json_each"('[1,2]') WHERE "value" IN (SELECT "n" FROM "allowed")"#
    );
}

#[test]
fn exists_and_scalar_subqueries() {
    let newest = scalar(select([max([col("created")])]).from("posts"));
    let query = select([newest.alias("newest")])
        .where_(exists(select([lit(1)]).from("posts")));
    assert_eq!(
        sql(query),
        r#"SELECT (SELECT MAX("created") FROM "posts") AS "newest" WHERE EXISTS (SELECT 1 FROM "posts")"#
    );
}

// ===================================================================
// WITH
// ===================================================================

#[test]
fn with_prefix_attaches_once_before_first_core() {
    let recent = cte("recent").as_select(
        select_all()
            .from("events")
            .where_(col("at").gt(datetime([lit("now"), lit("-1 day")]))),
    );
    let query = with(recent)
        .select([col("kind"), count_star()])
        .from("recent")
        .group_by([col("kind")])
        .union_all(select([lit("total"), count_star()]).from("recent"));
    assert_eq!(
        sql(query),
        r#"WITH "recent" AS (SELECT * FROM "events" WHERE "at" > DATETIME('now', '-1 day')) SELECT "kind", COUNT(*) FROM "recent" GROUP BY "kind" UNION ALL SELECT 'total', COUNT(*) FROM "recent""#
    );
}

#[test]
fn raise_is_rejected_outside_triggers() {
    build_err(select([raise_fail("no")]));
}
