//! Tests for quoting, literal escaping and precedence-driven parentheses.

mod common;
use common::*;

use quill_sql::prelude::*;

// ===================================================================
// Escaping
// ===================================================================

#[test]
fn text_literal_doubles_quotes() {
    assert_eq!(
        attach("C:/'file1'.db", "aux").render(),
        r#"ATTACH DATABASE 'C:/''file1''.db' AS "aux""#
    );
}

#[test]
fn identifier_doubles_quotes() {
    let index = create_index("A \"useful\" index", "items").column("price");
    assert_eq!(
        sql(index),
        r#"CREATE INDEX "A ""useful"" index" ON "items" ("price")"#
    );
}

#[test]
fn literal_kinds() {
    let query = select([
        lit(Literal::Null),
        lit(true),
        lit(-7),
        lit(Literal::real(2.5).unwrap()),
        lit(vec![0xde_u8, 0xad]),
        current_timestamp(),
    ]);
    assert_eq!(
        sql(query),
        "SELECT NULL, TRUE, -7, 2.5, X'DEAD', CURRENT_TIMESTAMP"
    );
}

// ===================================================================
// Precedence
// ===================================================================

#[test]
fn index_expression_is_not_parenthesized() {
    let index = create_index("idx_total", "items").column(col("price").mul(col("qty")));
    assert_eq!(
        sql(index),
        r#"CREATE INDEX "idx_total" ON "items" ("price" * "qty")"#
    );
}

#[test]
fn looser_operand_is_parenthesized() {
    let product = col("price").mul(col("qty"));
    let query = select([product.clone().concat(" units")]);
    assert_eq!(sql(query), r#"SELECT ("price" * "qty") || ' units'"#);

    let query = select([product.add(1)]);
    assert_eq!(sql(query), r#"SELECT "price" * "qty" + 1"#);
}

#[test]
fn left_associative_right_operand() {
    let query = select([
        col("a").sub(col("b")).sub(col("c")),
        col("a").sub(col("b").sub(col("c"))),
        col("a").add(col("b")).mul(col("c")),
    ]);
    assert_eq!(
        sql(query),
        r#"SELECT "a" - "b" - "c", "a" - ("b" - "c"), ("a" + "b") * "c""#
    );
}

#[test]
fn logical_operators() {
    let filter = col("a")
        .eq(1)
        .or(col("b").eq(2))
        .and(col("c").eq(3).not());
    let query = select_all().from("t").where_(filter);
    assert_eq!(
        sql(query),
        r#"SELECT * FROM "t" WHERE ("a" = 1 OR "b" = 2) AND NOT "c" = 3"#
    );
}

#[test]
fn negation_never_forms_a_comment() {
    let query = select([lit(-5).neg(), col("a").add(1).neg()]);
    assert_eq!(sql(query), r#"SELECT -(-5), -("a" + 1)"#);
}

#[test]
fn predicates() {
    let query = select_all().from("t").where_(
        col("n")
            .between(1, 10)
            .and(col("s").like("a%"))
            .and(col("k").in_list([lit(1), lit(2)]))
            .and(col("d").is_null()),
    );
    assert_eq!(
        sql(query),
        r#"SELECT * FROM "t" WHERE "n" BETWEEN 1 AND 10 AND "s" LIKE 'a%' AND "k" IN (1, 2) AND "d" IS NULL"#
    );
}

#[test]
fn case_and_collate() {
    let label = case()
        .when(col("n").lt(0), "negative")
        .when(col("n").eq(0), "zero")
        .otherwise("positive");
    let query = select([label.alias("sign")])
        .from("t")
        .order_by([col("name").collate("NOCASE")]);
    assert_eq!(
        sql(query),
        r#"SELECT CASE WHEN "n" < 0 THEN 'negative' WHEN "n" = 0 THEN 'zero' ELSE 'positive' END AS "sign" FROM "t" ORDER BY "name" COLLATE "NOCASE""#
    );
}

// ===================================================================
// Idempotence
// ===================================================================

#[test]
fn rendering_is_repeatable() {
    let statement = select([col("id")])
        .from(table("users").alias("u"))
        .where_(col("id").gt(10))
        .build()
        .unwrap();
    let first = statement.render();
    assert_eq!(first, statement.render());
    assert_eq!(first, statement.to_string());
}
