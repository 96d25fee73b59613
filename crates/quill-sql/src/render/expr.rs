use crate::ast::{
    Associativity, ColumnRef, Expr, FunctionArgs, FunctionCall, FunctionName, Precedence,
    Qualifier, RaiseAction, UnaryOp,
};
use crate::ast::escape_text;

use super::SqlWriter;

impl SqlWriter {
    /// Appends `expr`, parenthesized iff it binds looser than `required`.
    pub fn expr(&mut self, expr: &Expr, required: Precedence) {
        if expr.precedence() < required {
            self.push("(");
            self.expr_unwrapped(expr);
            self.push(")");
        } else {
            self.expr_unwrapped(expr);
        }
    }

    fn expr_unwrapped(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.push(&lit.to_sql()),
            Expr::Column(column) => self.column_ref(column),
            Expr::Unary { op, operand } => self.unary(*op, operand),
            Expr::Binary { left, op, right } => {
                let tier = op.precedence();
                self.expr(left, tier);
                self.push(" ");
                self.push(op.as_str());
                self.push(" ");
                let right_tier = match op.associativity() {
                    Associativity::Left => tier.tighter(),
                    Associativity::Right => tier,
                };
                self.expr(right, right_tier);
            }
            Expr::Postfix { operand, op } => {
                self.expr(operand, Precedence::Equality);
                self.push(" ");
                self.push(op.as_str());
            }
            Expr::Collate { expr, collation } => {
                self.expr(expr, Precedence::Collate);
                self.push(" COLLATE ");
                self.ident(collation);
            }
            Expr::Like {
                expr,
                op,
                negated,
                pattern,
                escape,
            } => {
                self.expr(expr, Precedence::Equality);
                self.push(if *negated { " NOT " } else { " " });
                self.push(op.as_str());
                self.push(" ");
                self.expr(pattern, Precedence::Comparison);
                if let Some(escape) = escape {
                    self.push(" ESCAPE ");
                    self.expr(escape, Precedence::Comparison);
                }
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.expr(expr, Precedence::Equality);
                self.push(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.expr(low, Precedence::Comparison);
                self.push(" AND ");
                self.expr(high, Precedence::Comparison);
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                self.expr(expr, Precedence::Equality);
                self.push(if *negated { " NOT IN (" } else { " IN (" });
                self.expr_list(list);
                self.push(")");
            }
            Expr::InSelect {
                expr,
                select,
                negated,
            } => {
                self.expr(expr, Precedence::Equality);
                self.push(if *negated { " NOT IN (" } else { " IN (" });
                self.select(select);
                self.push(")");
            }
            Expr::Exists { select, negated } => {
                self.push(if *negated { "NOT EXISTS (" } else { "EXISTS (" });
                self.select(select);
                self.push(")");
            }
            Expr::Subquery(select) => {
                self.push("(");
                self.select(select);
                self.push(")");
            }
            Expr::Function(call) => self.function_call(call),
            Expr::Case {
                operand,
                when_then,
                else_result,
            } => {
                self.push("CASE");
                if let Some(operand) = operand {
                    self.push(" ");
                    self.expr(operand, Precedence::Lowest);
                }
                for (when, then) in when_then {
                    self.push(" WHEN ");
                    self.expr(when, Precedence::Lowest);
                    self.push(" THEN ");
                    self.expr(then, Precedence::Lowest);
                }
                if let Some(else_result) = else_result {
                    self.push(" ELSE ");
                    self.expr(else_result, Precedence::Lowest);
                }
                self.push(" END");
            }
            Expr::Cast { expr, type_name } => {
                self.push("CAST(");
                self.expr(expr, Precedence::Lowest);
                self.push(" AS ");
                self.push(type_name);
                self.push(")");
            }
            Expr::Row(items) => {
                self.push("(");
                self.expr_list(items);
                self.push(")");
            }
            Expr::Raise(action) => self.raise(action),
        }
    }

    fn column_ref(&mut self, column: &ColumnRef) {
        match &column.qualifier {
            Some(Qualifier::Table(table)) => {
                self.name(table);
                self.push(".");
            }
            Some(Qualifier::New) => self.push("NEW."),
            Some(Qualifier::Old) => self.push("OLD."),
            None => {}
        }
        self.ident(&column.column);
    }

    fn unary(&mut self, op: UnaryOp, operand: &Expr) {
        if op == UnaryOp::Not {
            self.push("NOT ");
            self.expr(operand, op.precedence());
            return;
        }
        self.push(op.as_str());
        let mut inner = Self::new();
        inner.expr(operand, op.precedence());
        let inner = inner.finish();
        // `--` starts a comment.
        if matches!(op, UnaryOp::Neg | UnaryOp::Plus) && inner.starts_with(['-', '+']) {
            self.push("(");
            self.push(&inner);
            self.push(")");
        } else {
            self.push(&inner);
        }
    }

    fn function_call(&mut self, call: &FunctionCall) {
        match &call.name {
            FunctionName::Builtin(name) => self.push(name),
            FunctionName::Named(name) => self.ident(name),
        }
        self.push("(");
        if call.distinct {
            self.push("DISTINCT ");
        }
        match &call.args {
            FunctionArgs::Star => self.push("*"),
            FunctionArgs::List(args) => self.expr_list(args),
        }
        self.push(")");
    }

    fn raise(&mut self, action: &RaiseAction) {
        let (keyword, message) = match action {
            RaiseAction::Ignore => ("IGNORE", None),
            RaiseAction::Rollback(message) => ("ROLLBACK", Some(message)),
            RaiseAction::Abort(message) => ("ABORT", Some(message)),
            RaiseAction::Fail(message) => ("FAIL", Some(message)),
        };
        self.push("RAISE(");
        self.push(keyword);
        if let Some(message) = message {
            self.push(", ");
            self.push(&escape_text(message));
        }
        self.push(")");
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Literal, RaiseAction};
    use crate::builder::{col, count_star, lit};
    use crate::render::ToSql;

    #[test]
    fn test_tighter_child_not_parenthesized() {
        let expr = col("a").add(col("b").mul(col("c")));
        assert_eq!(expr.to_sql(), r#""a" + "b" * "c""#);
    }

    #[test]
    fn test_looser_child_parenthesized() {
        let expr = col("a").add(col("b")).mul(col("c"));
        assert_eq!(expr.to_sql(), r#"("a" + "b") * "c""#);
    }

    #[test]
    fn test_right_operand_same_tier_parenthesized() {
        let left_nested = col("a").sub(col("b")).sub(col("c"));
        assert_eq!(left_nested.to_sql(), r#""a" - "b" - "c""#);
        let right_nested = col("a").sub(col("b").sub(col("c")));
        assert_eq!(right_nested.to_sql(), r#""a" - ("b" - "c")"#);
    }

    #[test]
    fn test_and_or_nesting() {
        let expr = col("a").eq(1).or(col("b").eq(2)).and(col("c").eq(3));
        assert_eq!(expr.to_sql(), r#"("a" = 1 OR "b" = 2) AND "c" = 3"#);
        let expr = col("a").eq(1).or(col("b").eq(2).and(col("c").eq(3)));
        assert_eq!(expr.to_sql(), r#""a" = 1 OR "b" = 2 AND "c" = 3"#);
    }

    #[test]
    fn test_not() {
        assert_eq!(col("a").eq(1).not().to_sql(), r#"NOT "a" = 1"#);
        assert_eq!(col("a").or(col("b")).not().to_sql(), r#"NOT ("a" OR "b")"#);
    }

    #[test]
    fn test_negation_never_emits_comment() {
        assert_eq!(lit(-1).neg().to_sql(), "-(-1)");
        assert_eq!(col("a").neg().neg().to_sql(), r#"-(-"a")"#);
        assert_eq!(col("a").sub(-1).to_sql(), r#""a" - -1"#);
    }

    #[test]
    fn test_negative_literal_binds_as_unary() {
        let expr = Expr::from(-2).mul(col("x"));
        assert_eq!(expr.to_sql(), r#"-2 * "x""#);
    }

    #[test]
    fn test_collate_operand() {
        let expr = col("a").concat(col("b")).collate("NOCASE");
        assert_eq!(expr.to_sql(), r#"("a" || "b") COLLATE "NOCASE""#);
    }

    #[test]
    fn test_escape_operand_binds_at_comparison() {
        // SQLite reads `'x' LIKE 'x' ESCAPE 2 < 1` as `ESCAPE (2 < 1)`.
        let expr = lit("x").like("x").escape(lit(2).lt(1)).unwrap();
        assert_eq!(expr.to_sql(), "'x' LIKE 'x' ESCAPE 2 < 1");
        let expr = lit("x").like("x").escape(lit(1).eq(1)).unwrap();
        assert_eq!(expr.to_sql(), "'x' LIKE 'x' ESCAPE (1 = 1)");
        let expr = lit("x").like("x").escape(lit("a").like("b")).unwrap();
        assert_eq!(expr.to_sql(), "'x' LIKE 'x' ESCAPE ('a' LIKE 'b')");
    }

    #[test]
    fn test_like_escape_and_between() {
        let expr = col("name").not_like("a\\%%").escape("\\").unwrap();
        assert_eq!(expr.to_sql(), r#""name" NOT LIKE 'a\%%' ESCAPE '\'"#);
        let expr = col("n").between(col("a").add(1), 10);
        assert_eq!(expr.to_sql(), r#""n" BETWEEN "a" + 1 AND 10"#);
        let expr = col("n").between(col("a").and(col("b")), 10);
        assert_eq!(expr.to_sql(), r#""n" BETWEEN ("a" AND "b") AND 10"#);
    }

    #[test]
    fn test_in_list_and_null_tests() {
        let expr = col("id").in_list([1, 2, 3]).and(col("x").is_not_null());
        assert_eq!(expr.to_sql(), r#""id" IN (1, 2, 3) AND "x" IS NOT NULL"#);
        assert_eq!(col("x").notnull().to_sql(), r#""x" NOTNULL"#);
    }

    #[test]
    fn test_function_forms() {
        assert_eq!(count_star().to_sql(), "COUNT(*)");
        assert_eq!(
            crate::builder::count_distinct(col("a")).to_sql(),
            r#"COUNT(DISTINCT "a")"#
        );
        assert_eq!(
            crate::builder::func("my_fn", [lit(1), lit("x")]).to_sql(),
            r#""my_fn"(1, 'x')"#
        );
    }

    #[test]
    fn test_raise() {
        assert_eq!(Expr::Raise(RaiseAction::Ignore).to_sql(), "RAISE(IGNORE)");
        assert_eq!(
            Expr::Raise(RaiseAction::Abort(String::from("it's bad"))).to_sql(),
            "RAISE(ABORT, 'it''s bad')"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(Expr::from(Literal::Null).to_sql(), "NULL");
        assert_eq!(lit("C:/'file1'.db").to_sql(), "'C:/''file1''.db'");
        assert_eq!(Expr::from(Literal::CurrentTimestamp).to_sql(), "CURRENT_TIMESTAMP");
    }

    #[test]
    fn test_cast_and_json_extract() {
        assert_eq!(col("a").cast("INTEGER").to_sql(), r#"CAST("a" AS INTEGER)"#);
        assert_eq!(
            col("doc").extract_text("$.name").eq("x").to_sql(),
            r#""doc" ->> '$.name' = 'x'"#
        );
    }
}
