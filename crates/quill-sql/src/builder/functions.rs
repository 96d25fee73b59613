//! Built-in SQLite functions and calls to application-defined functions.

use crate::ast::{Expr, FunctionArgs, FunctionCall, FunctionName};

fn builtin(name: &'static str, args: Vec<Expr>) -> Expr {
    Expr::Function(FunctionCall {
        name: FunctionName::Builtin(name),
        args: FunctionArgs::List(args),
        distinct: false,
    })
}

fn collect<I, T>(args: I) -> Vec<Expr>
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    args.into_iter().map(Into::into).collect()
}

/// Calls an application-defined function; the name is quoted.
#[must_use]
pub fn func<I, T>(name: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::Function(FunctionCall {
        name: FunctionName::Named(name.into()),
        args: FunctionArgs::List(collect(args)),
        distinct: false,
    })
}

/// `COUNT(*)`.
#[must_use]
pub const fn count_star() -> Expr {
    Expr::Function(FunctionCall {
        name: FunctionName::Builtin("COUNT"),
        args: FunctionArgs::Star,
        distinct: false,
    })
}

/// `COUNT(DISTINCT x)`.
#[must_use]
pub fn count_distinct(x: impl Into<Expr>) -> Expr {
    Expr::Function(FunctionCall {
        name: FunctionName::Builtin("COUNT"),
        args: FunctionArgs::List(vec![x.into()]),
        distinct: true,
    })
}

macro_rules! fixed_arity {
    ($($(#[$doc:meta])* $name:ident => $sql:literal ($($arg:ident),*);)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name($($arg: impl Into<Expr>),*) -> Expr {
                builtin($sql, vec![$($arg.into()),*])
            }
        )*
    };
}

macro_rules! variadic {
    ($($(#[$doc:meta])* $name:ident => $sql:literal;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name<I, T>(args: I) -> Expr
            where
                I: IntoIterator<Item = T>,
                T: Into<Expr>,
            {
                builtin($sql, collect(args))
            }
        )*
    };
}

fixed_arity! {
    /// `ABS(x)`.
    abs => "ABS"(x);
    /// `LENGTH(x)`.
    length => "LENGTH"(x);
    /// `LOWER(x)`.
    lower => "LOWER"(x);
    /// `UPPER(x)`.
    upper => "UPPER"(x);
    /// `HEX(x)`.
    hex => "HEX"(x);
    /// `QUOTE(x)`.
    quote => "QUOTE"(x);
    /// `TYPEOF(x)`.
    type_of => "TYPEOF"(x);
    /// `TRIM(x)`.
    trim => "TRIM"(x);
    /// `LTRIM(x)`.
    ltrim => "LTRIM"(x);
    /// `RTRIM(x)`.
    rtrim => "RTRIM"(x);
    /// `ROUND(x)`.
    round => "ROUND"(x);
    /// `ROUND(x, digits)`.
    round_to => "ROUND"(x, digits);
    /// `UNICODE(x)`.
    unicode => "UNICODE"(x);
    /// `AVG(x)`.
    avg => "AVG"(x);
    /// `SUM(x)`.
    sum => "SUM"(x);
    /// `TOTAL(x)`.
    total => "TOTAL"(x);
    /// `COUNT(x)`.
    count => "COUNT"(x);
    /// `GROUP_CONCAT(x)`.
    group_concat => "GROUP_CONCAT"(x);
    /// `GROUP_CONCAT(x, separator)`.
    group_concat_sep => "GROUP_CONCAT"(x, separator);
    /// `IFNULL(x, y)`.
    ifnull => "IFNULL"(x, y);
    /// `NULLIF(x, y)`.
    nullif => "NULLIF"(x, y);
    /// `INSTR(haystack, needle)`.
    instr => "INSTR"(haystack, needle);
    /// `SUBSTR(x, start)`.
    substr => "SUBSTR"(x, start);
    /// `SUBSTR(x, start, len)`.
    substr_len => "SUBSTR"(x, start, len);
    /// `REPLACE(x, from, to)`.
    replace => "REPLACE"(x, from, to);
    /// `IIF(cond, then, otherwise)`.
    iif => "IIF"(cond, then, otherwise);
    /// `LIKELY(x)`.
    likely => "LIKELY"(x);
    /// `JSON(x)`.
    json => "JSON"(x);
    /// `JSON_EXTRACT(x, path)`.
    json_extract => "JSON_EXTRACT"(x, path);
    /// `RANDOM()`.
    random => "RANDOM"();
    /// `CHANGES()`.
    changes => "CHANGES"();
    /// `LAST_INSERT_ROWID()`.
    last_insert_rowid => "LAST_INSERT_ROWID"();
}

variadic! {
    /// `COALESCE(x, y, ...)`.
    coalesce => "COALESCE";
    /// Multi-argument scalar `MIN(x, y, ...)`, or the aggregate with one argument.
    min => "MIN";
    /// Multi-argument scalar `MAX(x, y, ...)`, or the aggregate with one argument.
    max => "MAX";
    /// `PRINTF(format, ...)`.
    printf => "PRINTF";
    /// `DATE(time, modifiers...)`.
    date => "DATE";
    /// `TIME(time, modifiers...)`.
    time => "TIME";
    /// `DATETIME(time, modifiers...)`.
    datetime => "DATETIME";
    /// `JULIANDAY(time, modifiers...)`.
    julianday => "JULIANDAY";
    /// `STRFTIME(format, time, modifiers...)`.
    strftime => "STRFTIME";
    /// `JSON_ARRAY(...)`.
    json_array => "JSON_ARRAY";
    /// `JSON_OBJECT(label, value, ...)`.
    json_object => "JSON_OBJECT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lit};
    use crate::render::ToSql;

    #[test]
    fn test_builtin_names_are_bare() {
        assert_eq!(length(col("message")).to_sql(), r#"LENGTH("message")"#);
        assert_eq!(type_of(col("x")).to_sql(), r#"TYPEOF("x")"#);
        assert_eq!(random().to_sql(), "RANDOM()");
    }

    #[test]
    fn test_variadic() {
        assert_eq!(
            coalesce([col("a"), col("b"), lit(0)]).to_sql(),
            r#"COALESCE("a", "b", 0)"#
        );
        assert_eq!(
            strftime([lit("%Y"), lit("now")]).to_sql(),
            "STRFTIME('%Y', 'now')"
        );
    }

    #[test]
    fn test_named_function_is_quoted() {
        assert_eq!(func("my fn", [col("a")]).to_sql(), r#""my fn"("a")"#);
    }
}
