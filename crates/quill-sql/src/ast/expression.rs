//! Expression AST types and the operator precedence table.

use super::ident::QualifiedName;
use super::literal::Literal;
use super::select::{ResultColumn, SelectStatement};
use crate::error::{Error, Result};

/// Operator binding strength, loosest first.
///
/// A child expression is parenthesized when its precedence is lower than the
/// precedence its parent requires at that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Position that accepts any expression (list items, clause bodies).
    Lowest,
    /// `OR`.
    Or,
    /// `AND`.
    And,
    /// Prefix `NOT`.
    Not,
    /// `=`, `!=`, `IS`, `IN`, `LIKE`, `BETWEEN`, null tests.
    Equality,
    /// `<`, `<=`, `>`, `>=`.
    Comparison,
    /// `&`, `|`, `<<`, `>>`.
    Bitwise,
    /// `+`, `-`.
    Additive,
    /// `*`, `/`, `%`.
    Multiplicative,
    /// `||`, `->`, `->>`.
    Concat,
    /// Postfix `COLLATE`.
    Collate,
    /// Prefix `-`, `+`, `~`.
    Unary,
    /// Literals, column references, calls and parenthesized forms.
    Primary,
}

impl Precedence {
    /// Returns the next tighter tier.
    #[must_use]
    pub const fn tighter(self) -> Self {
        match self {
            Self::Lowest => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Not,
            Self::Not => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Bitwise,
            Self::Bitwise => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Concat,
            Self::Concat => Self::Collate,
            Self::Collate => Self::Unary,
            Self::Unary | Self::Primary => Self::Primary,
        }
    }
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `op op a` groups as `op (op a)`.
    Right,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Equality
    Eq,
    NotEq,
    Is,
    IsNot,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Bitwise
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String and JSON
    Concat,
    Extract,
    ExtractText,
}

impl BinaryOp {
    const TABLE: [(Self, &'static str, Precedence); 22] = [
        (Self::Or, "OR", Precedence::Or),
        (Self::And, "AND", Precedence::And),
        (Self::Eq, "=", Precedence::Equality),
        (Self::NotEq, "!=", Precedence::Equality),
        (Self::Is, "IS", Precedence::Equality),
        (Self::IsNot, "IS NOT", Precedence::Equality),
        (Self::Lt, "<", Precedence::Comparison),
        (Self::LtEq, "<=", Precedence::Comparison),
        (Self::Gt, ">", Precedence::Comparison),
        (Self::GtEq, ">=", Precedence::Comparison),
        (Self::BitAnd, "&", Precedence::Bitwise),
        (Self::BitOr, "|", Precedence::Bitwise),
        (Self::LeftShift, "<<", Precedence::Bitwise),
        (Self::RightShift, ">>", Precedence::Bitwise),
        (Self::Add, "+", Precedence::Additive),
        (Self::Sub, "-", Precedence::Additive),
        (Self::Mul, "*", Precedence::Multiplicative),
        (Self::Div, "/", Precedence::Multiplicative),
        (Self::Mod, "%", Precedence::Multiplicative),
        (Self::Concat, "||", Precedence::Concat),
        (Self::Extract, "->", Precedence::Concat),
        (Self::ExtractText, "->>", Precedence::Concat),
    ];

    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        Self::TABLE[*self as usize].1
    }

    /// Returns the precedence tier of the operator.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        Self::TABLE[*self as usize].2
    }

    /// Every binary operator in SQLite is left-associative.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        Associativity::Left
    }

    /// Looks an operator up by its SQL symbol (`"=="` and `"<>"` are
    /// accepted as aliases).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] if the symbol has no entry in
    /// the precedence table.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        let symbol = match symbol {
            "==" => "=",
            "<>" => "!=",
            other => other,
        };
        Self::TABLE
            .iter()
            .find(|(_, sql, _)| sql.eq_ignore_ascii_case(symbol))
            .map(|(op, _, _)| *op)
            .ok_or_else(|| {
                Error::InvariantViolation(format!("operator `{symbol}` has no precedence tier"))
            })
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation (`-`).
    Neg,
    /// Unary plus (`+`).
    Plus,
    /// Bitwise NOT (`~`).
    BitNot,
    /// Logical `NOT`.
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
            Self::Not => "NOT",
        }
    }

    /// Returns the precedence tier of the operator.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::Not => Precedence::Not,
            Self::Neg | Self::Plus | Self::BitNot => Precedence::Unary,
        }
    }

    /// Prefix operators nest to the right.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        Associativity::Right
    }
}

/// Postfix null tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    /// `IS NULL`.
    IsNull,
    /// `IS NOT NULL`.
    IsNotNull,
    /// `ISNULL`.
    Isnull,
    /// `NOTNULL`.
    Notnull,
    /// `NOT NULL`.
    NotNull,
}

impl PostfixOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::Isnull => "ISNULL",
            Self::Notnull => "NOTNULL",
            Self::NotNull => "NOT NULL",
        }
    }
}

/// Pattern matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeOp {
    /// `LIKE`.
    Like,
    /// `GLOB`.
    Glob,
    /// `MATCH`.
    Match,
    /// `REGEXP`.
    Regexp,
}

impl LikeOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
            Self::Match => "MATCH",
            Self::Regexp => "REGEXP",
        }
    }
}

/// What a column reference is qualified by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// A table name or alias, optionally schema-qualified.
    Table(QualifiedName),
    /// The `NEW` pseudo-table of a trigger.
    New,
    /// The `OLD` pseudo-table of a trigger.
    Old,
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Optional qualifier.
    pub qualifier: Option<Qualifier>,
    /// Column name.
    pub column: String,
}

/// The name of a called function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionName {
    /// A built-in function, rendered bare.
    Builtin(&'static str),
    /// An application-defined function, rendered quoted.
    Named(String),
}

/// Function call arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `*`, as in `COUNT(*)`.
    Star,
    /// A (possibly empty) argument list.
    List(Vec<Expr>),
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: FunctionName,
    /// The arguments.
    pub args: FunctionArgs,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// The action of a `RAISE` expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RaiseAction {
    /// `RAISE(IGNORE)`.
    Ignore,
    /// `RAISE(ROLLBACK, msg)`.
    Rollback(String),
    /// `RAISE(ABORT, msg)`.
    Abort(String),
    /// `RAISE(FAIL, msg)`.
    Fail(String),
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column(ColumnRef),

    /// A prefix expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A postfix null test.
    Postfix {
        /// Operand.
        operand: Box<Expr>,
        /// Operator.
        op: PostfixOp,
    },

    /// `expr COLLATE name`.
    Collate {
        /// The collated expression.
        expr: Box<Expr>,
        /// Collation name.
        collation: String,
    },

    /// `expr [NOT] LIKE pattern [ESCAPE escape]` and friends.
    Like {
        /// The matched expression.
        expr: Box<Expr>,
        /// Operator.
        op: LikeOp,
        /// Whether NOT was specified.
        negated: bool,
        /// The pattern.
        pattern: Box<Expr>,
        /// Optional escape character.
        escape: Option<Box<Expr>>,
    },

    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        /// The tested expression.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether NOT was specified.
        negated: bool,
    },

    /// `expr [NOT] IN (list)`.
    InList {
        /// The tested expression.
        expr: Box<Expr>,
        /// The candidate values.
        list: Vec<Expr>,
        /// Whether NOT was specified.
        negated: bool,
    },

    /// `expr [NOT] IN (select)`.
    InSelect {
        /// The tested expression.
        expr: Box<Expr>,
        /// The subquery.
        select: Box<SelectStatement>,
        /// Whether NOT was specified.
        negated: bool,
    },

    /// `[NOT] EXISTS (select)`.
    Exists {
        /// The subquery.
        select: Box<SelectStatement>,
        /// Whether NOT was specified.
        negated: bool,
    },

    /// A scalar subquery.
    Subquery(Box<SelectStatement>),

    /// A function call.
    Function(FunctionCall),

    /// `CASE [operand] WHEN .. THEN .. [ELSE ..] END`.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN pairs, never empty.
        when_then: Vec<(Expr, Expr)>,
        /// ELSE branch.
        else_result: Option<Box<Expr>>,
    },

    /// `CAST(expr AS type)`.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type name.
        type_name: String,
    },

    /// A row value `(a, b, ...)`.
    Row(Vec<Expr>),

    /// `RAISE(...)`, only valid inside trigger bodies.
    Raise(RaiseAction),
}

impl Expr {
    /// Returns the precedence tier of this expression's outermost operator.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Literal(lit) if lit.is_negative_number() => Precedence::Unary,
            Self::Unary { op, .. } => op.precedence(),
            Self::Binary { op, .. } => op.precedence(),
            Self::Postfix { .. }
            | Self::Like { .. }
            | Self::Between { .. }
            | Self::InList { .. }
            | Self::InSelect { .. } => Precedence::Equality,
            Self::Collate { .. } => Precedence::Collate,
            Self::Exists { negated: true, .. } => Precedence::Not,
            Self::Literal(_)
            | Self::Column(_)
            | Self::Exists { .. }
            | Self::Subquery(_)
            | Self::Function(_)
            | Self::Case { .. }
            | Self::Cast { .. }
            | Self::Row(_)
            | Self::Raise(_) => Precedence::Primary,
        }
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: impl Into<Self>) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right.into()),
        }
    }

    /// Creates a prefix expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: impl Into<Self>) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand.into()),
        }
    }

    fn postfix(self, op: PostfixOp) -> Self {
        Self::Postfix {
            operand: Box::new(self),
            op,
        }
    }

    fn pattern(self, op: LikeOp, negated: bool, pattern: impl Into<Self>) -> Self {
        Self::Like {
            expr: Box::new(self),
            op,
            negated,
            pattern: Box::new(pattern.into()),
            escape: None,
        }
    }

    /// Creates an `=` expression.
    #[must_use]
    pub fn eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates a `!=` expression.
    #[must_use]
    pub fn not_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::NotEq, right)
    }

    /// Creates an `IS` expression.
    #[must_use]
    pub fn is(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Is, right)
    }

    /// Creates an `IS NOT` expression.
    #[must_use]
    pub fn is_not(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::IsNot, right)
    }

    /// Creates a `<` expression.
    #[must_use]
    pub fn lt(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Lt, right)
    }

    /// Creates a `<=` expression.
    #[must_use]
    pub fn lt_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::LtEq, right)
    }

    /// Creates a `>` expression.
    #[must_use]
    pub fn gt(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates a `>=` expression.
    #[must_use]
    pub fn gt_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::GtEq, right)
    }

    /// Creates an `AND` expression.
    #[must_use]
    pub fn and(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an `OR` expression.
    #[must_use]
    pub fn or(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a `+` expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Add, right)
    }

    /// Creates a `-` expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Sub, right)
    }

    /// Creates a `*` expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Mul, right)
    }

    /// Creates a `/` expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn div(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Div, right)
    }

    /// Creates a `%` expression.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn rem(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Mod, right)
    }

    /// Creates a `||` expression.
    #[must_use]
    pub fn concat(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Concat, right)
    }

    /// Creates a `->` JSON extraction.
    #[must_use]
    pub fn extract(self, path: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Extract, path)
    }

    /// Creates a `->>` JSON extraction.
    #[must_use]
    pub fn extract_text(self, path: impl Into<Self>) -> Self {
        self.binary(BinaryOp::ExtractText, path)
    }

    /// Creates a `&` expression.
    #[must_use]
    pub fn bit_and(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::BitAnd, right)
    }

    /// Creates a `|` expression.
    #[must_use]
    pub fn bit_or(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::BitOr, right)
    }

    /// Creates a `<<` expression.
    #[must_use]
    pub fn shl(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::LeftShift, right)
    }

    /// Creates a `>>` expression.
    #[must_use]
    pub fn shr(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::RightShift, right)
    }

    /// Negates the expression with `NOT`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    /// Negates the expression arithmetically.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        Self::unary(UnaryOp::Neg, self)
    }

    /// Applies bitwise `~`.
    #[must_use]
    pub fn bit_not(self) -> Self {
        Self::unary(UnaryOp::BitNot, self)
    }

    /// Creates an `IS NULL` expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        self.postfix(PostfixOp::IsNull)
    }

    /// Creates an `IS NOT NULL` expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        self.postfix(PostfixOp::IsNotNull)
    }

    /// Creates an `ISNULL` expression.
    #[must_use]
    pub fn isnull(self) -> Self {
        self.postfix(PostfixOp::Isnull)
    }

    /// Creates a `NOTNULL` expression.
    #[must_use]
    pub fn notnull(self) -> Self {
        self.postfix(PostfixOp::Notnull)
    }

    /// Creates a `LIKE` expression.
    #[must_use]
    pub fn like(self, pattern: impl Into<Self>) -> Self {
        self.pattern(LikeOp::Like, false, pattern)
    }

    /// Creates a `NOT LIKE` expression.
    #[must_use]
    pub fn not_like(self, pattern: impl Into<Self>) -> Self {
        self.pattern(LikeOp::Like, true, pattern)
    }

    /// Creates a `GLOB` expression.
    #[must_use]
    pub fn glob(self, pattern: impl Into<Self>) -> Self {
        self.pattern(LikeOp::Glob, false, pattern)
    }

    /// Creates a `NOT GLOB` expression.
    #[must_use]
    pub fn not_glob(self, pattern: impl Into<Self>) -> Self {
        self.pattern(LikeOp::Glob, true, pattern)
    }

    /// Creates a `MATCH` expression.
    #[must_use]
    pub fn matches(self, pattern: impl Into<Self>) -> Self {
        self.pattern(LikeOp::Match, false, pattern)
    }

    /// Creates a `REGEXP` expression.
    #[must_use]
    pub fn regexp(self, pattern: impl Into<Self>) -> Self {
        self.pattern(LikeOp::Regexp, false, pattern)
    }

    /// Adds an `ESCAPE` character to a `LIKE`-family expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] when the expression is not a
    /// pattern match or already has an escape.
    pub fn escape(self, escape: impl Into<Self>) -> Result<Self> {
        match self {
            Self::Like {
                expr,
                op,
                negated,
                pattern,
                escape: None,
            } => Ok(Self::Like {
                expr,
                op,
                negated,
                pattern,
                escape: Some(Box::new(escape.into())),
            }),
            Self::Like { .. } => Err(Error::state("ESCAPE", "escape character already set")),
            _ => Err(Error::state(
                "ESCAPE",
                "only LIKE, GLOB, MATCH and REGEXP take an escape",
            )),
        }
    }

    /// Creates a `BETWEEN` expression.
    #[must_use]
    pub fn between(self, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        }
    }

    /// Creates a `NOT BETWEEN` expression.
    #[must_use]
    pub fn not_between(self, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: true,
        }
    }

    /// Creates an `IN (list)` expression.
    #[must_use]
    pub fn in_list<I, T>(self, list: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::InList {
            expr: Box::new(self),
            list: list.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// Creates a `NOT IN (list)` expression.
    #[must_use]
    pub fn not_in_list<I, T>(self, list: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::InList {
            expr: Box::new(self),
            list: list.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// Creates an `IN (select)` expression.
    #[must_use]
    pub fn in_select(self, select: impl Into<SelectStatement>) -> Self {
        Self::InSelect {
            expr: Box::new(self),
            select: Box::new(select.into()),
            negated: false,
        }
    }

    /// Creates a `NOT IN (select)` expression.
    #[must_use]
    pub fn not_in_select(self, select: impl Into<SelectStatement>) -> Self {
        Self::InSelect {
            expr: Box::new(self),
            select: Box::new(select.into()),
            negated: true,
        }
    }

    /// Attaches a `COLLATE` suffix.
    #[must_use]
    pub fn collate(self, collation: impl Into<String>) -> Self {
        Self::Collate {
            expr: Box::new(self),
            collation: collation.into(),
        }
    }

    /// Creates a `CAST(expr AS type)` expression.
    #[must_use]
    pub fn cast(self, type_name: impl Into<String>) -> Self {
        Self::Cast {
            expr: Box::new(self),
            type_name: type_name.into(),
        }
    }

    /// Turns the expression into an aliased result column.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> ResultColumn {
        ResultColumn::Expr {
            expr: self,
            alias: Some(alias.into()),
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl From<ColumnRef> for Expr {
    fn from(value: ColumnRef) -> Self {
        Self::Column(value)
    }
}

impl From<SelectStatement> for Expr {
    fn from(value: SelectStatement) -> Self {
        Self::Subquery(Box::new(value))
    }
}

macro_rules! literal_expr {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Self::Literal(Literal::from(value))
                }
            }
        )*
    };
}

literal_expr!(bool, i8, i16, i32, i64, u8, u16, u32, &str, String, Vec<u8>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_precedence() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::Eq.precedence());
        assert!(BinaryOp::Concat.precedence() > BinaryOp::Mul.precedence());
    }

    #[test]
    fn test_table_is_indexed_by_discriminant() {
        for (op, sql, tier) in BinaryOp::TABLE {
            assert_eq!(op.as_str(), sql);
            assert_eq!(op.precedence(), tier);
        }
    }

    #[test]
    fn test_from_symbol() {
        assert_eq!(BinaryOp::from_symbol("*").unwrap(), BinaryOp::Mul);
        assert_eq!(BinaryOp::from_symbol("==").unwrap(), BinaryOp::Eq);
        assert_eq!(BinaryOp::from_symbol("<>").unwrap(), BinaryOp::NotEq);
        assert_eq!(BinaryOp::from_symbol("and").unwrap(), BinaryOp::And);
        assert!(matches!(
            BinaryOp::from_symbol("**"),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_negative_literal_is_unary_tier() {
        assert_eq!(Expr::from(-1).precedence(), Precedence::Unary);
        assert_eq!(Expr::from(1).precedence(), Precedence::Primary);
    }

    #[test]
    fn test_escape_requires_pattern() {
        let like = Expr::from("a%").like("b");
        assert!(like.clone().escape("\\").is_ok());
        assert!(like.escape("\\").unwrap().escape("!").is_err());
        assert!(Expr::from(1).escape("\\").is_err());
    }
}
