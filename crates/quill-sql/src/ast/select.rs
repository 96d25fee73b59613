//! SELECT statement AST types.

use super::expression::Expr;
use super::table::TableExpr;

/// Order direction for ORDER BY and indexed columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTerm {
    /// The expression to order by.
    pub expr: Expr,
    /// Optional collation.
    pub collation: Option<String>,
    /// Optional direction; SQLite defaults to ascending.
    pub direction: Option<OrderDirection>,
    /// Optional null ordering.
    pub nulls: Option<NullOrdering>,
}

impl OrderingTerm {
    /// Sets the collation.
    #[must_use]
    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Orders ascending.
    #[must_use]
    pub fn asc(mut self) -> Self {
        self.direction = Some(OrderDirection::Asc);
        self
    }

    /// Orders descending.
    #[must_use]
    pub fn desc(mut self) -> Self {
        self.direction = Some(OrderDirection::Desc);
        self
    }

    /// Places NULLs first.
    #[must_use]
    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullOrdering::First);
        self
    }

    /// Places NULLs last.
    #[must_use]
    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullOrdering::Last);
        self
    }
}

impl From<Expr> for OrderingTerm {
    fn from(expr: Expr) -> Self {
        Self {
            expr,
            collation: None,
            direction: None,
            nulls: None,
        }
    }
}

/// A column in the result list of a SELECT core.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultColumn {
    /// `*`.
    Star,
    /// `"table".*`.
    TableStar(String),
    /// An expression with an optional alias.
    Expr {
        /// The expression.
        expr: Expr,
        /// Alias.
        alias: Option<String>,
    },
}

impl From<Expr> for ResultColumn {
    fn from(expr: Expr) -> Self {
        Self::Expr {
            expr,
            alias: None,
        }
    }
}

/// Set operators joining SELECT cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundOperator {
    /// `UNION`.
    Union,
    /// `UNION ALL`.
    UnionAll,
    /// `INTERSECT`.
    Intersect,
    /// `EXCEPT`.
    Except,
}

impl CompoundOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ...` core.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectCore {
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Result columns; empty renders as `*`.
    pub columns: Vec<ResultColumn>,
    /// FROM clause.
    pub from: Option<TableExpr>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
}

/// One operand of a compound select.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectBody {
    /// A SELECT core.
    Select(SelectCore),
    /// A `VALUES (..), (..)` list; rows are non-empty and of equal width.
    Values(Vec<Vec<Expr>>),
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// The CTE name.
    pub name: String,
    /// Optional explicit column names.
    pub columns: Vec<String>,
    /// `MATERIALIZED` (`Some(true)`) or `NOT MATERIALIZED` (`Some(false)`).
    pub materialized: Option<bool>,
    /// The CTE body.
    pub select: SelectStatement,
}

/// A `WITH [RECURSIVE]` prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    /// Whether RECURSIVE was specified.
    pub recursive: bool,
    /// CTEs in declaration order, never empty.
    pub ctes: Vec<Cte>,
}

/// A complete, possibly compound, SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// WITH prefix.
    pub with: Option<WithClause>,
    /// The first core.
    pub body: SelectBody,
    /// Subsequent cores with the operator preceding each.
    pub compounds: Vec<(CompoundOperator, SelectBody)>,
    /// ORDER BY terms, binding to the whole compound.
    pub order_by: Vec<OrderingTerm>,
    /// LIMIT expression.
    pub limit: Option<Expr>,
    /// OFFSET expression; only present with a limit.
    pub offset: Option<Expr>,
}

impl SelectStatement {
    /// Creates a statement with a single body and no trailing clauses.
    #[must_use]
    pub const fn from_body(body: SelectBody) -> Self {
        Self {
            with: None,
            body,
            compounds: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Returns whether this is a compound select.
    #[must_use]
    pub fn is_compound(&self) -> bool {
        !self.compounds.is_empty()
    }

    /// Iterates over all cores in declaration order.
    pub fn bodies(&self) -> impl Iterator<Item = &SelectBody> {
        core::iter::once(&self.body).chain(self.compounds.iter().map(|(_, body)| body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction() {
        assert_eq!(OrderDirection::Asc.as_str(), "ASC");
        assert_eq!(OrderDirection::Desc.as_str(), "DESC");
    }

    #[test]
    fn test_compound_operator() {
        assert_eq!(CompoundOperator::UnionAll.as_str(), "UNION ALL");
        assert_eq!(CompoundOperator::Except.as_str(), "EXCEPT");
    }

    #[test]
    fn test_bodies_in_order() {
        let mut stmt = SelectStatement::from_body(SelectBody::Values(vec![vec![Expr::from(1)]]));
        stmt.compounds.push((
            CompoundOperator::Union,
            SelectBody::Values(vec![vec![Expr::from(2)]]),
        ));
        assert!(stmt.is_compound());
        assert_eq!(stmt.bodies().count(), 2);
    }
}
