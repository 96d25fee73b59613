//! FROM-clause table expressions.

use super::expression::{ColumnRef, Expr, Qualifier};
use super::ident::QualifiedName;
use super::select::{ResultColumn, SelectStatement};

/// An index hint on a named table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexHint {
    /// `INDEXED BY "index"`.
    IndexedBy(String),
    /// `NOT INDEXED`.
    NotIndexed,
}

/// A named table with optional alias and index hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// The table name.
    pub name: QualifiedName,
    /// Alias.
    pub alias: Option<String>,
    /// Index hint.
    pub hint: Option<IndexHint>,
}

impl TableRef {
    /// Creates a reference to a table.
    #[must_use]
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            hint: None,
        }
    }

    /// Sets the alias. Column references made afterwards through
    /// [`TableRef::col`] resolve against the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds `INDEXED BY`, replacing any previous hint.
    #[must_use]
    pub fn indexed_by(mut self, index: impl Into<String>) -> Self {
        self.hint = Some(IndexHint::IndexedBy(index.into()));
        self
    }

    /// Adds `NOT INDEXED`, replacing any previous hint.
    #[must_use]
    pub fn not_indexed(mut self) -> Self {
        self.hint = Some(IndexHint::NotIndexed);
        self
    }

    /// Returns the name column references should be qualified with.
    #[must_use]
    pub fn qualifier(&self) -> QualifiedName {
        self.alias
            .as_ref()
            .map_or_else(|| self.name.clone(), |alias| QualifiedName::new(alias.clone()))
    }

    /// Creates a column reference qualified by this table's alias, or by
    /// its name when no alias was given.
    #[must_use]
    pub fn col(&self, column: impl Into<String>) -> Expr {
        Expr::Column(ColumnRef {
            qualifier: Some(Qualifier::Table(self.qualifier())),
            column: column.into(),
        })
    }

    /// Creates a `"table".*` result column.
    #[must_use]
    pub fn star(&self) -> ResultColumn {
        ResultColumn::TableStar(self.alias.clone().unwrap_or_else(|| self.name.name.clone()))
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, &str)> for TableRef {
    fn from(name: (&str, &str)) -> Self {
        Self::new(name)
    }
}

impl From<QualifiedName> for TableRef {
    fn from(name: QualifiedName) -> Self {
        Self::new(name)
    }
}

/// The kind of a join operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// `,`.
    Comma,
    /// `JOIN`.
    Plain,
    /// `INNER JOIN`.
    Inner,
    /// `CROSS JOIN`.
    Cross,
    /// `LEFT JOIN`.
    Left,
    /// `LEFT OUTER JOIN`.
    LeftOuter,
    /// `RIGHT JOIN`.
    Right,
    /// `RIGHT OUTER JOIN`.
    RightOuter,
    /// `FULL JOIN`.
    Full,
    /// `FULL OUTER JOIN`.
    FullOuter,
}

impl JoinKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Plain => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Left => "LEFT JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::Right => "RIGHT JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::Full => "FULL JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
        }
    }
}

/// A join operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinOperator {
    /// Whether NATURAL was specified.
    pub natural: bool,
    /// The join kind; never `Comma` or `Cross` when natural.
    pub kind: JoinKind,
}

/// A join constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    /// `ON expr`.
    On(Expr),
    /// `USING (cols)`, never empty.
    Using(Vec<String>),
}

/// A join of two table expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Left operand.
    pub left: TableExpr,
    /// Operator.
    pub operator: JoinOperator,
    /// Right operand.
    pub right: TableExpr,
    /// Constraint; always `None` for natural joins.
    pub constraint: Option<JoinConstraint>,
}

/// A FROM-clause tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TableExpr {
    /// A named table.
    Table(TableRef),
    /// A parenthesized subquery.
    Subquery {
        /// The subquery.
        select: Box<SelectStatement>,
        /// Alias.
        alias: Option<String>,
    },
    /// A table-valued function call.
    Function {
        /// Function name.
        name: QualifiedName,
        /// Arguments.
        args: Vec<Expr>,
        /// Alias.
        alias: Option<String>,
    },
    /// A join.
    Join(Box<Join>),
}

impl From<TableRef> for TableExpr {
    fn from(table: TableRef) -> Self {
        Self::Table(table)
    }
}

impl From<&str> for TableExpr {
    fn from(name: &str) -> Self {
        Self::Table(TableRef::new(name))
    }
}

impl From<(&str, &str)> for TableExpr {
    fn from(name: (&str, &str)) -> Self {
        Self::Table(TableRef::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_kind() {
        assert_eq!(JoinKind::Inner.as_str(), "INNER JOIN");
        assert_eq!(JoinKind::LeftOuter.as_str(), "LEFT OUTER JOIN");
        assert_eq!(JoinKind::Comma.as_str(), ",");
    }

    #[test]
    fn test_alias_drives_qualifier() {
        let table = TableRef::new(("main", "Employees"));
        assert_eq!(table.qualifier(), QualifiedName::with_schema("main", "Employees"));
        let aliased = table.alias("e");
        assert_eq!(aliased.qualifier(), QualifiedName::new("e"));
        assert_eq!(aliased.star(), ResultColumn::TableStar(String::from("e")));
    }

    #[test]
    fn test_hint_replaced() {
        let table = TableRef::new("t").indexed_by("i").not_indexed();
        assert_eq!(table.hint, Some(IndexHint::NotIndexed));
    }
}
