//! DELETE statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::select::{Limited, Offset, Ordered};
use super::{and_where, Build};
use crate::ast::{
    DeleteStatement, Expr, OrderingTerm, ResultColumn, Statement, TableRef, WithClause,
};
use crate::error::Result;

/// Marker: WHERE and RETURNING may still be added.
pub struct Filtering;

/// A DELETE statement builder.
///
/// ORDER BY is only buildable once a LIMIT follows it, and OFFSET only
/// after LIMIT.
pub struct Delete<S> {
    statement: DeleteStatement,
    _state: PhantomData<S>,
}

/// Starts `DELETE FROM table`.
#[must_use]
pub fn delete_from(table: impl Into<TableRef>) -> Delete<Filtering> {
    Delete {
        statement: DeleteStatement {
            with: None,
            table: table.into(),
            where_clause: None,
            returning: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        },
        _state: PhantomData,
    }
}

impl<S> Delete<S> {
    fn into_state<T>(self) -> Delete<T> {
        Delete {
            statement: self.statement,
            _state: PhantomData,
        }
    }

    pub(crate) fn with_prefix(mut self, with: WithClause) -> Self {
        self.statement.with = Some(with);
        self
    }
}

impl Delete<Filtering> {
    /// Adds a WHERE condition; repeated calls are combined with AND.
    #[must_use]
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        and_where(&mut self.statement.where_clause, condition.into());
        self
    }

    /// Appends RETURNING columns.
    #[must_use]
    pub fn returning<I, T>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ResultColumn>,
    {
        self.statement
            .returning
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds ORDER BY; a LIMIT must follow.
    #[must_use]
    pub fn order_by<I, T>(mut self, terms: I) -> Delete<Ordered>
    where
        I: IntoIterator<Item = T>,
        T: Into<OrderingTerm>,
    {
        self.statement
            .order_by
            .extend(terms.into_iter().map(Into::into));
        self.into_state()
    }

    /// Adds LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Expr>) -> Delete<Limited> {
        self.statement.limit = Some(limit.into());
        self.into_state()
    }
}

impl Delete<Ordered> {
    /// Adds LIMIT.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Expr>) -> Delete<Limited> {
        self.statement.limit = Some(limit.into());
        self.into_state()
    }
}

impl Delete<Limited> {
    /// Adds OFFSET.
    #[must_use]
    pub fn offset(mut self, offset: impl Into<Expr>) -> Delete<Offset> {
        self.statement.offset = Some(offset.into());
        self.into_state()
    }
}

macro_rules! buildable {
    ($($state:ty),*) => {
        $(
            impl Build for Delete<$state> {
                fn finish(self) -> Result<Statement> {
                    Ok(Statement::Delete(self.statement))
                }
            }
        )*
    };
}

buildable!(Filtering, Limited, Offset);
