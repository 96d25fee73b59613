//! CREATE VIEW builder using the typestate pattern.

use std::marker::PhantomData;

use super::Build;
use crate::ast::{CreateViewStatement, QualifiedName, SelectStatement, Statement};
use crate::error::{Error, Result};

// Typestate markers (zero-sized types)

/// Marker: the view has no body yet.
pub struct NoBody;
/// Marker: the AS SELECT body is set.
pub struct HasBody;

/// A CREATE VIEW builder.
pub struct CreateView<S> {
    temporary: bool,
    if_not_exists: bool,
    name: QualifiedName,
    columns: Vec<String>,
    select: Option<SelectStatement>,
    _state: PhantomData<S>,
}

/// Starts `CREATE VIEW name`.
#[must_use]
pub fn create_view(name: impl Into<QualifiedName>) -> CreateView<NoBody> {
    CreateView {
        temporary: false,
        if_not_exists: false,
        name: name.into(),
        columns: Vec::new(),
        select: None,
        _state: PhantomData,
    }
}

impl CreateView<NoBody> {
    /// `CREATE TEMP VIEW`.
    #[must_use]
    pub const fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Names the view's columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionState`] if `columns` is empty.
    pub fn columns<I, C>(mut self, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.columns = super::non_empty("CREATE VIEW", "column list", columns)?;
        Ok(self)
    }

    /// Sets the `AS select` body.
    #[must_use]
    pub fn as_select(self, select: impl Into<SelectStatement>) -> CreateView<HasBody> {
        CreateView {
            temporary: self.temporary,
            if_not_exists: self.if_not_exists,
            name: self.name,
            columns: self.columns,
            select: Some(select.into()),
            _state: PhantomData,
        }
    }
}

impl Build for CreateView<HasBody> {
    fn finish(self) -> Result<Statement> {
        let select = self
            .select
            .ok_or_else(|| Error::state("CREATE VIEW", "a view needs an AS SELECT body"))?;
        Ok(Statement::CreateView(CreateViewStatement {
            temporary: self.temporary,
            if_not_exists: self.if_not_exists,
            name: self.name,
            columns: self.columns,
            select,
        }))
    }
}
