//! Identifier quoting and schema-qualified names.

use core::fmt;

/// Quotes an identifier with double quotes, doubling embedded quotes.
///
/// ```rust
/// use quill_sql::ast::quote_identifier;
///
/// assert_eq!(quote_identifier("users"), "\"users\"");
/// assert_eq!(quote_identifier("A \"useful\" index"), "\"A \"\"useful\"\" index\"");
/// ```
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Schema name (`main`, `temp`, or an attached database).
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl QualifiedName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Returns whether a schema was supplied.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.schema.is_some()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", quote_identifier(schema))?;
        }
        f.write_str(&quote_identifier(&self.name))
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, &str)> for QualifiedName {
    fn from((schema, name): (&str, &str)) -> Self {
        Self::with_schema(schema, name)
    }
}

impl From<(String, String)> for QualifiedName {
    fn from((schema, name): (String, String)) -> Self {
        Self::with_schema(schema, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote_identifier("Table1"), "\"Table1\"");
        assert_eq!(quote_identifier(""), "\"\"");
    }

    #[test]
    fn test_quote_embedded_quotes() {
        assert_eq!(
            quote_identifier("A \"useful\" index"),
            "\"A \"\"useful\"\" index\""
        );
        assert_eq!(quote_identifier("it's"), "\"it's\"");
    }

    #[test]
    fn test_qualified_display() {
        assert_eq!(QualifiedName::from("X").to_string(), "\"X\"");
        assert_eq!(QualifiedName::from(("temp", "X")).to_string(), "\"temp\".\"X\"");
        assert!(QualifiedName::from(("main", "t")).is_qualified());
        assert!(!QualifiedName::from("t").is_qualified());
    }
}
