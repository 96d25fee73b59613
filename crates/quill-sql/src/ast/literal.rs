//! Literal values and their SQLite text encoding.

use core::fmt::Write;

use crate::error::{Error, Result};

/// A literal value rendered inline into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `NULL`.
    Null,
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// A 64-bit integer.
    Integer(i64),
    /// A finite binary floating point number.
    Real(FiniteReal),
    /// An exact decimal, rendered verbatim.
    Decimal(Numeral),
    /// A text value.
    Text(String),
    /// A blob value.
    Blob(Vec<u8>),
    /// `CURRENT_TIME`.
    CurrentTime,
    /// `CURRENT_DATE`.
    CurrentDate,
    /// `CURRENT_TIMESTAMP`.
    CurrentTimestamp,
}

/// A finite `f64`. NaN and the infinities have no SQLite literal form.
///
/// The field is private, so a [`Literal::Real`] always holds a checked value:
///
/// ```compile_fail
/// use quill_sql::ast::{FiniteReal, Literal};
/// let nan = Literal::Real(FiniteReal(f64::NAN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteReal(f64);

impl FiniteReal {
    /// Wraps `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] for NaN and infinities.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::unsupported(format!(
                "non-finite real {value} has no literal form"
            )))
        }
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// The text of a decimal numeral: an optionally signed mantissa with an
/// optional fraction and exponent, e.g. `12.50`, `-3`, `1.5e-3`.
///
/// ```compile_fail
/// use quill_sql::ast::{Literal, Numeral};
/// let raw = Literal::Decimal(Numeral(String::from("abc")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeral(String);

impl Numeral {
    /// Validates `text` as a numeral.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] if the text is not a numeral.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if is_numeral(&text) {
            Ok(Self(text))
        } else {
            Err(Error::unsupported(format!("'{text}' is not a decimal numeral")))
        }
    }

    /// Returns the numeral text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Literal {
    /// Creates a real literal, rejecting NaN and infinities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] for non-finite values, which have
    /// no SQLite literal form.
    pub fn real(value: f64) -> Result<Self> {
        FiniteReal::new(value).map(Self::Real)
    }

    /// Creates an exact decimal literal from its text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] if the text is not a numeral.
    pub fn decimal(text: impl Into<String>) -> Result<Self> {
        Numeral::new(text).map(Self::Decimal)
    }

    /// Creates a text literal.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a blob literal.
    #[must_use]
    pub fn blob(value: impl Into<Vec<u8>>) -> Self {
        Self::Blob(value.into())
    }

    /// Returns whether the rendered form starts with a minus sign.
    #[must_use]
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Integer(n) => *n < 0,
            Self::Real(f) => f.get().is_sign_negative(),
            Self::Decimal(text) => text.as_str().starts_with('-'),
            _ => false,
        }
    }

    /// Returns the SQL text of the literal.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Boolean(true) => String::from("TRUE"),
            Self::Boolean(false) => String::from("FALSE"),
            Self::Integer(n) => n.to_string(),
            // Debug keeps a fraction or exponent, so the value reads back as REAL.
            Self::Real(f) => format!("{:?}", f.get()),
            Self::Decimal(text) => text.as_str().to_owned(),
            Self::Text(s) => escape_text(s),
            Self::Blob(bytes) => {
                let mut sql = String::with_capacity(bytes.len() * 2 + 3);
                sql.push_str("X'");
                for byte in bytes {
                    let _ = write!(sql, "{byte:02X}");
                }
                sql.push('\'');
                sql
            }
            Self::CurrentTime => String::from("CURRENT_TIME"),
            Self::CurrentDate => String::from("CURRENT_DATE"),
            Self::CurrentTimestamp => String::from("CURRENT_TIMESTAMP"),
        }
    }
}

/// Quotes a text value with single quotes, doubling embedded quotes.
#[must_use]
pub fn escape_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn is_numeral(text: &str) -> bool {
    let body = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok = !(int_part.is_empty() && frac_part.is_empty())
        && all_digits(int_part)
        && all_digits(frac_part);
    let exponent_ok = exponent.map_or(true, |exp| {
        let digits = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        !digits.is_empty() && all_digits(digits)
    });
    mantissa_ok && exponent_ok
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! integer_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_literal!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for Literal {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        i64::try_from(value)
            .map(Self::Integer)
            .map_err(|_| Error::unsupported(format!("{value} does not fit a 64-bit signed integer")))
    }
}

impl TryFrom<f64> for Literal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::real(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Literal {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl From<&[u8]> for Literal {
    fn from(value: &[u8]) -> Self {
        Self::Blob(value.to_vec())
    }
}

impl<T: Into<Self>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(feature = "json")]
impl TryFrom<serde_json::Value> for Literal {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Boolean(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if n.is_u64() {
                    Err(Error::unsupported(format!(
                        "JSON number {n} does not fit a 64-bit signed integer"
                    )))
                } else {
                    n.as_f64()
                        .ok_or_else(|| Error::unsupported(format!("JSON number {n}")))
                        .and_then(Self::real)
                }
            }
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(_) => Err(Error::unsupported("JSON array has no literal form")),
            Value::Object(_) => Err(Error::unsupported("JSON object has no literal form")),
        }
    }
}

#[cfg(feature = "chrono")]
mod temporal {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

    use super::Literal;

    // Formats match what SQLite's date and time functions accept.

    impl From<NaiveDate> for Literal {
        fn from(value: NaiveDate) -> Self {
            Self::Text(value.format("%Y-%m-%d").to_string())
        }
    }

    impl From<NaiveTime> for Literal {
        fn from(value: NaiveTime) -> Self {
            Self::Text(value.format("%H:%M:%S%.f").to_string())
        }
    }

    impl From<NaiveDateTime> for Literal {
        fn from(value: NaiveDateTime) -> Self {
            Self::Text(value.format("%Y-%m-%d %H:%M:%S%.f").to_string())
        }
    }

    impl From<DateTime<Utc>> for Literal {
        fn from(value: DateTime<Utc>) -> Self {
            Self::from(value.naive_utc())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(Literal::Null.to_sql(), "NULL");
        assert_eq!(Literal::from(true).to_sql(), "TRUE");
        assert_eq!(Literal::from(false).to_sql(), "FALSE");
        assert_eq!(Literal::from(42).to_sql(), "42");
        assert_eq!(Literal::from(-100_i64).to_sql(), "-100");
        assert_eq!(Literal::CurrentTimestamp.to_sql(), "CURRENT_TIMESTAMP");
        assert_eq!(Literal::CurrentDate.to_sql(), "CURRENT_DATE");
        assert_eq!(Literal::CurrentTime.to_sql(), "CURRENT_TIME");
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(Literal::from("hello").to_sql(), "'hello'");
        assert_eq!(
            Literal::from("C:/'file1'.db").to_sql(),
            "'C:/''file1''.db'"
        );
        assert_eq!(Literal::from("").to_sql(), "''");
    }

    #[test]
    fn test_blob_uppercase_hex() {
        assert_eq!(
            Literal::blob(vec![0x48, 0x45, 0x4C, 0x4C, 0x4F]).to_sql(),
            "X'48454C4C4F'"
        );
        assert_eq!(Literal::blob(vec![0xab, 0x0f]).to_sql(), "X'AB0F'");
        assert_eq!(Literal::blob(Vec::new()).to_sql(), "X''");
    }

    #[test]
    fn test_real_formatting() {
        assert_eq!(Literal::real(12.333_333_333).unwrap().to_sql(), "12.333333333");
        assert_eq!(Literal::real(12.0).unwrap().to_sql(), "12.0");
        assert_eq!(Literal::real(0.1).unwrap().to_sql(), "0.1");
        assert_eq!(Literal::real(-2.5).unwrap().to_sql(), "-2.5");
        assert_eq!(Literal::real(1e300).unwrap().to_sql(), "1e300");
    }

    #[test]
    fn test_non_finite_real_rejected() {
        assert!(matches!(
            Literal::real(f64::NAN),
            Err(Error::UnsupportedValue(_))
        ));
        assert!(Literal::try_from(f64::INFINITY).is_err());
        assert!(matches!(
            FiniteReal::new(f64::NEG_INFINITY),
            Err(Error::UnsupportedValue(_))
        ));
        assert_eq!(Literal::Real(FiniteReal::new(-0.5).unwrap()).to_sql(), "-0.5");
    }

    #[test]
    fn test_decimal_verbatim() {
        assert_eq!(Literal::decimal("12.50").unwrap().to_sql(), "12.50");
        assert_eq!(Literal::decimal("-0.000").unwrap().to_sql(), "-0.000");
        assert_eq!(Literal::decimal("1.5e-3").unwrap().to_sql(), "1.5e-3");
        assert_eq!(Literal::decimal(".5").unwrap().to_sql(), ".5");
        assert!(Literal::decimal("12,5").is_err());
        assert!(Literal::decimal("").is_err());
        assert!(Literal::decimal("1e").is_err());
        assert!(Literal::decimal("abc").is_err());
        assert!(matches!(
            Numeral::new("1; DROP TABLE t"),
            Err(Error::UnsupportedValue(_))
        ));
        assert_eq!(Numeral::new("+7").unwrap().as_str(), "+7");
    }

    #[test]
    fn test_u64_overflow() {
        assert_eq!(Literal::try_from(7_u64).unwrap(), Literal::Integer(7));
        assert!(Literal::try_from(u64::MAX).is_err());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Literal::from(None::<i32>), Literal::Null);
        assert_eq!(Literal::from(Some("x")), Literal::Text(String::from("x")));
    }

    #[test]
    fn test_negative_detection() {
        assert!(Literal::from(-1).is_negative_number());
        assert!(Literal::real(-0.5).unwrap().is_negative_number());
        assert!(!Literal::from(1).is_negative_number());
        assert!(!Literal::from("-1").is_negative_number());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_values() {
        use serde_json::json;

        assert_eq!(Literal::try_from(json!(null)).unwrap(), Literal::Null);
        assert_eq!(Literal::try_from(json!(3)).unwrap(), Literal::Integer(3));
        assert_eq!(Literal::try_from(json!(1.5)).unwrap().to_sql(), "1.5");
        assert_eq!(
            Literal::try_from(json!("a'b")).unwrap().to_sql(),
            "'a''b'"
        );
        assert!(matches!(
            Literal::try_from(json!([1, 2])),
            Err(Error::UnsupportedValue(_))
        ));
        assert!(matches!(
            Literal::try_from(json!({"a": 1})),
            Err(Error::UnsupportedValue(_))
        ));
        assert!(Literal::try_from(json!(u64::MAX)).is_err());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono_values() {
        use chrono::{NaiveDate, NaiveTime};

        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(Literal::from(date).to_sql(), "'2024-01-31'");
        let time = NaiveTime::from_hms_opt(12, 30, 5).unwrap();
        assert_eq!(Literal::from(time).to_sql(), "'12:30:05'");
        assert_eq!(
            Literal::from(date.and_time(time)).to_sql(),
            "'2024-01-31 12:30:05'"
        );
    }
}
