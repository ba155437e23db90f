//! Bound parameter values.
//!
//! [`Value`] is the driver-neutral form of a parameter produced by the query
//! builder and consumed/produced by attribute modifiers.

use crate::error::OrmError;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    /// Whether this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert into a JSON document.
    ///
    /// Bytes become an array of numbers, timestamps use RFC 3339.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => Json::from(*f),
            Value::Text(s) => Json::String(s.clone()),
            Value::Bytes(b) => Json::from(b.clone()),
            Value::Timestamp(ts) => Json::String(ts.to_rfc3339()),
            Value::Uuid(u) => Json::String(u.to_string()),
            Value::Json(j) => j.clone(),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Unsigned widths that may not fit in `BIGINT` convert with a range check.
macro_rules! impl_try_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = OrmError;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    i64::try_from(v).map(Value::Int).map_err(|_| {
                        OrmError::Conversion(format!(
                            "{v} ({}) is out of range for a 64-bit integer parameter",
                            stringify!($t)
                        ))
                    })
                }
            }
        )*
    };
}

impl_try_from_unsigned!(u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v.and_utc())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// Each expression goes through `Value::from`. `u64` and `usize` only have
/// checked `TryFrom` conversions; convert them first:
///
/// ```ignore
/// let params = tagsql::params![1, "active", None::<i64>, Value::try_from(count)?];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

#[cfg(feature = "postgres")]
mod pg {
    use super::Value;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    impl ToSql for Value {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            // Inner encoders reject a mismatched `ty`.
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => v.to_sql_checked(ty, out),
                Value::Int(v) => match *ty {
                    Type::INT2 => i16::try_from(*v)?.to_sql_checked(ty, out),
                    Type::INT4 => i32::try_from(*v)?.to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                Value::Float(v) => match *ty {
                    Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                Value::Text(v) => v.to_sql_checked(ty, out),
                Value::Bytes(v) => v.to_sql_checked(ty, out),
                Value::Timestamp(v) => match *ty {
                    Type::TIMESTAMP => v.naive_utc().to_sql_checked(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                Value::Uuid(v) => v.to_sql_checked(ty, out),
                Value::Json(v) => v.to_sql_checked(ty, out),
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        tokio_postgres::types::to_sql_checked!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_is_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn params_macro_mixes_types() {
        let params = crate::params![1, "active", true];
        assert_eq!(
            params,
            vec![
                Value::Int(1),
                Value::Text("active".into()),
                Value::Bool(true)
            ]
        );
        assert!(crate::params![].is_empty());
    }

    #[test]
    fn unsigned_conversion_is_range_checked() {
        assert_eq!(Value::try_from(42u64).unwrap(), Value::Int(42));
        assert_eq!(Value::try_from(7usize).unwrap(), Value::Int(7));
        assert_eq!(
            Value::try_from(i64::MAX as u64).unwrap(),
            Value::Int(i64::MAX)
        );
        let err = Value::try_from(u64::MAX).unwrap_err();
        assert!(matches!(err, OrmError::Conversion(_)));
        assert!(err.to_string().contains("u64"));

        let params = crate::params![Value::try_from(3u64).unwrap(), "x"];
        assert_eq!(params, vec![Value::Int(3), Value::from("x")]);
    }

    #[test]
    fn to_json_keeps_scalars() {
        assert_eq!(Value::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
        assert_eq!(
            Value::Json(serde_json::json!({"a": 1})).to_json(),
            serde_json::json!({"a": 1})
        );
    }
}

#[cfg(all(test, feature = "postgres"))]
mod pg_tests {
    use super::Value;
    use bytes::BytesMut;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    #[test]
    fn mismatched_column_type_is_rejected() {
        let mut out = BytesMut::new();
        assert!(
            Value::Text("12345678".into())
                .to_sql_checked(&Type::INT8, &mut out)
                .is_err()
        );
        assert!(Value::Int(1).to_sql_checked(&Type::FLOAT8, &mut out).is_err());
        assert!(Value::Bool(true).to_sql_checked(&Type::TEXT, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn matching_column_types_encode() {
        let mut out = BytesMut::new();
        Value::Int(7).to_sql_checked(&Type::INT8, &mut out).unwrap();
        assert_eq!(&out[..], &7i64.to_be_bytes());

        let mut out = BytesMut::new();
        Value::Int(7).to_sql_checked(&Type::INT4, &mut out).unwrap();
        assert_eq!(&out[..], &7i32.to_be_bytes());

        let mut out = BytesMut::new();
        Value::from("abc").to_sql_checked(&Type::TEXT, &mut out).unwrap();
        assert_eq!(&out[..], b"abc");
    }

    #[test]
    fn narrowing_overflow_is_an_error() {
        let mut out = BytesMut::new();
        assert!(
            Value::Int(i64::from(i32::MAX) + 1)
                .to_sql_checked(&Type::INT4, &mut out)
                .is_err()
        );
    }

    #[test]
    fn null_binds_for_any_type() {
        let mut out = BytesMut::new();
        let is_null = Value::Null.to_sql_checked(&Type::INT8, &mut out).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
    }
}
