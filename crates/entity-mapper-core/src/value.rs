// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generic database values.
//!
//! [`Value`] is the boxed representation every mapped field passes through on
//! its way to a command parameter or from a result column. [`ValueKind`] names
//! the non-null variants and is what a [`RowAccessor`](crate::RowAccessor) is
//! asked to read.
//!
//! # Field Types
//!
//! | Rust type | Kind | Nullable |
//! |-----------|------|----------|
//! | `bool` | `Bool` | no |
//! | `i16` / `i32` / `i64` | `I16` / `I32` / `I64` | no |
//! | `u8` / `u16` / `u32` | `I16` / `I32` / `I64` | no |
//! | `f32` / `f64` | `F32` / `F64` | no |
//! | `String` | `Text` | no |
//! | `Vec<u8>` | `Bytes` | no |
//! | `uuid::Uuid` | `Uuid` | no |
//! | `chrono::NaiveDateTime` | `Timestamp` | no |
//! | `chrono::DateTime<Utc>` | `TimestampTz` | no |
//! | `Option<T>` | kind of `T` | yes |
//!
//! Unsigned integers are stored in the next wider signed kind and checked on
//! the way back. `Uuid` needs the `uuid` feature, the date-time kinds need
//! `chrono`.

use std::fmt;

use crate::error::ConversionError;

/// A single database value, or the null marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Database null.
    #[default]
    Null,

    /// Boolean.
    Bool(bool),

    /// 16-bit integer.
    I16(i16),

    /// 32-bit integer.
    I32(i32),

    /// 64-bit integer.
    I64(i64),

    /// Single precision float.
    F32(f32),

    /// Double precision float.
    F64(f64),

    /// Text.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// UUID.
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),

    /// Date and time without a time zone.
    #[cfg(feature = "chrono")]
    Timestamp(chrono::NaiveDateTime),

    /// Instant in UTC.
    #[cfg(feature = "chrono")]
    TimestampTz(chrono::DateTime<chrono::Utc>)
}

/// Kind of a non-null [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `bool`.
    Bool,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    Text,
    /// `Vec<u8>`.
    Bytes,
    /// `uuid::Uuid`.
    #[cfg(feature = "uuid")]
    Uuid,
    /// `chrono::NaiveDateTime`.
    #[cfg(feature = "chrono")]
    Timestamp,
    /// `chrono::DateTime<Utc>`.
    #[cfg(feature = "chrono")]
    TimestampTz
}

impl ValueKind {
    /// Check if this kind is an integer or floating point number.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I16 | Self::I32 | Self::I64 | Self::F32 | Self::F64
        )
    }

    /// Check if a text column can be bridged into this kind by parsing.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Text | Self::Bytes)
    }

    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Text => "text",
            Self::Bytes => "bytes",
            #[cfg(feature = "uuid")]
            Self::Uuid => "uuid",
            #[cfg(feature = "chrono")]
            Self::Timestamp => "timestamp",
            #[cfg(feature = "chrono")]
            Self::TimestampTz => "timestamptz"
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Check if this is the null marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Kind of this value, `None` for null.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::I16(_) => Some(ValueKind::I16),
            Self::I32(_) => Some(ValueKind::I32),
            Self::I64(_) => Some(ValueKind::I64),
            Self::F32(_) => Some(ValueKind::F32),
            Self::F64(_) => Some(ValueKind::F64),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Bytes(_) => Some(ValueKind::Bytes),
            #[cfg(feature = "uuid")]
            Self::Uuid(_) => Some(ValueKind::Uuid),
            #[cfg(feature = "chrono")]
            Self::Timestamp(_) => Some(ValueKind::Timestamp),
            #[cfg(feature = "chrono")]
            Self::TimestampTz(_) => Some(ValueKind::TimestampTz)
        }
    }

    /// Human readable kind name, `"null"` for null.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("null", |kind| kind.name())
    }

    /// Borrow the text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None
        }
    }

    /// Widen any integer variant to `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I16(v) => Some(*v as i64),
            Self::I32(v) => Some(*v as i64),
            Self::I64(v) => Some(*v),
            _ => None
        }
    }

    /// Convert between numeric representations.
    ///
    /// Row accessors use this to hand back a value of the requested kind when
    /// the driver stores numbers with a different width (SQLite keeps every
    /// integer as `i64`). Integer narrowing is checked. Text, bytes and null
    /// are returned unchanged: text is parsed later by the
    /// [`coerce`](crate::convert::coerce) bridge.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when a number does not fit the requested
    /// kind, or when a number is requested as bytes or bool from a float.
    pub fn cast(self, kind: ValueKind) -> Result<Self, ConversionError> {
        if self.kind() == Some(kind) {
            return Ok(self);
        }

        match (self, kind) {
            (value @ (Self::Null | Self::Text(_)), _) => Ok(value),
            (Self::Bool(b), ValueKind::I16) => Ok(Self::I16(b.into())),
            (Self::Bool(b), ValueKind::I32) => Ok(Self::I32(b.into())),
            (Self::Bool(b), ValueKind::I64) => Ok(Self::I64(b.into())),
            (value, ValueKind::Bool) if value.as_i64().is_some() => {
                Ok(Self::Bool(value.as_i64() != Some(0)))
            }
            (value, ValueKind::I16) if value.as_i64().is_some() => {
                narrow(&value, kind).map(Self::I16)
            }
            (value, ValueKind::I32) if value.as_i64().is_some() => {
                narrow(&value, kind).map(Self::I32)
            }
            (value, ValueKind::I64) if value.as_i64().is_some() => {
                Ok(Self::I64(value.as_i64().unwrap_or_default()))
            }
            (value, ValueKind::F64) if value.as_i64().is_some() => {
                Ok(Self::F64(value.as_i64().unwrap_or_default() as f64))
            }
            (value, ValueKind::F32) if value.as_i64().is_some() => {
                Ok(Self::F32(value.as_i64().unwrap_or_default() as f32))
            }
            (Self::F32(v), ValueKind::F64) => Ok(Self::F64(v.into())),
            (Self::F64(v), ValueKind::F32) => Ok(Self::F32(v as f32)),
            #[cfg(feature = "uuid")]
            (Self::Bytes(bytes), ValueKind::Uuid) if bytes.len() == 16 => {
                uuid::Uuid::from_slice(&bytes)
                    .map(Self::Uuid)
                    .map_err(|_| ConversionError::Mismatch {
                        expected: kind,
                        found:    "bytes"
                    })
            }
            #[cfg(feature = "chrono")]
            (Self::Timestamp(v), ValueKind::TimestampTz) => Ok(Self::TimestampTz(v.and_utc())),
            #[cfg(feature = "chrono")]
            (Self::TimestampTz(v), ValueKind::Timestamp) => Ok(Self::Timestamp(v.naive_utc())),
            (value, kind) => Err(ConversionError::mismatch(kind, &value))
        }
    }
}

fn narrow<T: TryFrom<i64>>(value: &Value, kind: ValueKind) -> Result<T, ConversionError> {
    let wide = value.as_i64().unwrap_or_default();
    T::try_from(wide).map_err(|_| ConversionError::out_of_range(kind, wide))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            #[cfg(feature = "uuid")]
            Self::Uuid(v) => write!(f, "{v}"),
            #[cfg(feature = "chrono")]
            Self::Timestamp(v) => write!(f, "{v}"),
            #[cfg(feature = "chrono")]
            Self::TimestampTz(v) => write!(f, "{v}")
        }
    }
}

/// Conversion of a field value into a generic [`Value`].
///
/// Implemented for every supported field type. `#[derive(Entity)]` calls it
/// from the generated getter of each field.
pub trait ToValue {
    /// Box the value.
    fn to_value(&self) -> Value;
}

/// Conversion of a generic [`Value`] back into a field value.
///
/// Implementations are strict: the value must already be of [`Self::KIND`].
/// Coercion from text happens before this is called.
pub trait FromValue: Sized {
    /// Underlying kind read from the row for this field.
    const KIND: ValueKind;

    /// Whether the field accepts null (`Option<T>`).
    const NULLABLE: bool = false;

    /// Unbox the value.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if the value is of a different kind.
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

macro_rules! scalar_value {
    ($ty:ty, $variant:ident) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl FromValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ConversionError::mismatch(Self::KIND, &other))
                }
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    };
}

scalar_value!(bool, Bool);
scalar_value!(i16, I16);
scalar_value!(i32, I32);
scalar_value!(i64, I64);
scalar_value!(f32, F32);
scalar_value!(f64, F64);
scalar_value!(String, Text);
scalar_value!(Vec<u8>, Bytes);
#[cfg(feature = "uuid")]
scalar_value!(uuid::Uuid, Uuid);
#[cfg(feature = "chrono")]
scalar_value!(chrono::NaiveDateTime, Timestamp);
#[cfg(feature = "chrono")]
scalar_value!(chrono::DateTime<chrono::Utc>, TimestampTz);

macro_rules! unsigned_value {
    ($ty:ty, $variant:ident, $wide:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$variant(<$wide>::from(*self))
            }
        }

        impl FromValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::$variant(v) => <$ty>::try_from(v).map_err(|_| {
                        ConversionError::UnsignedOutOfRange {
                            target: stringify!($ty),
                            value:  v.into()
                        }
                    }),
                    other => Err(ConversionError::mismatch(Self::KIND, &other))
                }
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                value.to_value()
            }
        }
    };
}

unsigned_value!(u8, I16, i16);
unsigned_value!(u16, I32, i32);
unsigned_value!(u32, I64, i64);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_unwraps_to_underlying_kind() {
        assert_eq!(<Option<i32> as FromValue>::KIND, ValueKind::I32);
        assert!(<Option<i32> as FromValue>::NULLABLE);
        assert!(!<i32 as FromValue>::NULLABLE);
    }

    #[test]
    fn none_boxes_to_null() {
        let v: Option<String> = None;
        assert_eq!(v.to_value(), Value::Null);
        assert_eq!(Some(7_i64).to_value(), Value::I64(7));
    }

    #[test]
    fn strict_from_value() {
        assert_eq!(i32::from_value(Value::I32(3)).unwrap(), 3);
        assert!(i32::from_value(Value::I64(3)).is_err());
        assert!(i32::from_value(Value::Text("3".into())).is_err());
        assert_eq!(Option::<i32>::from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn cast_narrows_with_check() {
        assert_eq!(Value::I64(5).cast(ValueKind::I32).unwrap(), Value::I32(5));
        assert!(Value::I64(i64::MAX).cast(ValueKind::I32).is_err());
        assert_eq!(Value::I64(0).cast(ValueKind::Bool).unwrap(), Value::Bool(false));
        assert_eq!(Value::I32(2).cast(ValueKind::F64).unwrap(), Value::F64(2.0));
    }

    #[test]
    fn cast_leaves_text_and_null() {
        let text = Value::Text("12".into());
        assert_eq!(text.clone().cast(ValueKind::I32).unwrap(), text);
        assert_eq!(Value::Null.cast(ValueKind::I32).unwrap(), Value::Null);
    }

    #[test]
    fn cast_rejects_float_to_int() {
        assert!(Value::F64(1.5).cast(ValueKind::I32).is_err());
        assert!(Value::Bytes(vec![1]).cast(ValueKind::Text).is_err());
    }

    #[test]
    fn unsigned_fields_widen_and_check() {
        assert_eq!(200_u8.to_value(), Value::I16(200));
        assert_eq!(<u16 as FromValue>::KIND, ValueKind::I32);
        assert_eq!(u32::MAX.to_value(), Value::I64(4_294_967_295));
        assert_eq!(u8::from_value(Value::I16(255)).unwrap(), 255);

        let err = u8::from_value(Value::I16(300)).unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnsignedOutOfRange {
                target: "u8",
                value:  300
            }
        );
        assert!(u32::from_value(Value::I64(-1)).is_err());
        assert!(u16::from_value(Value::I64(1)).is_err());
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuid_from_sixteen_bytes() {
        let id = uuid::Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let cast = Value::Bytes(id.as_bytes().to_vec()).cast(ValueKind::Uuid).unwrap();
        assert_eq!(cast, Value::Uuid(id));
        assert!(Value::Bytes(vec![1, 2]).cast(ValueKind::Uuid).is_err());
        assert_eq!(uuid::Uuid::from_value(Value::Uuid(id)).unwrap(), id);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn timestamps_switch_zone_awareness() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .unwrap();
        let utc = naive.and_utc();
        assert_eq!(
            Value::Timestamp(naive).cast(ValueKind::TimestampTz).unwrap(),
            Value::TimestampTz(utc)
        );
        assert_eq!(
            Value::TimestampTz(utc).cast(ValueKind::Timestamp).unwrap(),
            Value::Timestamp(naive)
        );
        assert!(Value::I64(0).cast(ValueKind::Timestamp).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Text("a".into()).to_string(), "\"a\"");
        assert_eq!(Value::Bytes(vec![1, 2]).to_string(), "<2 bytes>");
    }
}
