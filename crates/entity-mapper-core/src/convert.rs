// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Text-to-scalar bridge.
//!
//! Some drivers hand back numeric or boolean columns as text. Before a value
//! reaches a field setter the inbound converter passes it through [`coerce`],
//! which parses text into the field's kind:
//!
//! | Target | Accepted text |
//! |--------|---------------|
//! | `i16` / `i32` / `i64` | optional sign and decimal digits |
//! | `f32` / `f64` | anything [`str::parse`] accepts for floats |
//! | `bool` | `true` / `false`, any ASCII case |
//! | `Uuid` | hyphenated, simple, braced or URN form |
//! | `Timestamp` | `YYYY-MM-DD HH:MM:SS[.f]`, `T` separator allowed |
//! | `TimestampTz` | RFC 3339, or a `Timestamp` form taken as UTC |
//!
//! Surrounding whitespace is ignored. Every other combination passes through
//! untouched; compatibility is then the row accessor's responsibility.

use std::str::FromStr;

use crate::{
    error::ConversionError,
    value::{Value, ValueKind}
};

/// Bridge a text value into a scalar kind.
///
/// # Errors
///
/// [`ConversionError::Unparsable`] if the text is not a valid `kind`.
///
/// # Example
///
/// ```rust
/// use entity_mapper_core::{Value, ValueKind, convert::coerce};
///
/// let v = coerce(Value::Text(" 42 ".into()), ValueKind::I32).unwrap();
/// assert_eq!(v, Value::I32(42));
///
/// let v = coerce(Value::Text("TRUE".into()), ValueKind::Bool).unwrap();
/// assert_eq!(v, Value::Bool(true));
/// ```
pub fn coerce(value: Value, kind: ValueKind) -> Result<Value, ConversionError> {
    match value {
        Value::Text(text) if kind.is_scalar() => parse_text(&text, kind),
        other => Ok(other)
    }
}

/// Parse text as the given scalar kind.
///
/// # Errors
///
/// [`ConversionError::Unparsable`] on malformed text, or when `kind` is not
/// a scalar kind.
pub fn parse_text(text: &str, kind: ValueKind) -> Result<Value, ConversionError> {
    let trimmed = text.trim();

    match kind {
        ValueKind::Bool => parse_bool(trimmed).map(Value::Bool),
        ValueKind::I16 => parse(trimmed, kind).map(Value::I16),
        ValueKind::I32 => parse(trimmed, kind).map(Value::I32),
        ValueKind::I64 => parse(trimmed, kind).map(Value::I64),
        ValueKind::F32 => parse(trimmed, kind).map(Value::F32),
        ValueKind::F64 => parse(trimmed, kind).map(Value::F64),
        #[cfg(feature = "uuid")]
        ValueKind::Uuid => parse(trimmed, kind).map(Value::Uuid),
        #[cfg(feature = "chrono")]
        ValueKind::Timestamp => parse_timestamp(trimmed)
            .map(Value::Timestamp)
            .ok_or_else(|| ConversionError::unparsable(kind, text)),
        #[cfg(feature = "chrono")]
        ValueKind::TimestampTz => chrono::DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .ok()
            .or_else(|| parse_timestamp(trimmed).map(|naive| naive.and_utc()))
            .map(Value::TimestampTz)
            .ok_or_else(|| ConversionError::unparsable(kind, text)),
        ValueKind::Text | ValueKind::Bytes => Err(ConversionError::unparsable(kind, text))
    }
}

fn parse<T: FromStr>(text: &str, kind: ValueKind) -> Result<T, ConversionError> {
    text.parse()
        .map_err(|_| ConversionError::unparsable(kind, text))
}

#[cfg(feature = "chrono")]
fn parse_timestamp(text: &str) -> Option<chrono::NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .into_iter()
        .find_map(|format| chrono::NaiveDateTime::parse_from_str(text, format).ok())
}

fn parse_bool(text: &str) -> Result<bool, ConversionError> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConversionError::unparsable(ValueKind::Bool, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_owned())
    }

    #[test]
    fn integers() {
        assert_eq!(coerce(text("-7"), ValueKind::I16).unwrap(), Value::I16(-7));
        assert_eq!(coerce(text("+30"), ValueKind::I32).unwrap(), Value::I32(30));
        assert_eq!(
            coerce(text("9000000000"), ValueKind::I64).unwrap(),
            Value::I64(9_000_000_000)
        );
    }

    #[test]
    fn floats() {
        assert_eq!(coerce(text("1.5"), ValueKind::F64).unwrap(), Value::F64(1.5));
        assert_eq!(coerce(text("2"), ValueKind::F32).unwrap(), Value::F32(2.0));
    }

    #[test]
    fn booleans() {
        assert_eq!(coerce(text("False"), ValueKind::Bool).unwrap(), Value::Bool(false));
        assert_eq!(coerce(text(" true\n"), ValueKind::Bool).unwrap(), Value::Bool(true));
        assert!(coerce(text("1"), ValueKind::Bool).is_err());
        assert!(coerce(text("yes"), ValueKind::Bool).is_err());
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuids() {
        let id = uuid::Uuid::from_u128(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8);
        for form in [
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "67e5504410b1426f9247bb680e5fe0c8",
            " {67e55044-10b1-426f-9247-bb680e5fe0c8} "
        ] {
            assert_eq!(coerce(text(form), ValueKind::Uuid).unwrap(), Value::Uuid(id));
        }
        assert!(coerce(text("67e55044"), ValueKind::Uuid).is_err());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn timestamps() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_milli_opt(8, 15, 0, 250))
            .unwrap();
        assert_eq!(
            coerce(text("2024-03-01 08:15:00.250"), ValueKind::Timestamp).unwrap(),
            Value::Timestamp(naive)
        );
        assert_eq!(
            coerce(text("2024-03-01T08:15:00.25"), ValueKind::Timestamp).unwrap(),
            Value::Timestamp(naive)
        );
        assert_eq!(
            coerce(text("2024-03-01T10:15:00.25+02:00"), ValueKind::TimestampTz).unwrap(),
            Value::TimestampTz(naive.and_utc())
        );
        assert_eq!(
            coerce(text("2024-03-01 08:15:00.250"), ValueKind::TimestampTz).unwrap(),
            Value::TimestampTz(naive.and_utc())
        );
        assert!(coerce(text("2024-03-01"), ValueKind::Timestamp).is_err());
    }

    #[test]
    fn malformed_text_fails() {
        let err = coerce(text("abc"), ValueKind::I32).unwrap_err();
        assert_eq!(err, ConversionError::unparsable(ValueKind::I32, "abc"));
        assert!(coerce(text("70000"), ValueKind::I16).is_err());
        assert!(coerce(text(""), ValueKind::F64).is_err());
    }

    #[test]
    fn text_fields_pass_through() {
        assert_eq!(coerce(text("abc"), ValueKind::Text).unwrap(), text("abc"));
    }

    #[test]
    fn non_text_passes_through() {
        assert_eq!(coerce(Value::I64(3), ValueKind::I32).unwrap(), Value::I64(3));
        assert_eq!(coerce(Value::Null, ValueKind::I32).unwrap(), Value::Null);
    }
}
