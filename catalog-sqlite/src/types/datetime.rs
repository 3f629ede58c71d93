//! DateTime type for the release dates stored in the catalog.
//!
//! This module provides a [`DateTime`] type that represents UTC timestamps with
//! nanosecond precision. It wraps `time::PrimitiveDateTime`, serializes as
//! RFC3339, and is stored in SQLite as fixed-width text.

use std::{borrow::Borrow, fmt::Display};
use time::format_description::{BorrowedFormatItem, well_known::Rfc3339};
use time::macros::format_description;

/// Every stored value has the same width, so text order is chronological order.
const STORAGE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// A UTC datetime with subsecond precision.
///
/// Range filters compare stored values of this type directly in SQL, which is
/// only sound because of the fixed-width storage encoding.
///
/// # Examples
///
/// ```
/// # use catalog_sqlite::types::DateTime;
/// # use time::macros::datetime;
/// let released = DateTime::from(datetime!(1993-11-09 00:00 UTC));
/// assert_eq!(released.to_string(), "1993-11-09T00:00:00Z");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "DateTimeDto", into = "DateTimeDto")]
pub struct DateTime(time::PrimitiveDateTime);

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: time::OffsetDateTime = (*self).into();
        let text = value.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

impl sqlx::Type<sqlx::Sqlite> for DateTime {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for DateTime {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0.format(STORAGE_FORMAT)?, args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for DateTime {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let string = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(Self(time::PrimitiveDateTime::parse(string, STORAGE_FORMAT)?))
    }
}

// This is a helper type that ensures (de)serialization happens with respect to RFC3339

#[derive(serde::Serialize, serde::Deserialize)]
struct DateTimeDto(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<DateTimeDto> for DateTime {
    fn from(value: DateTimeDto) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for DateTimeDto {
    fn from(value: DateTime) -> Self {
        DateTimeDto(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}
