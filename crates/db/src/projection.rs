//! Schema-agnostic projection of result cursors into JSON-ready rows.
//!
//! [`project`] wraps any Postgres row stream and yields one [`GenericRow`]
//! per row. The column layout (names plus decode kind per column) is resolved
//! from the first row and reused for the rest of the cursor, so no type
//! lookups happen per cell.
//!
//! Decode kinds are chosen by asking each Rust target type whether it accepts
//! the column's `PgTypeInfo`, the same check `try_get` performs. A column is
//! only unsupported when no target accepts it (geometric types, `BYTEA`,
//! multi-range types and the like).
//!
//! The returned stream is lazy and single-pass: polling it advances the
//! underlying cursor. Callers that emit one JSON document should collect it
//! with `try_collect` and discard everything on the first error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use futures::{Stream, StreamExt};
use indexmap::IndexMap;
use moovie_core::types::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::types::PgInterval;
use sqlx::postgres::{PgRow, PgTypeInfo};
use sqlx::{Column, Decode, Postgres, Row, Type, TypeInfo, ValueRef};
use uuid::Uuid;

/// Failure while projecting a cursor. Both variants end the stream for the
/// current request.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// A value in an otherwise delivered row could not be decoded.
    #[error("failed to read column `{column}` ({type_name}): {source}")]
    Read {
        column: String,
        type_name: String,
        #[source]
        source: sqlx::Error,
    },

    /// The cursor itself reported a fault (statement failure, dropped
    /// connection between rows).
    #[error("result cursor failed: {0}")]
    Iteration(#[source] sqlx::Error),
}

/// A dynamically typed column value.
///
/// Serializes untagged, so JSON sees plain `null`, booleans, numbers,
/// strings, arrays and embedded JSON. `Real` goes through `serialize_f32`,
/// which keeps `REAL` columns at single-precision text (`8.8`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    /// `INT2`, `INT4` and `INT8` all widen to `i64`.
    Int(i64),
    Real(f32),
    Double(f64),
    /// `NUMERIC`, written as a JSON number. `NaN` and infinities fail to read.
    Numeric(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(Timestamp),
    Interval(IntervalValue),
    Json(serde_json::Value),
    Uuid(Uuid),
    /// One-dimensional array; `NULL` elements become [`FieldValue::Null`].
    Array(Vec<FieldValue>),
}

/// Postgres `INTERVAL` split the way the server stores it. Months and days
/// have no fixed length, so they are not folded into the microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalValue {
    pub months: i32,
    pub days: i32,
    pub microseconds: i64,
}

impl From<PgInterval> for IntervalValue {
    fn from(interval: PgInterval) -> Self {
        Self {
            months: interval.months,
            days: interval.days,
            microseconds: interval.microseconds,
        }
    }
}

/// Column name to value mapping for one projected row, in result order.
///
/// A repeated column name keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GenericRow(IndexMap<String, FieldValue>);

impl GenericRow {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.0.get(column)
    }

    /// Column names in result order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for GenericRow {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Project a row cursor into a lazy stream of [`GenericRow`]s.
///
/// Row bounds are the query's business; this never stops early on its own.
pub fn project<'a, S>(cursor: S) -> impl Stream<Item = Result<GenericRow, ProjectionError>> + 'a
where
    S: Stream<Item = Result<PgRow, sqlx::Error>> + 'a,
{
    let mut layout: Option<Vec<ColumnSlot>> = None;
    cursor.map(move |next| {
        let row = next.map_err(ProjectionError::Iteration)?;
        let layout = layout.get_or_insert_with(|| column_layout(&row));
        project_row(&row, layout)
    })
}

// ── Decode kinds ─────────────────────────────────────────────────────────

/// Whether decoding a column of type `ty` into `T` would pass sqlx's check.
fn accepts<T: Type<Postgres>>(ty: &PgTypeInfo) -> bool {
    T::compatible(ty)
}

/// How a column's raw bytes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Text,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Json,
    Uuid,
    Array(ElementKind),
    Unsupported,
}

impl ValueKind {
    fn of(ty: &PgTypeInfo) -> Self {
        if accepts::<bool>(ty) {
            Self::Bool
        } else if accepts::<i16>(ty) {
            Self::Int2
        } else if accepts::<i32>(ty) {
            Self::Int4
        } else if accepts::<i64>(ty) {
            Self::Int8
        } else if accepts::<f32>(ty) {
            Self::Float4
        } else if accepts::<f64>(ty) {
            Self::Float8
        } else if accepts::<Decimal>(ty) {
            Self::Numeric
        } else if accepts::<String>(ty) {
            Self::Text
        } else if accepts::<NaiveDate>(ty) {
            Self::Date
        } else if accepts::<NaiveTime>(ty) {
            Self::Time
        } else if accepts::<NaiveDateTime>(ty) {
            Self::Timestamp
        } else if accepts::<Timestamp>(ty) {
            Self::TimestampTz
        } else if accepts::<PgInterval>(ty) {
            Self::Interval
        } else if accepts::<serde_json::Value>(ty) {
            Self::Json
        } else if accepts::<Uuid>(ty) {
            Self::Uuid
        } else if let Some(element) = ElementKind::of_array(ty) {
            Self::Array(element)
        } else {
            Self::Unsupported
        }
    }
}

/// Element decode kind for one-dimensional array columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Text,
    Date,
    Uuid,
}

impl ElementKind {
    fn of_array(ty: &PgTypeInfo) -> Option<Self> {
        let kind = if accepts::<Vec<bool>>(ty) {
            Self::Bool
        } else if accepts::<Vec<i16>>(ty) {
            Self::Int2
        } else if accepts::<Vec<i32>>(ty) {
            Self::Int4
        } else if accepts::<Vec<i64>>(ty) {
            Self::Int8
        } else if accepts::<Vec<f32>>(ty) {
            Self::Float4
        } else if accepts::<Vec<f64>>(ty) {
            Self::Float8
        } else if accepts::<Vec<Decimal>>(ty) {
            Self::Numeric
        } else if accepts::<Vec<String>>(ty) {
            Self::Text
        } else if accepts::<Vec<NaiveDate>>(ty) {
            Self::Date
        } else if accepts::<Vec<Uuid>>(ty) {
            Self::Uuid
        } else {
            return None;
        };
        Some(kind)
    }
}

// ── Row decoding ─────────────────────────────────────────────────────────

#[derive(Debug)]
struct ColumnSlot {
    name: String,
    type_name: String,
    kind: ValueKind,
}

fn column_layout(row: &PgRow) -> Vec<ColumnSlot> {
    let layout: Vec<ColumnSlot> = row
        .columns()
        .iter()
        .map(|column| ColumnSlot {
            name: column.name().to_string(),
            type_name: column.type_info().name().to_string(),
            kind: ValueKind::of(column.type_info()),
        })
        .collect();
    tracing::debug!(columns = layout.len(), "Resolved result column layout");
    layout
}

fn project_row(row: &PgRow, layout: &[ColumnSlot]) -> Result<GenericRow, ProjectionError> {
    layout
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            decode_value(row, index, slot)
                .map(|value| (slot.name.clone(), value))
                .map_err(|source| ProjectionError::Read {
                    column: slot.name.clone(),
                    type_name: slot.type_name.clone(),
                    source,
                })
        })
        .collect()
}

fn decode_value(row: &PgRow, index: usize, slot: &ColumnSlot) -> Result<FieldValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(FieldValue::Null);
    }

    let value = match slot.kind {
        ValueKind::Bool => FieldValue::Bool(row.try_get(index)?),
        ValueKind::Int2 => FieldValue::Int(row.try_get::<i16, _>(index)?.into()),
        ValueKind::Int4 => FieldValue::Int(row.try_get::<i32, _>(index)?.into()),
        ValueKind::Int8 => FieldValue::Int(row.try_get(index)?),
        ValueKind::Float4 => FieldValue::Real(row.try_get(index)?),
        ValueKind::Float8 => FieldValue::Double(row.try_get(index)?),
        ValueKind::Numeric => FieldValue::Numeric(row.try_get(index)?),
        ValueKind::Text => FieldValue::Text(row.try_get(index)?),
        ValueKind::Date => FieldValue::Date(row.try_get(index)?),
        ValueKind::Time => FieldValue::Time(row.try_get(index)?),
        ValueKind::Timestamp => FieldValue::Timestamp(row.try_get(index)?),
        ValueKind::TimestampTz => FieldValue::TimestampTz(row.try_get(index)?),
        ValueKind::Interval => {
            FieldValue::Interval(row.try_get::<PgInterval, _>(index)?.into())
        }
        ValueKind::Json => FieldValue::Json(row.try_get(index)?),
        ValueKind::Uuid => FieldValue::Uuid(row.try_get(index)?),
        ValueKind::Array(element) => decode_array(row, index, element)?,
        ValueKind::Unsupported => {
            return Err(sqlx::Error::ColumnDecode {
                index: slot.name.clone(),
                source: format!("unsupported column type {}", slot.type_name).into(),
            })
        }
    };
    Ok(value)
}

fn decode_array(
    row: &PgRow,
    index: usize,
    element: ElementKind,
) -> Result<FieldValue, sqlx::Error> {
    match element {
        ElementKind::Bool => decode_elements(row, index, FieldValue::Bool),
        ElementKind::Int2 => decode_elements(row, index, |v: i16| FieldValue::Int(v.into())),
        ElementKind::Int4 => decode_elements(row, index, |v: i32| FieldValue::Int(v.into())),
        ElementKind::Int8 => decode_elements(row, index, FieldValue::Int),
        ElementKind::Float4 => decode_elements(row, index, FieldValue::Real),
        ElementKind::Float8 => decode_elements(row, index, FieldValue::Double),
        ElementKind::Numeric => decode_elements(row, index, FieldValue::Numeric),
        ElementKind::Text => decode_elements(row, index, FieldValue::Text),
        ElementKind::Date => decode_elements(row, index, FieldValue::Date),
        ElementKind::Uuid => decode_elements(row, index, FieldValue::Uuid),
    }
}

fn decode_elements<T>(
    row: &PgRow,
    index: usize,
    wrap: impl Fn(T) -> FieldValue,
) -> Result<FieldValue, sqlx::Error>
where
    Vec<Option<T>>: for<'r> Decode<'r, Postgres> + Type<Postgres>,
{
    let items: Vec<Option<T>> = row.try_get(index)?;
    Ok(FieldValue::Array(
        items
            .into_iter()
            .map(|item| item.map_or(FieldValue::Null, &wrap))
            .collect(),
    ))
}
