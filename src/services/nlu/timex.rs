//! Travel date resolution from the recognizer's `datetime` entities.
//!
//! Dates stay in TIMEX form (`2023-05-01`, `XXXX-05-01`, ...). Ambiguity the
//! user left in, such as a missing year, is preserved for the dialog layer.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::errors::InterpretError;
use crate::models::{DateTimeEntity, DateTimeKind};

const DATETIME_KEY: &str = "datetime";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelDates {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub fn resolve_travel_dates(entities: &Map<String, Value>) -> Result<TravelDates, InterpretError> {
    resolve_dates(&datetime_entities(entities))
}

/// Decodes the `datetime` records, skipping any that are not shaped like one.
pub fn datetime_entities(entities: &Map<String, Value>) -> Vec<DateTimeEntity> {
    let Some(records) = entities.get(DATETIME_KEY).and_then(Value::as_array) else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed datetime entity");
                None
            }
        })
        .collect()
}

pub fn resolve_dates(records: &[DateTimeEntity]) -> Result<TravelDates, InterpretError> {
    match records {
        [] => Ok(TravelDates::default()),
        [single] => match single.kind {
            DateTimeKind::DateRange => {
                let (start, end) = split_range(first_timex(single)?)?;
                Ok(TravelDates {
                    start: Some(start),
                    end: Some(end),
                })
            }
            DateTimeKind::Date => Ok(TravelDates {
                start: Some(first_timex(single)?.to_string()),
                end: None,
            }),
            DateTimeKind::Duration | DateTimeKind::Other => Ok(TravelDates::default()),
        },
        _ => {
            let mut dates = TravelDates::default();
            for record in records {
                match record.kind {
                    DateTimeKind::Date if dates.start.is_none() => {
                        dates.start = Some(first_timex(record)?.to_string());
                    }
                    // Durations ("for a week") are recognized but have no slot yet.
                    DateTimeKind::Duration => {
                        tracing::debug!(timex = ?record.timex.first(), "ignoring duration entity");
                    }
                    _ => {}
                }
            }
            Ok(dates)
        }
    }
}

fn first_timex(entity: &DateTimeEntity) -> Result<&str, InterpretError> {
    entity
        .timex
        .first()
        .map(String::as_str)
        .ok_or_else(|| InterpretError::DateResolution(format!("{:?} entity has no TIMEX value", entity.kind)))
}

/// Splits a range TIMEX `(start,end)` or `(start,end,duration)`.
pub fn split_range(timex: &str) -> Result<(String, String), InterpretError> {
    let malformed = |reason: &str| InterpretError::DateResolution(format!("{reason}: {timex:?}"));

    let inner = timex
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| malformed("range is not enclosed in parentheses"))?;

    if inner.contains(['(', ')']) {
        return Err(malformed("unbalanced parentheses in range"));
    }

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [start, end] | [start, end, _] if !start.is_empty() && !end.is_empty() => {
            Ok((start.to_string(), end.to_string()))
        }
        [_] => Err(malformed("range is missing the ',' separator")),
        [_, _] | [_, _, _] => Err(malformed("range has an empty bound")),
        _ => Err(malformed("range has too many components")),
    }
}

/// Returns the calendar date for a fully specified `YYYY-MM-DD` TIMEX.
pub fn to_calendar_date(timex: &str) -> Option<NaiveDate> {
    let bytes = timex.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(timex, "%Y-%m-%d").ok()
}

pub fn is_definite(timex: &str) -> bool {
    to_calendar_date(timex).is_some()
}
