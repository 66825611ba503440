//! Single-column, stable ordering of records.

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};

use super::models::{Field, Record};
use super::values::coerce_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// The active sort column and direction.
///
/// # Examples
///
/// ```
/// use vacancy_dash::domain::{Field, SortDirection, SortDirective};
///
/// let mut directive = SortDirective::default();
/// assert_eq!(directive.key, Field::AcceptancePercentage);
/// assert_eq!(directive.direction, SortDirection::Descending);
///
/// directive.toggle(Field::City);
/// assert_eq!(directive.direction, SortDirection::Ascending);
/// directive.toggle(Field::City);
/// assert_eq!(directive.direction, SortDirection::Descending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub key: Field,
    pub direction: SortDirection,
}

impl Default for SortDirective {
    fn default() -> Self {
        Self {
            key: Field::AcceptancePercentage,
            direction: SortDirection::Descending,
        }
    }
}

impl SortDirective {
    pub fn new(key: Field, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Flips the direction when `key` is already active, otherwise switches
    /// to `key` in ascending order.
    pub fn toggle(&mut self, key: Field) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Ascending comparison of two records on `field`.
    ///
    /// Numeric fields compare by value with unparseable text as zero; the
    /// rest compare as case-sensitive strings, with a missing column read as
    /// the empty string.
    pub fn compare(field: Field, a: &Record, b: &Record) -> Ordering {
        if field.is_numeric() {
            let left = coerce_number(a.field_or_empty(field));
            let right = coerce_number(b.field_or_empty(field));
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        } else {
            a.field_or_empty(field).cmp(b.field_or_empty(field))
        }
    }
}

/// Orders `records` by the directive. Equal keys keep their input order in
/// either direction.
pub fn sort_records(mut records: Vec<Record>, directive: &SortDirective) -> Vec<Record> {
    records.sort_by(|a, b| directive.direction.apply(SortDirective::compare(directive.key, a, b)));
    records
}
