//! Multi-field record filtering.
//!
//! Criteria combine with logical AND. Text criteria are case-insensitive
//! substring tests; the acceptance threshold is an inclusive lower bound.

use serde::{Deserialize, Serialize};

use super::models::{Field, Record};
use super::values::coerce_number;

/// One editable filter input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Position,
    Company,
    City,
    Province,
    Description,
    MinAcceptance,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Position,
        FilterField::Company,
        FilterField::City,
        FilterField::Province,
        FilterField::Description,
        FilterField::MinAcceptance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Position => "Position",
            FilterField::Company => "Company",
            FilterField::City => "City",
            FilterField::Province => "Province",
            FilterField::Description => "Description",
            FilterField::MinAcceptance => "Min Acceptance %",
        }
    }

    /// The record column this input is tested against.
    pub fn target(self) -> Field {
        match self {
            FilterField::Position => Field::Position,
            FilterField::Company => Field::CompanyName,
            FilterField::City => Field::City,
            FilterField::Province => Field::Province,
            FilterField::Description => Field::JobDescription,
            FilterField::MinAcceptance => Field::AcceptancePercentage,
        }
    }

    pub fn next(self) -> FilterField {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> FilterField {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The active search inputs.
///
/// # Examples
///
/// ```
/// use vacancy_dash::domain::{FilterCriteria, Record};
///
/// let criteria = FilterCriteria {
///     position: "engineer".to_string(),
///     ..FilterCriteria::default()
/// };
/// let row = |position: &str| {
///     Record::from_pairs([
///         ("Position", position),
///         ("Company_Name", "PT Nusantara"),
///         ("Job_Description", ""),
///         ("City", "Bandung"),
///         ("Province", "Jawa Barat"),
///     ])
/// };
/// assert!(criteria.matches(&row("Software Engineer")));
/// assert!(!criteria.matches(&row("Data Analyst")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub position: String,
    pub company: String,
    pub city: String,
    pub province: String,
    pub description: String,
    pub min_acceptance: String,
}

impl FilterCriteria {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Position => &self.position,
            FilterField::Company => &self.company,
            FilterField::City => &self.city,
            FilterField::Province => &self.province,
            FilterField::Description => &self.description,
            FilterField::MinAcceptance => &self.min_acceptance,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Position => self.position = value,
            FilterField::Company => self.company = value,
            FilterField::City => self.city = value,
            FilterField::Province => self.province = value,
            FilterField::Description => self.description = value,
            FilterField::MinAcceptance => self.min_acceptance = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any input would narrow the record set.
    pub fn is_active(&self) -> bool {
        FilterField::ALL.iter().any(|field| !self.get(*field).trim().is_empty())
    }

    fn threshold(&self) -> Option<f64> {
        let raw = self.min_acceptance.trim();
        if raw.is_empty() {
            None
        } else {
            Some(coerce_number(raw))
        }
    }

    /// Tests the five text inputs only.
    ///
    /// A record without the targeted column never matches, even when the
    /// input is empty.
    pub fn text_matches(&self, record: &Record) -> bool {
        FilterField::ALL
            .iter()
            .filter(|field| **field != FilterField::MinAcceptance)
            .all(|field| match record.field(field.target()) {
                Some(value) => value.to_lowercase().contains(&self.get(*field).to_lowercase()),
                None => false,
            })
    }

    pub fn threshold_matches(&self, record: &Record) -> bool {
        match self.threshold() {
            None => true,
            Some(threshold) => {
                coerce_number(record.field_or_empty(Field::AcceptancePercentage)) >= threshold
            }
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.text_matches(record) && self.threshold_matches(record)
    }
}

/// Keeps the records that satisfy every criterion, preserving input order.
pub fn filter_records(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacancy(position: &str, company: &str, city: &str, acceptance: &str) -> Record {
        Record::from_pairs([
            ("Position", position),
            ("Company_Name", company),
            ("Job_Description", "Maintain internal tooling"),
            ("City", city),
            ("Province", "Jawa Barat"),
            ("Acceptance_Percentage", acceptance),
        ])
    }

    fn sample() -> Vec<Record> {
        vec![
            vacancy("Software Engineer", "PT Nusantara", "Bandung", "50"),
            vacancy("Data Analyst", "PT Samudra", "Bekasi", "75"),
            vacancy("QA Engineer", "CV Sinar", "Bogor", "60"),
        ]
    }

    fn positions(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.field_or_empty(Field::Position)).collect()
    }

    #[test]
    fn test_empty_criteria_keep_everything() {
        let records = sample();
        let criteria = FilterCriteria::default();
        assert!(!criteria.is_active());
        assert_eq!(filter_records(&records, &criteria), records);
    }

    #[test]
    fn test_position_is_case_insensitive() {
        let criteria = FilterCriteria {
            position: "ENGINEER".to_string(),
            ..FilterCriteria::default()
        };
        let filtered = filter_records(&sample(), &criteria);
        assert_eq!(positions(&filtered), vec!["Software Engineer", "QA Engineer"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let criteria = FilterCriteria {
            position: "engineer".to_string(),
            city: "bog".to_string(),
            ..FilterCriteria::default()
        };
        let filtered = filter_records(&sample(), &criteria);
        assert_eq!(positions(&filtered), vec!["QA Engineer"]);
    }

    #[test]
    fn test_min_acceptance_is_inclusive() {
        let criteria = FilterCriteria {
            min_acceptance: "60".to_string(),
            ..FilterCriteria::default()
        };
        let filtered = filter_records(&sample(), &criteria);
        assert_eq!(positions(&filtered), vec!["Data Analyst", "QA Engineer"]);
    }

    #[test]
    fn test_blank_threshold_is_inactive() {
        let criteria = FilterCriteria {
            min_acceptance: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_records(&sample(), &criteria).len(), 3);
    }

    #[test]
    fn test_non_numeric_values_count_as_zero() {
        let records = vec![
            vacancy("A", "X", "Y", "abc"),
            vacancy("B", "X", "Y", "-5"),
        ];
        let zero = FilterCriteria {
            min_acceptance: "0".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(positions(&filter_records(&records, &zero)), vec!["A"]);

        let junk_threshold = FilterCriteria {
            min_acceptance: "lots".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(positions(&filter_records(&records, &junk_threshold)), vec!["A"]);
    }

    #[test]
    fn test_missing_text_field_fails_closed() {
        let full = vacancy("Clerk", "PT Kecil", "Depok", "90");
        let partial = Record::from_pairs(full.iter().filter(|(name, _)| *name != "Province"));
        let records = vec![partial];

        assert!(filter_records(&records, &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_missing_acceptance_is_zero() {
        let record = Record::from_pairs([
            ("Position", "Clerk"),
            ("Company_Name", "PT"),
            ("Job_Description", ""),
            ("City", "Depok"),
            ("Province", "Jawa Barat"),
        ]);
        let mut criteria = FilterCriteria::default();
        assert!(criteria.matches(&record));
        criteria.set(FilterField::MinAcceptance, "0");
        assert!(criteria.matches(&record));
        criteria.set(FilterField::MinAcceptance, "0.1");
        assert!(!criteria.matches(&record));
    }

    #[test]
    fn test_filter_is_idempotent_subset() {
        let criteria = FilterCriteria {
            company: "pt".to_string(),
            min_acceptance: "55".to_string(),
            ..FilterCriteria::default()
        };
        let records = sample();
        let once = filter_records(&records, &criteria);
        let twice = filter_records(&once, &criteria);
        assert_eq!(once, twice);
        assert!(once.iter().all(|r| records.contains(r) && criteria.matches(r)));
    }

    #[test]
    fn test_get_set_clear() {
        let mut criteria = FilterCriteria::default();
        for field in FilterField::ALL {
            criteria.set(field, field.label());
            assert_eq!(criteria.get(field), field.label());
        }
        assert!(criteria.is_active());
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_field_cycling_wraps() {
        assert_eq!(FilterField::MinAcceptance.next(), FilterField::Position);
        assert_eq!(FilterField::Position.previous(), FilterField::MinAcceptance);
        assert_eq!(FilterField::City.next(), FilterField::Province);
    }
}
