use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use super::values::parse_number;

/// A column of the vacancy CSV schema.
///
/// Each variant serializes to the exact CSV header name, so a `Field` can be
/// written in configuration files the same way it appears in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Position")]
    Position,
    #[serde(rename = "Company_Name")]
    CompanyName,
    #[serde(rename = "Job_Description")]
    JobDescription,
    #[serde(rename = "City")]
    City,
    #[serde(rename = "Province")]
    Province,
    #[serde(rename = "Quota")]
    Quota,
    #[serde(rename = "Registered")]
    Registered,
    #[serde(rename = "Acceptance_Percentage")]
    AcceptancePercentage,
    #[serde(rename = "Registration_Start")]
    RegistrationStart,
    #[serde(rename = "Registration_End")]
    RegistrationEnd,
}

impl Field {
    /// Every schema field in header order.
    pub const ALL: [Field; 10] = [
        Field::Position,
        Field::CompanyName,
        Field::JobDescription,
        Field::City,
        Field::Province,
        Field::Quota,
        Field::Registered,
        Field::AcceptancePercentage,
        Field::RegistrationStart,
        Field::RegistrationEnd,
    ];

    /// Sortable table columns, in schema order without the description.
    pub const TABLE_COLUMNS: [Field; 7] = [
        Field::Position,
        Field::CompanyName,
        Field::City,
        Field::Province,
        Field::Quota,
        Field::Registered,
        Field::AcceptancePercentage,
    ];

    /// The CSV header name of this field.
    pub fn name(self) -> &'static str {
        match self {
            Field::Position => "Position",
            Field::CompanyName => "Company_Name",
            Field::JobDescription => "Job_Description",
            Field::City => "City",
            Field::Province => "Province",
            Field::Quota => "Quota",
            Field::Registered => "Registered",
            Field::AcceptancePercentage => "Acceptance_Percentage",
            Field::RegistrationStart => "Registration_Start",
            Field::RegistrationEnd => "Registration_End",
        }
    }

    /// Human readable column label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Position => "Position",
            Field::CompanyName => "Company",
            Field::JobDescription => "Job Description",
            Field::City => "City",
            Field::Province => "Province",
            Field::Quota => "Quota",
            Field::Registered => "Registered",
            Field::AcceptancePercentage => "Acceptance %",
            Field::RegistrationStart => "Registration Start",
            Field::RegistrationEnd => "Registration End",
        }
    }

    /// Whether values of this field compare as numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Quota | Field::Registered | Field::AcceptancePercentage)
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// One parsed CSV row: an ordered mapping from column name to cell text.
///
/// Columns keep the order they had in the source file. A record may lack
/// any column, which is how ragged rows and missing headers surface.
///
/// # Examples
///
/// ```
/// use vacancy_dash::domain::{Field, Record};
///
/// let record = Record::from_pairs([("Position", "Data Analyst"), ("City", "Bandung")]);
/// assert_eq!(record.field(Field::Position), Some("Data Analyst"));
/// assert_eq!(record.field(Field::Province), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, value);
        }
        record
    }

    /// Sets a column value, replacing an existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.name())
    }

    /// The field value, or an empty string when the column is absent.
    pub fn field_or_empty(&self, field: Field) -> &str {
        self.field(field).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Columns that are not part of the vacancy schema.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(name, _)| Field::from_name(name).is_none())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when a present numeric field does not start with a number.
    pub fn has_unparsed_numbers(&self) -> bool {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_numeric())
            .filter_map(|field| self.field(field))
            .any(|value| parse_number(value).is_none())
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        use std::fmt;

        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column names to cell values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = Record::new();
                while let Some((name, value)) = map.next_entry::<String, String>()? {
                    record.insert(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// The result of one ingestion: headers in file order plus every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    pub source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            headers,
            records,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Schema fields that no header provides.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.headers.iter().any(|header| header == field.name()))
            .collect()
    }

    /// Number of rows whose numeric columns will be read as zero.
    pub fn rows_with_unparsed_numbers(&self) -> usize {
        self.records.iter().filter(|record| record.has_unparsed_numbers()).count()
    }
}
