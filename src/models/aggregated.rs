use crate::utils::date::format_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// One fact-grain row produced by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub location: String,
    pub brand: String,
    pub department: String,
    pub week_of_year: Option<u32>,
    pub kind: String,
    pub date: Option<NaiveDate>,
    pub total_hours: f64,
    pub persons: String,
    pub total_utilized: u32,
    /// Number of activity rows folded into this group.
    pub source_rows: usize,
}

/// Row of the intermediate CSV artifact shared by `transform` and `load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedRow {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Person>Brand", alias = "Person > Brand")]
    pub brand: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Week of Year")]
    pub week_of_year: Option<u32>,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Total_Hours", serialize_with = "serialize_hours")]
    pub total_hours: f64,
    #[serde(rename = "Persons", default)]
    pub persons: String,
    #[serde(rename = "Total_Utilized")]
    pub total_utilized: u32,
}

impl From<&AggregatedRow> for TransformedRow {
    fn from(row: &AggregatedRow) -> Self {
        Self {
            location: row.location.clone(),
            brand: row.brand.clone(),
            department: row.department.clone(),
            week_of_year: row.week_of_year,
            kind: row.kind.clone(),
            date: row.date.as_ref().map(format_date).unwrap_or_default(),
            total_hours: row.total_hours,
            persons: row.persons.clone(),
            total_utilized: row.total_utilized,
        }
    }
}

/// Hours always carry a decimal part ("10.0", "7.5").
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 && hours.is_finite() {
        format!("{:.1}", hours)
    } else {
        hours.to_string()
    }
}

fn serialize_hours<S: Serializer>(hours: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hours(*hours))
}
