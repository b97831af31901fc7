//! Grouping of derived activity rows into the weekly fact grain.

use crate::models::activity::DerivedRecord;
use crate::models::aggregated::AggregatedRow;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// `(Location, Brand, Department, Week of Year, Type, Date)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub location: String,
    pub brand: String,
    pub department: String,
    pub week_of_year: Option<u32>,
    pub kind: String,
    pub date: Option<NaiveDate>,
}

impl GroupKey {
    pub fn of(row: &DerivedRecord) -> Self {
        let r = &row.record;
        Self {
            location: r.location.clone(),
            brand: r.brand.clone(),
            department: r.department.clone(),
            week_of_year: row.week_of_year,
            kind: r.kind.clone(),
            date: r.date,
        }
    }
}

#[derive(Default)]
struct GroupTotals {
    total_hours: f64,
    persons: BTreeSet<Option<String>>,
    total_utilized: u32,
    rows: usize,
}

/// First run of digits in a person identifier, if any.
pub fn extract_person_token(person: &str) -> Option<String> {
    DIGITS.find(person).map(|m| m.as_str().to_string())
}

/// Join person tokens in set order (missing tokens first, then
/// lexicographic), rendering a missing token as empty.
pub fn join_persons(tokens: &BTreeSet<Option<String>>) -> String {
    tokens
        .iter()
        .map(|t| t.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One output row per distinct group key, in ascending key order.
pub fn aggregate(rows: &[DerivedRecord]) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<GroupKey, GroupTotals> = BTreeMap::new();

    for row in rows {
        let totals = groups.entry(GroupKey::of(row)).or_default();
        totals.total_hours += row.record.logged_hours;
        totals.persons.insert(extract_person_token(&row.record.person));
        if row.utilized.is_yes() {
            totals.total_utilized += 1;
        }
        totals.rows += 1;
    }

    groups
        .into_iter()
        .map(|(key, totals)| AggregatedRow {
            location: key.location,
            brand: key.brand,
            department: key.department,
            week_of_year: key.week_of_year,
            kind: key.kind,
            date: key.date,
            total_hours: totals.total_hours,
            persons: join_persons(&totals.persons),
            total_utilized: totals.total_utilized,
            source_rows: totals.rows,
        })
        .collect()
}
