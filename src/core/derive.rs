//! Derived columns: `Week of Year`, `Utilized` and `tmpLayoff`.

use crate::models::activity::{ActivityRecord, DerivedRecord};
use crate::models::utilized::Utilized;
use crate::utils::date::iso_week;
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn week_of_year(date: Option<NaiveDate>) -> Option<u32> {
    date.as_ref().map(iso_week)
}

pub fn map_utilized(kind: &str) -> Utilized {
    Utilized::from_type(kind)
}

/// Total `Logged Hours` per `(Person, Week of Year)`.
/// Records with no week are left out.
pub fn weekly_hours(
    records: &[ActivityRecord],
    weeks: &[Option<u32>],
) -> HashMap<(String, u32), f64> {
    let mut totals: HashMap<(String, u32), f64> = HashMap::new();
    for (record, week) in records.iter().zip(weeks) {
        if let Some(week) = week {
            *totals.entry((record.person.clone(), *week)).or_insert(0.0) += record.logged_hours;
        }
    }
    totals
}

/// Attach the three derived columns to every record. A record is marked
/// `tmpLayoff` when its person logged at most `layoff_threshold` hours in
/// that week across all records.
pub fn derive(records: Vec<ActivityRecord>, layoff_threshold: f64) -> Vec<DerivedRecord> {
    let weeks: Vec<Option<u32>> = records.iter().map(|r| week_of_year(r.date)).collect();

    let totals = weekly_hours(&records, &weeks);

    records
        .into_iter()
        .zip(weeks)
        .map(|(record, week)| {
            let tmp_layoff = week
                .and_then(|w| totals.get(&(record.person.clone(), w)))
                .is_some_and(|&total| total <= layoff_threshold);

            DerivedRecord {
                utilized: map_utilized(&record.kind),
                week_of_year: week,
                tmp_layoff,
                record,
            }
        })
        .collect()
}
