//! Business-rule exclusion of activity rows.

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::activity::ActivityRecord;
use crate::models::frame::{COL_DEPARTMENT, COL_TYPE, Frame};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct FilterRules {
    pub excluded_departments: Vec<String>,
    pub excluded_types: Vec<String>,
    pub reference_year: i32,
}

impl FilterRules {
    /// Rules from configuration; `year` overrides the configured reference
    /// year, and the current year is used when neither is set.
    pub fn from_config(cfg: &Config, year: Option<i32>) -> Self {
        Self {
            excluded_departments: cfg.excluded_departments.clone(),
            excluded_types: cfg.excluded_types.clone(),
            reference_year: year
                .or(cfg.reference_year)
                .unwrap_or_else(crate::utils::date::current_year),
        }
    }

    /// Default exclusion sets with an explicit reference year.
    pub fn for_year(reference_year: i32) -> Self {
        Self {
            excluded_departments: crate::config::default_excluded_departments(),
            excluded_types: crate::config::default_excluded_types(),
            reference_year,
        }
    }

    pub fn retains(&self, department: &str, kind: &str, date: Option<NaiveDate>) -> bool {
        !self.excluded_departments.iter().any(|d| d == department)
            && !self.excluded_types.iter().any(|t| t == kind)
            && date.is_some_and(|d| d.year() == self.reference_year)
    }

    pub fn retains_record(&self, record: &ActivityRecord) -> bool {
        self.retains(&record.department, &record.kind, record.date)
    }

    /// Drop frame rows that fail the rules. Returns how many were dropped.
    pub fn apply(&self, frame: &mut Frame) -> AppResult<usize> {
        let dept_idx = frame.require_column(COL_DEPARTMENT)?;
        let type_idx = frame.require_column(COL_TYPE)?;

        let before = frame.rows.len();
        frame.rows.retain(|row| {
            self.retains(
                Frame::cell(row, dept_idx),
                Frame::cell(row, type_idx),
                row.date,
            )
        });
        Ok(before - frame.rows.len())
    }

    pub fn apply_records(&self, records: Vec<ActivityRecord>) -> Vec<ActivityRecord> {
        records
            .into_iter()
            .filter(|r| self.retains_record(r))
            .collect()
    }
}
