//! Dimensional loader: turns the aggregated table into the star schema.

use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::star::{
    self, BRAND_DIM, DEPARTMENT_DIM, FactKeys, LOCATION_DIM, PERSON_DIM, STAR_TABLES, TYPE_DIM,
};
use crate::errors::{AppError, AppResult};
use crate::models::aggregated::TransformedRow;
use rusqlite::Connection;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Distinct values of one dimension with 1-based surrogate keys assigned in
/// first-seen order.
#[derive(Debug, Clone)]
pub struct Dimension<K> {
    name: &'static str,
    members: Vec<K>,
    keys: HashMap<K, i64>,
}

impl<K: Eq + Hash + Clone + fmt::Display> Dimension<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
            keys: HashMap::new(),
        }
    }

    /// Key of `value`, assigning the next one if it has not been seen.
    pub fn intern(&mut self, value: &K) -> i64 {
        if let Some(&key) = self.keys.get(value) {
            return key;
        }
        self.members.push(value.clone());
        let key = self.members.len() as i64;
        self.keys.insert(value.clone(), key);
        key
    }

    pub fn key_of(&self, value: &K) -> Option<i64> {
        self.keys.get(value).copied()
    }

    pub fn resolve(&self, value: &K) -> AppResult<i64> {
        self.key_of(value).ok_or_else(|| AppError::UnresolvedKey {
            dimension: self.name.to_string(),
            value: value.to_string(),
        })
    }

    /// `(key, value)` pairs in key order.
    pub fn members(&self) -> impl Iterator<Item = (i64, &K)> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, v)| (i as i64 + 1, v))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Member of the time dimension: a week and date pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeMember {
    pub week_of_year: u32,
    pub date: String,
}

impl fmt::Display for TimeMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} / {}", self.week_of_year, self.date)
    }
}

impl TimeMember {
    fn of(row: &TransformedRow, line: usize) -> AppResult<Self> {
        let week_of_year = row.week_of_year.ok_or_else(|| AppError::MalformedFile {
            file: "transformed data".to_string(),
            reason: format!("row {}: missing Week of Year", line),
        })?;
        if row.date.trim().is_empty() {
            return Err(AppError::MalformedFile {
                file: "transformed data".to_string(),
                reason: format!("row {}: missing Date", line),
            });
        }
        Ok(Self {
            week_of_year,
            date: row.date.clone(),
        })
    }
}

/// All six dimensions, fully populated before any fact is resolved.
#[derive(Debug, Clone)]
pub struct StarModel {
    pub location: Dimension<String>,
    pub brand: Dimension<String>,
    pub department: Dimension<String>,
    pub kind: Dimension<String>,
    pub time: Dimension<TimeMember>,
    pub person: Dimension<String>,
}

impl StarModel {
    pub fn from_rows(rows: &[TransformedRow]) -> AppResult<Self> {
        let mut model = Self {
            location: Dimension::new("Location"),
            brand: Dimension::new("Brand"),
            department: Dimension::new("Department"),
            kind: Dimension::new("Type"),
            time: Dimension::new("Time"),
            person: Dimension::new("Person"),
        };

        for (i, row) in rows.iter().enumerate() {
            model.location.intern(&row.location);
            model.brand.intern(&row.brand);
            model.department.intern(&row.department);
            model.kind.intern(&row.kind);
            model.time.intern(&TimeMember::of(row, i + 1)?);
            // The joined Persons string is one member, not one per person.
            model.person.intern(&row.persons);
        }

        Ok(model)
    }

    pub fn fact_keys(&self, row: &TransformedRow, line: usize) -> AppResult<FactKeys> {
        Ok(FactKeys {
            location_id: self.location.resolve(&row.location)?,
            brand_id: self.brand.resolve(&row.brand)?,
            department_id: self.department.resolve(&row.department)?,
            person_id: self.person.resolve(&row.persons)?,
            time_id: self.time.resolve(&TimeMember::of(row, line)?)?,
            type_id: self.kind.resolve(&row.kind)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub locations: usize,
    pub brands: usize,
    pub departments: usize,
    pub types: usize,
    pub times: usize,
    pub persons: usize,
    pub facts: usize,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} facts; dimensions: {} locations, {} brands, {} departments, {} types, {} weeks/dates, {} persons",
            self.facts,
            self.locations,
            self.brands,
            self.departments,
            self.types,
            self.times,
            self.persons
        )
    }
}

pub struct LoadLogic;

impl LoadLogic {
    /// Load `rows` into the star schema inside one transaction.
    /// Without `replace` the star tables must be empty.
    pub fn load(pool: &mut DbPool, rows: &[TransformedRow], replace: bool) -> AppResult<LoadSummary> {
        let model = StarModel::from_rows(rows)?;

        let tx = pool.conn.transaction()?;

        if replace {
            star::clear_star_schema(&tx)?;
        } else {
            ensure_empty(&tx)?;
        }

        let summary = write_model(&tx, &model, rows)?;
        tx.commit()?;

        ttlog_or_warn(&pool.conn, "load", "resource_utilization_fact", &summary.to_string());
        Ok(summary)
    }
}

fn ensure_empty(conn: &Connection) -> AppResult<()> {
    for table in STAR_TABLES {
        if star::count_rows(conn, table)? > 0 {
            return Err(AppError::StoreNotEmpty(table.to_string()));
        }
    }
    Ok(())
}

fn as_str((key, value): (i64, &String)) -> (i64, &str) {
    (key, value.as_str())
}

/// Dimensions first, then facts.
fn write_model(conn: &Connection, model: &StarModel, rows: &[TransformedRow]) -> AppResult<LoadSummary> {
    let mut summary = LoadSummary {
        locations: star::insert_dimension(conn, &LOCATION_DIM, model.location.members().map(as_str))?,
        brands: star::insert_dimension(conn, &BRAND_DIM, model.brand.members().map(as_str))?,
        departments: star::insert_dimension(
            conn,
            &DEPARTMENT_DIM,
            model.department.members().map(as_str),
        )?,
        types: star::insert_dimension(conn, &TYPE_DIM, model.kind.members().map(as_str))?,
        times: star::insert_time_dimension(
            conn,
            model
                .time
                .members()
                .map(|(k, t)| (k, t.week_of_year, t.date.as_str())),
        )?,
        persons: star::insert_dimension(conn, &PERSON_DIM, model.person.members().map(as_str))?,
        facts: 0,
    };

    for (i, row) in rows.iter().enumerate() {
        let keys = model.fact_keys(row, i + 1)?;
        star::insert_fact(conn, &keys, row.total_hours, row.total_utilized)?;
        summary.facts += 1;
    }

    Ok(summary)
}
