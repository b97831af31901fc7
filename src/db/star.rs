//! Star-schema table access: dimension and fact inserts, row counts, reset.

use rusqlite::{Connection, Result, params};

/// A single-attribute dimension table.
pub struct DimTable {
    pub table: &'static str,
    pub id_column: &'static str,
    pub value_column: &'static str,
}

pub const LOCATION_DIM: DimTable = DimTable {
    table: "location_dim",
    id_column: "Location_ID",
    value_column: "Location",
};

pub const BRAND_DIM: DimTable = DimTable {
    table: "brand_dim",
    id_column: "Brand_ID",
    value_column: "Brand",
};

pub const DEPARTMENT_DIM: DimTable = DimTable {
    table: "department_dim",
    id_column: "Department_ID",
    value_column: "Department",
};

pub const TYPE_DIM: DimTable = DimTable {
    table: "type_dim",
    id_column: "Type_ID",
    value_column: "Type",
};

pub const PERSON_DIM: DimTable = DimTable {
    table: "person_dim",
    id_column: "Person_ID",
    value_column: "Person",
};

pub const TIME_DIM: &str = "time_dim";
pub const FACT_TABLE: &str = "resource_utilization_fact";

/// Every star-schema table, fact table first so deletes respect foreign keys.
pub const STAR_TABLES: [&str; 7] = [
    FACT_TABLE,
    "location_dim",
    "brand_dim",
    "department_dim",
    "type_dim",
    TIME_DIM,
    "person_dim",
];

/// Foreign keys of one fact row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactKeys {
    pub location_id: i64,
    pub brand_id: i64,
    pub department_id: i64,
    pub person_id: i64,
    pub time_id: i64,
    pub type_id: i64,
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
}

pub fn clear_star_schema(conn: &Connection) -> Result<()> {
    for table in STAR_TABLES {
        conn.execute(&format!("DELETE FROM {table}"), [])?;
    }
    Ok(())
}

pub fn insert_dimension<'a, I>(conn: &Connection, dim: &DimTable, members: I) -> Result<usize>
where
    I: IntoIterator<Item = (i64, &'a str)>,
{
    let mut stmt = conn.prepare_cached(&format!(
        "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
        dim.table, dim.id_column, dim.value_column
    ))?;

    let mut inserted = 0;
    for (id, value) in members {
        inserted += stmt.execute(params![id, value])?;
    }
    Ok(inserted)
}

pub fn insert_time_dimension<'a, I>(conn: &Connection, members: I) -> Result<usize>
where
    I: IntoIterator<Item = (i64, u32, &'a str)>,
{
    let mut stmt = conn.prepare_cached(
        "INSERT INTO time_dim (Time_ID, Week_Of_Year, Date) VALUES (?1, ?2, ?3)",
    )?;

    let mut inserted = 0;
    for (id, week, date) in members {
        inserted += stmt.execute(params![id, week, date])?;
    }
    Ok(inserted)
}

pub fn insert_fact(
    conn: &Connection,
    keys: &FactKeys,
    total_hours: f64,
    total_utilized: u32,
) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO resource_utilization_fact (
            Location_ID, Brand_ID, Department_ID, Person_ID, Time_ID, Type_ID,
            Total_Hours, Total_Utilized
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    stmt.execute(params![
        keys.location_id,
        keys.brand_id,
        keys.department_id,
        keys.person_id,
        keys.time_id,
        keys.type_id,
        total_hours,
        total_utilized
    ])?;

    Ok(conn.last_insert_rowid())
}
