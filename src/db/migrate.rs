use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the dimension tables and the fact table.
fn create_star_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS location_dim (
            Location_ID INTEGER PRIMARY KEY,
            Location    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS brand_dim (
            Brand_ID INTEGER PRIMARY KEY,
            Brand    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS department_dim (
            Department_ID INTEGER PRIMARY KEY,
            Department    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS type_dim (
            Type_ID INTEGER PRIMARY KEY,
            Type    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_dim (
            Time_ID      INTEGER PRIMARY KEY,
            Week_Of_Year INTEGER NOT NULL,
            Date         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS person_dim (
            Person_ID INTEGER PRIMARY KEY,
            Person    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS resource_utilization_fact (
            Fact_ID        INTEGER PRIMARY KEY,
            Location_ID    INTEGER NOT NULL,
            Brand_ID       INTEGER NOT NULL,
            Department_ID  INTEGER NOT NULL,
            Person_ID      INTEGER NOT NULL,
            Time_ID        INTEGER NOT NULL,
            Type_ID        INTEGER NOT NULL,
            Total_Hours    REAL,
            Total_Utilized INTEGER,
            FOREIGN KEY (Location_ID)   REFERENCES location_dim(Location_ID),
            FOREIGN KEY (Brand_ID)      REFERENCES brand_dim(Brand_ID),
            FOREIGN KEY (Department_ID) REFERENCES department_dim(Department_ID),
            FOREIGN KEY (Time_ID)       REFERENCES time_dim(Time_ID),
            FOREIGN KEY (Type_ID)       REFERENCES type_dim(Type_ID),
            FOREIGN KEY (Person_ID)     REFERENCES person_dim(Person_ID)
        );
        "#,
    )?;
    Ok(())
}

/// Index the fact table's foreign keys. Recorded in `log` once applied.
fn migrate_add_fact_indexes(conn: &Connection) -> Result<()> {
    let version = "20250310_0002_fact_fk_indexes";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_fact_location ON resource_utilization_fact(Location_ID);
        CREATE INDEX IF NOT EXISTS idx_fact_time     ON resource_utilization_fact(Time_ID);
        CREATE INDEX IF NOT EXISTS idx_fact_person   ON resource_utilization_fact(Person_ID);
        "#,
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Indexed fact table foreign keys')",
        [version],
    )?;

    success(format!("Migration applied: {}", version));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "resource_utilization_fact")?;
    create_star_schema(conn)?;
    if fresh {
        success("Created star schema (6 dimensions + fact table).");
    }

    migrate_add_fact_indexes(conn)?;

    Ok(())
}
