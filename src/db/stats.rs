use crate::db::pool::DbPool;
use crate::db::star::{STAR_TABLES, TIME_DIM, count_rows};
use crate::utils::colors::{CYAN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};
use rusqlite::OptionalExtension;
use std::fs;
use std::path::Path;

pub fn print_db_info(pool: &mut DbPool, db_path: &Path) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!(
        "{}• File:{} {}{}{}",
        CYAN,
        RESET,
        YELLOW,
        db_path.display(),
        RESET
    );
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROWS PER TABLE
    //
    let mut table = Table::new(vec![Column::left("table", 26), Column::right("rows", 8)]);
    for name in STAR_TABLES {
        let count = count_rows(&pool.conn, name)?;
        table.add_row(vec![name.to_string(), count.to_string()]);
    }
    println!("{}• Tables:{}", CYAN, RESET);
    print!("{}", table.render());

    //
    // 3) DATE RANGE covered by the time dimension
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            &format!("SELECT MIN(Date) FROM {TIME_DIM}"),
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row(
            &format!("SELECT MAX(Date) FROM {TIME_DIM}"),
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let fmt = |d: &Option<String>| match d.as_deref().and_then(parse_date) {
        Some(date) => date.format("%Y-%m-%d (%a)").to_string(),
        None => format!("{GREY}--{RESET}"),
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(&first));
    println!("    to:   {}", fmt(&last));

    println!();
    Ok(())
}

/// Fact rows whose foreign keys point at a missing dimension row,
/// as `(table, rowid, parent)` triples reported by SQLite.
pub fn foreign_key_violations(pool: &DbPool) -> rusqlite::Result<Vec<(String, i64, String)>> {
    let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<i64>>(1)?.unwrap_or(0),
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
