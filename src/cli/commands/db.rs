use crate::cli::commands::init::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info,
    } = cmd
    {
        let db_path = cfg.database_path();
        let mut pool: DbPool = open_store(&db_path)?;

        //
        // 1) INFO
        //
        if *info {
            stats::print_db_info(&mut pool, &db_path)?;
        }

        //
        // 2) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            println!("{}▶ Checking foreign keys…{}", CYAN, RESET);
            let violations = stats::foreign_key_violations(&pool)?;
            if violations.is_empty() {
                println!("{}✔ Every fact row references existing dimension rows.{}\n", GREEN, RESET);
            } else {
                for (table, rowid, parent) in &violations {
                    println!(
                        "{}✘ {} row {} references a missing {} row{}",
                        RED, table, rowid, parent, RESET
                    );
                }
                println!();
            }
        }

        //
        // 3) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
