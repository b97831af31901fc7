use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (if missing)
///  - the SQLite store with the star schema and the log table
pub fn handle(cfg: &Config, config_path: &Path) -> AppResult<()> {
    println!("⚙️  Initializing rutilization…");

    if config_path.exists() {
        println!("📄 Config file : {} (kept)", config_path.display());
    } else {
        cfg.save(config_path)?;
        println!("📄 Config file : {} (created)", config_path.display());
    }

    let db_path = cfg.database_path();
    crate::utils::path::ensure_parent_dir(&db_path)?;
    println!("🗄️  Database   : {}", db_path.display());

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    log::ttlog_or_warn(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    );

    println!("🎉 rutilization initialization completed!");
    Ok(())
}

pub(crate) fn open_store(path: &Path) -> AppResult<DbPool> {
    crate::utils::path::ensure_parent_dir(path)?;
    let pool = DbPool::new(path)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
