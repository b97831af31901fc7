use crate::cli::commands::init::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::load::LoadLogic;
use crate::errors::AppResult;
use crate::export::read_transformed;
use crate::ui::messages::{header, step, success, warning};
use crate::utils::path::expand_tilde;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Load { file, replace } = cmd {
        let path = file
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.output_path());
        load(cfg, &path, *replace)?;
    }
    Ok(())
}

pub(crate) fn load(cfg: &Config, path: &Path, replace: bool) -> AppResult<()> {
    header(format!("Load {}", path.display()));

    let rows = read_transformed(path)?;
    step("Read", format!("{} aggregated rows", rows.len()));

    let db_path = cfg.database_path();
    let mut pool = open_store(&db_path)?;

    if replace {
        warning("Existing star-schema rows will be replaced.");
    }

    let summary = LoadLogic::load(&mut pool, &rows, replace)?;
    step("Load", &summary);
    success(format!("Star schema loaded into {}", db_path.display()));
    Ok(())
}
