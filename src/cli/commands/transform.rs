use crate::cli::commands::init::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::FilterRules;
use crate::core::transform::{TransformLogic, TransformOptions, TransformSummary};
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Transform {
        input,
        output,
        year,
    } = cmd
    {
        transform(cfg, input.as_deref(), output.as_deref(), *year)?;
    }
    Ok(())
}

/// Resolve paths and rules from flags over config, then run the stage.
pub(crate) fn transform(
    cfg: &Config,
    input: Option<&str>,
    output: Option<&str>,
    year: Option<i32>,
) -> AppResult<(PathBuf, TransformSummary)> {
    let input_dir = input.map(expand_tilde).unwrap_or_else(|| cfg.input_path());
    let output_file = output.map(expand_tilde).unwrap_or_else(|| cfg.output_path());

    let opts = TransformOptions {
        rules: FilterRules::from_config(cfg, year),
        layoff_threshold_hours: cfg.layoff_threshold_hours,
        file_extension: cfg.file_extension.clone(),
    };

    header(format!("Transform {}", input_dir.display()));
    let summary = TransformLogic::run(&input_dir, &output_file, &opts)?;

    match open_store(&cfg.database_path()) {
        Ok(pool) => ttlog_or_warn(
            &pool.conn,
            "transform",
            &output_file.to_string_lossy(),
            &format!(
                "{} files, {} rows loaded, {} kept, {} fact rows (year {})",
                summary.files,
                summary.rows_loaded,
                summary.rows_kept,
                summary.groups,
                opts.rules.reference_year
            ),
        ),
        Err(e) => warning(format!("Failed to write internal log: {}", e)),
    }

    Ok((output_file, summary))
}
