//! Transform stage: read → clean → filter → project → derive → aggregate → write.

use crate::core::{aggregate, clean, derive, filter::FilterRules, ingest, project};
use crate::errors::AppResult;
use crate::export::{notify_export_success, write_transformed};
use crate::models::activity::DerivedRecord;
use crate::models::aggregated::AggregatedRow;
use crate::models::frame::Frame;
use crate::ui::messages::{step, warning};
use std::path::Path;

/// Knobs of one transform run.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub rules: FilterRules,
    pub layoff_threshold_hours: f64,
    pub file_extension: String,
}

/// Row counts observed along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSummary {
    pub files: usize,
    pub rows_loaded: usize,
    pub unparsed_dates: usize,
    pub rows_filtered_out: usize,
    pub rows_kept: usize,
    pub layoff_rows: usize,
    pub groups: usize,
}

/// Output of the in-memory part of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub derived: Vec<DerivedRecord>,
    pub aggregated: Vec<AggregatedRow>,
    pub summary: TransformSummary,
}

/// Run every stage after ingestion on an already loaded frame.
pub fn run_pipeline(mut frame: Frame, opts: &TransformOptions) -> AppResult<PipelineOutput> {
    let mut summary = TransformSummary {
        files: frame.files,
        rows_loaded: frame.len(),
        ..Default::default()
    };

    summary.unparsed_dates = clean::clean_dates(&mut frame)?;
    step(
        "Clean",
        format!("parsed Date column ({} unparseable)", summary.unparsed_dates),
    );

    summary.rows_filtered_out = opts.rules.apply(&mut frame)?;
    summary.rows_kept = frame.len();
    step(
        "Filter",
        format!(
            "{} rows remain for {} ({} dropped)",
            summary.rows_kept, opts.rules.reference_year, summary.rows_filtered_out
        ),
    );

    let records = project::project(&frame)?;
    step("Project", "selected essential columns");

    let derived = derive::derive(records, opts.layoff_threshold_hours);
    summary.layoff_rows = derived.iter().filter(|d| d.tmp_layoff).count();
    step(
        "Derive",
        format!(
            "added Week of Year, Utilized, tmpLayoff ({} rows marked)",
            summary.layoff_rows
        ),
    );

    let aggregated = aggregate::aggregate(&derived);
    summary.groups = aggregated.len();
    step("Aggregate", format!("{} fact rows", summary.groups));

    Ok(PipelineOutput {
        derived,
        aggregated,
        summary,
    })
}

pub struct TransformLogic;

impl TransformLogic {
    /// Full transform run from `input_dir` to the artifact at `output`.
    pub fn run(input_dir: &Path, output: &Path, opts: &TransformOptions) -> AppResult<TransformSummary> {
        let frame = ingest::ingest_dir(input_dir, &opts.file_extension)?;
        step(
            "Ingest",
            format!(
                "Loaded {} files with a total of {} rows.",
                frame.files,
                frame.len()
            ),
        );

        let out = run_pipeline(frame, opts)?;
        if out.aggregated.is_empty() {
            warning("No rows survived filtering; writing an empty table.");
        }

        write_transformed(output, &out.aggregated)?;
        notify_export_success("Transformed data", output);

        Ok(out.summary)
    }
}
