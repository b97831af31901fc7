//! Flat-file sink for the aggregated table.

mod csv;

pub use self::csv::{TRANSFORMED_HEADERS, read_transformed, write_transformed};

use crate::ui::messages::success;
use std::path::Path;

/// Common completion message for written artifacts.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} written: {}", path.display()));
}
