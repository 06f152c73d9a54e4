//! Export the pivot table to files.
//!
//! CSV exports carry exactly what is printed to stdout; JSON exports carry the
//! table plus the query and statistic it was built from.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::report::{PivotTable, to_csv};

/// Write the pivot table as CSV.
pub fn write_pivot_csv(path: &Path, table: &PivotTable) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(1, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    file.write_all(to_csv(table).as_bytes())
        .map_err(|e| AppError::new(1, format!("Failed to write export CSV '{}': {e}", path.display())))?;

    Ok(())
}

/// Write the pivot table as pretty-printed JSON.
pub fn write_pivot_json(path: &Path, table: &PivotTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(1, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, table)
        .map_err(|e| AppError::new(1, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
