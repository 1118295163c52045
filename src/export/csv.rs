//! サブミッタルCSV生成

use crate::error::Result;
use std::path::Path;
use xref_common::submittal::SUBMITTAL_COLUMNS;
use xref_common::SubmittalRow;

pub fn generate_submittal(rows: &[SubmittalRow], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = ::csv::Writer::from_path(output_path)?;
    writer.write_record(SUBMITTAL_COLUMNS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}
