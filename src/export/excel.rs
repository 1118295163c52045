//! サブミッタルExcel生成（CLI版）

use crate::error::{Result, XrefError};
use std::path::Path;
use xref_common::export::submittal_xlsx::generate_submittal_buffer;
use xref_common::SubmittalRow;

pub fn generate_submittal(
    rows: &[SubmittalRow],
    project_name: &str,
    generated: &str,
    output_path: &Path,
) -> Result<()> {
    let buffer = generate_submittal_buffer(project_name, generated, rows)
        .map_err(XrefError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
