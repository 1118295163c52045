pub mod excel;
pub mod csv;

use crate::error::Result;
use std::path::{Path, PathBuf};
use xref_common::SubmittalRow;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmittalFormat {
    #[default]
    Xlsx,
    Csv,
    Both,
}

impl std::str::FromStr for SubmittalFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(SubmittalFormat::Xlsx),
            "csv" => Ok(SubmittalFormat::Csv),
            "both" => Ok(SubmittalFormat::Both),
            _ => Err(format!("Unknown format: {}. Use xlsx, csv, or both", s)),
        }
    }
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.with_extension(extension)
    }
}

/// サブミッタルを書き出し、作成したファイルを返す
pub fn export_submittal(
    rows: &[SubmittalRow],
    project_name: &str,
    generated: &str,
    format: &SubmittalFormat,
    output: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, SubmittalFormat::Xlsx | SubmittalFormat::Both) {
        let path = output_path_for_format(output, stem, "xlsx");
        println!("- Excelを生成中...");
        excel::generate_submittal(rows, project_name, generated, &path)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, SubmittalFormat::Csv | SubmittalFormat::Both) {
        let path = output_path_for_format(output, stem, "csv");
        println!("- CSVを生成中...");
        csv::generate_submittal(rows, &path)?;
        println!("✔ CSV出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("XLSX".parse::<SubmittalFormat>(), Ok(SubmittalFormat::Xlsx));
        assert_eq!("both".parse::<SubmittalFormat>(), Ok(SubmittalFormat::Both));
        assert!("pdf".parse::<SubmittalFormat>().is_err());
    }

    #[test]
    fn test_output_path_for_format() {
        assert_eq!(
            output_path_for_format(Path::new("out/submittal.xlsx"), "x", "csv"),
            PathBuf::from("out/submittal.csv")
        );
        assert_eq!(
            output_path_for_format(Path::new("out"), "Lobby", "xlsx"),
            PathBuf::from("out/Lobby.xlsx")
        );
    }
}
