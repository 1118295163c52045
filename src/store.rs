//! プロジェクト・カタログのJSON保存

use crate::error::{Result, XrefError};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use xref_common::{Catalog, Project};

/// カタログを読み込む（ファイルがなければ空）
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        log::debug!("catalog {} not found, starting empty", path.display());
        return Ok(Catalog::default());
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    write_json(catalog, path)
}

pub fn load_project(path: &Path) -> Result<Project> {
    if !path.exists() {
        return Err(XrefError::FileNotFound(path.display().to_string()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    write_json(project, path)
}

fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use xref_common::{LineCard, ScheduleRow};

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let catalog = load_catalog(&dir.path().join("catalog.json")).unwrap();
        assert!(catalog.products.is_empty());
    }

    #[test]
    fn test_missing_project_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = load_project(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, XrefError::FileNotFound(_)));
    }

    #[test]
    fn test_project_roundtrip_on_disk() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("project.json");
        let project = Project::from_rows("Lobby", vec![ScheduleRow::default()], &LineCard::default());

        save_project(&project, &path).unwrap();
        assert_eq!(load_project(&path).unwrap(), project);
    }
}
