//! 表ファイルの読み込み
//!
//! CSV等の区切りテキストとスプレッドシート（xlsx/xls/xlsb/ods、先頭シートのみ）を
//! `RawTable` に変換する。形式はファイル先頭のシグネチャ、次に拡張子で判定する。

mod delimited;
mod spreadsheet;

use crate::error::{Result, XrefError};
use std::path::Path;
use xref_common::RawTable;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// zip（xlsx/ods）
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE複合文書（xls）
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Delimited,
    Spreadsheet,
}

impl TableFormat {
    pub fn detect(path: &Path, bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            return TableFormat::Spreadsheet;
        }
        Self::from_extension(path)
    }

    pub fn from_extension(path: &Path) -> Self {
        let is_spreadsheet = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .map(|e| SPREADSHEET_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or(false);

        if is_spreadsheet {
            TableFormat::Spreadsheet
        } else {
            TableFormat::Delimited
        }
    }
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableFormat::Delimited => write!(f, "delimited text"),
            TableFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// ファイルを読み込んで表にする
pub fn parse_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(XrefError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let format = TableFormat::detect(path, &bytes);
    log::info!("reading {} as {}", path.display(), format);

    let table = parse_table_bytes(&bytes, format)?;
    log::info!("{} columns, {} rows", table.headers.len(), table.len());
    Ok(table)
}

/// メモリ上のバイト列を表にする
///
/// 読めない場合・行がない場合は `xref_common::Error::Parse`。
pub fn parse_table_bytes(bytes: &[u8], format: TableFormat) -> xref_common::Result<RawTable> {
    let grid = match format {
        TableFormat::Delimited => delimited::read_grid(bytes)?,
        TableFormat::Spreadsheet => spreadsheet::read_first_sheet(bytes)?,
    };
    RawTable::from_grid(grid)
}
