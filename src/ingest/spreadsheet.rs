//! スプレッドシートの読み込み（calamine、先頭シートのみ）

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use xref_common::{Error, Result};

/// セルを文字列にする（整数値の浮動小数は小数点なし）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        // 日付はシリアル値のまま
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        other => other.to_string(),
    }
}

/// 先頭シートをセルのグリッドにする
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::Parse(format!("spreadsheet could not be opened: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Parse("spreadsheet contains no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Parse(format!("failed to read sheet '{}': {}", sheet_name, e)))?;
    log::debug!("sheet '{}' size {:?}", sheet_name, range.get_size());

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Float(1200.0)), "1200");
        assert_eq!(cell_to_string(&Data::Float(13.5)), "13.5");
        assert_eq!(cell_to_string(&Data::Int(3500)), "3500");
        assert_eq!(cell_to_string(&Data::String("Recessed".into())), "Recessed");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
    }
}
