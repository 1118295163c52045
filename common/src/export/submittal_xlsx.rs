//! サブミッタルExcel生成（共通ライブラリ）
//!
//! submittal.rs の行モデルを1シートの表として書き出す

use crate::submittal::{SubmittalRow, SUBMITTAL_COLUMNS, SUBMITTAL_HEADING};
use rust_xlsxwriter::*;

/// 列幅（文字数）
const COLUMN_WIDTHS: [f64; 8] = [10.0, 32.0, 36.0, 10.0, 9.0, 10.0, 16.0, 6.0];

/// 表の開始行（見出しブロックの下）
const TABLE_START_ROW: u32 = 4;

/// サブミッタルExcelをバッファに生成
///
/// # Arguments
/// * `project_name` - プロジェクト名（見出し2行目）
/// * `generated` - 作成日の表示文字列
/// * `rows` - サブミッタル行
pub fn generate_submittal_buffer(
    project_name: &str,
    generated: &str,
    rows: &[SubmittalRow],
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(16.0);
    let subtitle_format = Format::new()
        .set_font_size(11.0)
        .set_font_color(Color::RGB(0x555555));
    let header_format = Format::new()
        .set_bold()
        .set_font_size(9.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border_bottom(FormatBorder::Medium)
        .set_align(FormatAlign::VerticalCenter);
    let value_format = Format::new()
        .set_font_size(10.0)
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_border_bottom(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));
    let type_format = value_format.clone().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Submittal")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    worksheet
        .write_string_with_format(0, 0, SUBMITTAL_HEADING, &title_format)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    worksheet
        .write_string_with_format(1, 0, project_name, &subtitle_format)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    worksheet
        .write_string_with_format(2, 0, format!("Generated {}", generated), &subtitle_format)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;

    for (col, label) in SUBMITTAL_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(TABLE_START_ROW, col as u16, *label, &header_format)
            .map_err(|e| format!("列見出し書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(TABLE_START_ROW + 1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (i, row) in rows.iter().enumerate() {
        let excel_row = TABLE_START_ROW + 1 + i as u32;
        for (col, value) in row.cells().iter().enumerate() {
            let format = if col == 0 { &type_format } else { &value_format };
            worksheet
                .write_string_with_format(excel_row, col as u16, value, format)
                .map_err(|e| format!("セル書き込みエラー: {}", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submittal::Alternative;

    #[test]
    fn test_generate_submittal_buffer() {
        let rows = vec![SubmittalRow {
            type_designation: "A1".to_string(),
            specified_manufacturer: "Lumenpulse".to_string(),
            specified_model: "LPX".to_string(),
            alternative: Alternative::None,
            lumens: "2000".to_string(),
            cct: "3500K".to_string(),
            wattage: "—".to_string(),
            mounting: "Recessed".to_string(),
            quantity: "2".to_string(),
        }];

        let buffer = generate_submittal_buffer("Lobby", "2026-10-19", &rows).unwrap();
        // xlsx は zip
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_submittal_buffer_empty() {
        let buffer = generate_submittal_buffer("Empty", "2026-10-19", &[]).unwrap();
        assert!(!buffer.is_empty());
    }
}
