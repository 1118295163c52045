//! 列マッピングの適用と型変換
//!
//! 変換できないセルはエラーにせず欠損（None）として扱う。
//! 入力行1行につき必ず1行を出力する。

use crate::columns::{ColumnMapping, RawRow};
use crate::fields::CanonicalField;
use crate::types::ScheduleRow;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_NUMERIC_RE: Regex = Regex::new(r"[^0-9.\-]").unwrap();
    static ref LEADING_NUMBER_RE: Regex = Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)").unwrap();
    static ref TUNABLE_CCT_RE: Regex = Regex::new(r"(?i)select|tunable|adjustable").unwrap();
}

/// UTF-8 の em-dash を Windows-1252 として読んだときの文字列
const MISDECODED_EM_DASH: &str = "â€”";

/// マッピングを全行に適用する
pub fn apply_mapping(rows: &[RawRow], mapping: &ColumnMapping) -> Vec<ScheduleRow> {
    rows.iter().map(|row| map_row(row, mapping)).collect()
}

fn map_row(row: &RawRow, mapping: &ColumnMapping) -> ScheduleRow {
    let cell = |field: CanonicalField| -> Option<&str> {
        mapping
            .get(field)
            .and_then(|header| row.get(header))
            .map(|v| v.as_str())
    };
    let text = |field: CanonicalField| cell(field).and_then(clean_text);
    let number = |field: CanonicalField| cell(field).and_then(parse_numeric);

    ScheduleRow {
        type_designation: text(CanonicalField::TypeDesignation),
        manufacturer: text(CanonicalField::Manufacturer),
        model: text(CanonicalField::Model),
        description: text(CanonicalField::Description),
        lumens: number(CanonicalField::Lumens),
        cct: cell(CanonicalField::Cct).and_then(parse_cct),
        wattage: number(CanonicalField::Wattage),
        mounting_type: text(CanonicalField::MountingType),
        voltage: text(CanonicalField::Voltage),
        lamp_type: text(CanonicalField::LampType),
        application: text(CanonicalField::Application),
        dimming_protocol: text(CanonicalField::DimmingProtocol),
        cri: number(CanonicalField::Cri),
        notes: text(CanonicalField::Notes),
        quantity: number(CanonicalField::Quantity).unwrap_or(1.0),
    }
}

/// 文字列セルを正規化する（空・"-"・化けた em-dash は欠損）
pub fn clean_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "-" || value == MISDECODED_EM_DASH {
        return None;
    }
    Some(value.to_string())
}

/// 数値セルを変換する
///
/// 数字・`.`・`-` 以外を取り除き、先頭から読める最長の10進数を採用する。
/// `"1,200 lm"` → 1200、`"N/A"` → None。
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC_RE.replace_all(value, "");
    parse_leading_number(&cleaned)
}

/// CCTセルを変換する（調色・可変タイプは固定CCTを持たないので欠損）
pub fn parse_cct(value: &str) -> Option<f64> {
    if TUNABLE_CCT_RE.is_match(value) {
        return None;
    }
    parse_numeric(value)
}

/// 先頭の数値部分だけを読む（"90+" → 90、"CRI 90" → None）
pub fn parse_leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER_RE
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::auto_detect_columns;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("1,200 lm"), Some(1200.0));
        assert_eq!(parse_numeric("N/A"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("2700K"), Some(2700.0));
        assert_eq!(parse_numeric("13.5W"), Some(13.5));
        assert_eq!(parse_numeric("-"), None);
        assert_eq!(parse_numeric(".5"), Some(0.5));
        // 範囲表記は先頭の数値のみ
        assert_eq!(parse_numeric("3000-4000"), Some(3000.0));
        assert_eq!(parse_numeric("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_parse_cct() {
        assert_eq!(parse_cct("2700K"), Some(2700.0));
        assert_eq!(parse_cct("Tunable White"), None);
        assert_eq!(parse_cct("SELECTABLE 30/35/40"), None);
        assert_eq!(parse_cct("adjustable"), None);
        assert_eq!(parse_cct("3500"), Some(3500.0));
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("90+"), Some(90.0));
        assert_eq!(parse_leading_number("CRI 90"), None);
        assert_eq!(parse_leading_number(" 82.5"), Some(82.5));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Recessed "), Some("Recessed".to_string()));
        assert_eq!(clean_text(""), None);
        assert_eq!(clean_text(" - "), None);
        assert_eq!(clean_text("â€”"), None);
        assert_eq!(clean_text("-10"), Some("-10".to_string()));
    }

    #[test]
    fn test_apply_mapping_typed_fields() {
        let rows = vec![row(&[
            ("TYPE", "A1"),
            ("MFR", "Lithonia"),
            ("CATALOG #", "LDN6 35/20"),
            ("LUMENS", "2,000 lm"),
            ("CCT", "3500K"),
            ("WATTS", "19.8"),
            ("MOUNT", "Recessed"),
            ("VOLTAGE", "120-277V"),
            ("QTY", "12"),
        ])];
        let headers = ["TYPE", "MFR", "CATALOG #", "LUMENS", "CCT", "WATTS", "MOUNT", "VOLTAGE", "QTY"];
        let mapping = auto_detect_columns(&headers);
        let parsed = apply_mapping(&rows, &mapping);

        assert_eq!(parsed.len(), 1);
        let r = &parsed[0];
        assert_eq!(r.type_designation.as_deref(), Some("A1"));
        assert_eq!(r.manufacturer.as_deref(), Some("Lithonia"));
        assert_eq!(r.model.as_deref(), Some("LDN6 35/20"));
        assert_eq!(r.lumens, Some(2000.0));
        assert_eq!(r.cct, Some(3500.0));
        assert_eq!(r.wattage, Some(19.8));
        assert_eq!(r.mounting_type.as_deref(), Some("Recessed"));
        assert_eq!(r.voltage.as_deref(), Some("120-277V"));
        assert_eq!(r.quantity, 12.0);
        assert!(r.description.is_none());
    }

    #[test]
    fn test_apply_mapping_is_total() {
        let rows = vec![
            row(&[("QTY", "N/A"), ("CCT", "Tunable White")]),
            row(&[("QTY", ""), ("CCT", "???")]),
            row(&[]),
        ];
        let mut mapping = ColumnMapping::new();
        mapping.bind(CanonicalField::Quantity, "QTY");
        mapping.bind(CanonicalField::Cct, "CCT");

        let parsed = apply_mapping(&rows, &mapping);
        assert_eq!(parsed.len(), rows.len());
        for r in &parsed {
            assert_eq!(r.quantity, 1.0);
            assert!(r.cct.is_none());
        }
    }

    #[test]
    fn test_apply_mapping_unbound_fields_absent() {
        let rows = vec![row(&[("Lumens", "1000")])];
        let parsed = apply_mapping(&rows, &ColumnMapping::new());
        assert!(parsed[0].lumens.is_none());
        assert_eq!(parsed[0].quantity, 1.0);
    }

    #[test]
    fn test_apply_mapping_explicit_zero_quantity_kept() {
        let rows = vec![row(&[("QTY", "0")])];
        let mut mapping = ColumnMapping::new();
        mapping.bind(CanonicalField::Quantity, "QTY");
        assert_eq!(apply_mapping(&rows, &mapping)[0].quantity, 0.0);
    }
}
