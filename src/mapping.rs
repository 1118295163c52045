//! 列割り当ての上書きと対話的な調整

use crate::error::{Result, XrefError};
use dialoguer::Select;
use xref_common::{CanonicalField, ColumnMapping};

const UNASSIGNED: &str = "(割り当てなし)";

/// `field=見出し` 形式の上書きと解除を割り当てに適用する
///
/// 見出しは表に存在するものだけ受け付ける。
pub fn apply_overrides(
    mapping: &mut ColumnMapping,
    headers: &[String],
    overrides: &[String],
    unmap: &[String],
) -> Result<()> {
    for entry in overrides {
        let (field, header) = entry
            .split_once('=')
            .ok_or_else(|| XrefError::Mapping(format!("'{}' は field=見出し の形式で指定してください", entry)))?;
        let field: CanonicalField = field.parse().map_err(XrefError::Mapping)?;
        let header = header.trim();
        if !headers.iter().any(|h| h == header) {
            return Err(XrefError::Mapping(format!("見出し '{}' は表にありません", header)));
        }
        log::debug!("override {} -> {}", field, header);
        mapping.bind(field, header);
    }

    for field in unmap {
        let field: CanonicalField = field.parse().map_err(XrefError::Mapping)?;
        mapping.unbind(field);
    }
    Ok(())
}

/// 割り当てを一覧表示
pub fn print_mapping(mapping: &ColumnMapping) {
    for field in CanonicalField::ALL {
        match mapping.get(field) {
            Some(header) => println!("  {:<18} ← {}", field.label(), header),
            None => println!("  {:<18}   -", field.label()),
        }
    }
    for (header, fields) in mapping.shared_headers() {
        let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
        println!("  ⚠ 見出し '{}' が複数のフィールドに割り当てられています: {}", header, names.join(", "));
    }
}

/// フィールドごとに見出しを選び直す
pub fn adjust_interactively(mapping: &mut ColumnMapping, headers: &[String]) -> Result<()> {
    let mut choices: Vec<&str> = vec![UNASSIGNED];
    choices.extend(headers.iter().map(String::as_str));

    for field in CanonicalField::ALL {
        let current = mapping
            .get(field)
            .and_then(|h| headers.iter().position(|x| x == h))
            .map(|i| i + 1)
            .unwrap_or(0);

        let selected = Select::new()
            .with_prompt(field.label())
            .items(&choices)
            .default(current)
            .interact()
            .map_err(|e| XrefError::Prompt(e.to_string()))?;

        if selected == 0 {
            mapping.unbind(field);
        } else {
            mapping.bind(field, headers[selected - 1].clone());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xref_common::auto_detect_columns;

    fn headers() -> Vec<String> {
        ["Type", "Mfr", "Brightness", "Color Temp"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_apply_overrides() {
        let headers = headers();
        let mut mapping = auto_detect_columns(&headers);
        assert_eq!(mapping.get(CanonicalField::Lumens), None);

        apply_overrides(
            &mut mapping,
            &headers,
            &["lumens=Brightness".to_string()],
            &["cct".to_string()],
        )
        .unwrap();

        assert_eq!(mapping.get(CanonicalField::Lumens), Some("Brightness"));
        assert_eq!(mapping.get(CanonicalField::Cct), None);
    }

    #[test]
    fn test_override_rejects_unknown_header_and_field() {
        let headers = headers();
        let mut mapping = ColumnMapping::new();
        assert!(matches!(
            apply_overrides(&mut mapping, &headers, &["lumens=Nope".to_string()], &[]),
            Err(XrefError::Mapping(_))
        ));
        assert!(matches!(
            apply_overrides(&mut mapping, &headers, &["glow=Brightness".to_string()], &[]),
            Err(XrefError::Mapping(_))
        ));
        assert!(matches!(
            apply_overrides(&mut mapping, &headers, &["lumens".to_string()], &[]),
            Err(XrefError::Mapping(_))
        ));
    }
}
