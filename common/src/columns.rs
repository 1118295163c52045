//! 列の自動検出とマッピング
//!
//! 照明器具スケジュールのヘッダー名（"MFR", "CATALOG #", "LUMENS" など）を
//! 正規フィールドに割り当てる。パターンはフィールドごとに固定の順序付きリストで、
//! ヘッダー順に評価して最初に一致したヘッダーを採用する。

use crate::error::{Error, Result};
use crate::fields::CanonicalField;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 1行分のセル（ヘッダー名 → trim済みの値、空セルは ""）
pub type RawRow = HashMap<String, String>;

/// 読み込んだ表（ヘッダー + データ行）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// セルのグリッドから表を組み立てる
    ///
    /// 0行目をヘッダーとし、全セルが空の行は捨てる。
    /// ヘッダーが重複している場合は最初の列の値を採用する。
    pub fn from_grid(grid: Vec<Vec<String>>) -> Result<Self> {
        let mut lines = grid.into_iter();
        let headers: Vec<String> = match lines.next() {
            Some(header_row) => header_row.iter().map(|h| h.trim().to_string()).collect(),
            None => return Err(Error::Parse("table has no rows".into())),
        };

        let mut rows = Vec::new();
        let mut blank = 0usize;

        for cells in lines {
            let mut row = RawRow::with_capacity(headers.len());
            let mut has_data = false;

            for (i, header) in headers.iter().enumerate() {
                let value = cells.get(i).map(|c| c.trim()).unwrap_or("");
                if !value.is_empty() {
                    has_data = true;
                }
                row.entry(header.clone()).or_insert_with(|| value.to_string());
            }

            if has_data {
                rows.push(row);
            } else {
                blank += 1;
            }
        }

        if blank > 0 {
            log::debug!("skipped {} blank rows", blank);
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 正規フィールド → 元ヘッダー名 の対応
///
/// 自動検出後、人が `bind` / `unbind` で修正してから適用する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    bindings: BTreeMap<CanonicalField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.bindings.get(&field).map(|h| h.as_str())
    }

    /// フィールドをヘッダーに割り当てる（既存の割り当ては置き換え）
    pub fn bind(&mut self, field: CanonicalField, header: impl Into<String>) {
        self.bindings.insert(field, header.into());
    }

    pub fn unbind(&mut self, field: CanonicalField) -> Option<String> {
        self.bindings.remove(&field)
    }

    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    /// 割り当て済みのフィールド（固定順）
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.bindings.iter().map(|(f, h)| (*f, h.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 複数フィールドに割り当てられているヘッダー
    ///
    /// 検出は重複を防がないので、呼び出し側で確認・警告するために使う。
    pub fn shared_headers(&self) -> Vec<(String, Vec<CanonicalField>)> {
        let mut by_header: BTreeMap<&str, Vec<CanonicalField>> = BTreeMap::new();
        for (field, header) in &self.bindings {
            by_header.entry(header.as_str()).or_default().push(*field);
        }
        by_header
            .into_iter()
            .filter(|(_, fields)| fields.len() > 1)
            .map(|(header, fields)| (header.to_string(), fields))
            .collect()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

lazy_static! {
    /// フィールドごとの検出パターン（照明業界のスケジュール書式に合わせた固定表）
    static ref HEADER_PATTERNS: Vec<(CanonicalField, Vec<Regex>)> = vec![
        (CanonicalField::TypeDesignation, compile(&[
            r"^type$", r"type\s*(mark|designation|id)", r"^tag$", r"^mark$", r"fixture\s*type",
        ])),
        (CanonicalField::Manufacturer, compile(&[
            r"^mfr$", r"^manufacturer$", r"^mfg$", r"^brand$", r"manuf",
        ])),
        (CanonicalField::Model, compile(&[
            r"^model$", r"catalog\s*(#|num|no)", r"^cat\s*#?$", r"part\s*(#|num|no)",
            r"model\s*(#|num|no)", r"^product$", r"^part number$",
        ])),
        (CanonicalField::Description, compile(&[r"^desc(ription)?$", r"^fixture\s*desc"])),
        (CanonicalField::Lumens, compile(&[r"^lumens$", r"^lm$", r"lumen", r"^output$"])),
        (CanonicalField::Cct, compile(&[r"^cct$", r"color\s*temp", r"kelvin"])),
        (CanonicalField::Wattage, compile(&[r"^watt(s|age)?$", r"^w$", r"^power$"])),
        (CanonicalField::MountingType, compile(&[
            r"^mount(ing)?$", r"mount\s*type", r"installation",
        ])),
        (CanonicalField::Voltage, compile(&[r"^volt(s|age)?$", r"^v$"])),
        (CanonicalField::LampType, compile(&[
            r"^lamp\s*type$", r"^lamp$", r"^source$", r"^light\s*source$",
        ])),
        (CanonicalField::Application, compile(&[
            r"^application$", r"^app$", r"^use$", r"^fixture\s*category",
        ])),
        (CanonicalField::DimmingProtocol, compile(&[
            r"^dimm(ing|er)?$", r"dim\s*(type|protocol|method)", r"^control$",
        ])),
        (CanonicalField::Cri, compile(&[r"^cri$", r"color\s*render"])),
        (CanonicalField::Notes, compile(&[r"^notes?$", r"^remarks?$", r"^comment"])),
        (CanonicalField::Quantity, compile(&[r"^qty$", r"^quantity$", r"^count$", r"^#$"])),
    ];
}

/// ヘッダー名から列マッピングを自動検出する
///
/// 各フィールドについてヘッダーを先頭から順に調べ、
/// いずれかのパターンに一致した最初のヘッダーを割り当てる。
/// 一致するヘッダーがなければ未割り当てのまま。
pub fn auto_detect_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();

    for (field, patterns) in HEADER_PATTERNS.iter() {
        let hit = headers
            .iter()
            .map(|h| h.as_ref())
            .find(|header| patterns.iter().any(|p| p.is_match(header)));

        if let Some(header) = hit {
            log::debug!("detected {} <- {:?}", field, header);
            mapping.bind(*field, header);
        }
    }

    mapping
}
