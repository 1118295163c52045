//! 共有データ型
//!
//! - ScheduleRow: 列マッピング適用後の正規化済みスケジュール行
//! - Manufacturer / Product: 製品カタログ
//! - ScoredCandidate: 採点済みの代替候補

use serde::{Deserialize, Serialize};

/// 正規化済みスケジュール行
///
/// 数値は `None`（欠損）と 0 を区別する。文字列は trim 済みで空にはならない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRow {
    pub type_designation: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub lumens: Option<f64>,
    pub cct: Option<f64>,
    pub wattage: Option<f64>,
    pub mounting_type: Option<String>,
    pub voltage: Option<String>,
    pub lamp_type: Option<String>,
    pub application: Option<String>,
    pub dimming_protocol: Option<String>,
    pub cri: Option<f64>,
    pub notes: Option<String>,
    pub quantity: f64,
}

impl Default for ScheduleRow {
    fn default() -> Self {
        Self {
            type_designation: None,
            manufacturer: None,
            model: None,
            description: None,
            lumens: None,
            cct: None,
            wattage: None,
            mounting_type: None,
            voltage: None,
            lamp_type: None,
            application: None,
            dimming_protocol: None,
            cri: None,
            notes: None,
            quantity: 1.0,
        }
    }
}

/// メーカー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// カタログ製品
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub manufacturer_id: String,
    pub model_number: String,
    pub category: Option<String>,
    pub form_factor: Option<String>,
    pub lumens: Option<f64>,
    pub cct: Option<f64>,
    pub wattage: Option<f64>,
    pub voltage: Option<String>,
    pub mounting_type: Option<String>,
    pub cri: Option<f64>,
    pub dimming_protocol: Option<String>,
    pub description: Option<String>,
    pub discontinued: bool,
}

/// 採点済み候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub product: Product,
    /// 0〜100
    pub score: u32,
    /// 一致した基準の説明（". " 区切り）
    pub rationale: String,
}
