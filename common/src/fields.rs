//! 照明器具スケジュールの正規フィールド定義
//!
//! スプレッドシートの列はここで定義した15フィールドのいずれかに割り当てられる。
//! 順序は固定で、列検出・マッピング表示の順序に使われる。

use serde::{Deserialize, Serialize};

/// 正規フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    TypeDesignation,
    Manufacturer,
    Model,
    Description,
    Lumens,
    Cct,
    Wattage,
    MountingType,
    Voltage,
    LampType,
    Application,
    DimmingProtocol,
    Cri,
    Notes,
    Quantity,
}

impl CanonicalField {
    /// 固定順の全フィールド
    pub const ALL: [CanonicalField; 15] = [
        CanonicalField::TypeDesignation,
        CanonicalField::Manufacturer,
        CanonicalField::Model,
        CanonicalField::Description,
        CanonicalField::Lumens,
        CanonicalField::Cct,
        CanonicalField::Wattage,
        CanonicalField::MountingType,
        CanonicalField::Voltage,
        CanonicalField::LampType,
        CanonicalField::Application,
        CanonicalField::DimmingProtocol,
        CanonicalField::Cri,
        CanonicalField::Notes,
        CanonicalField::Quantity,
    ];

    /// snake_case のキー名
    pub fn key(&self) -> &'static str {
        match self {
            CanonicalField::TypeDesignation => "type_designation",
            CanonicalField::Manufacturer => "manufacturer",
            CanonicalField::Model => "model",
            CanonicalField::Description => "description",
            CanonicalField::Lumens => "lumens",
            CanonicalField::Cct => "cct",
            CanonicalField::Wattage => "wattage",
            CanonicalField::MountingType => "mounting_type",
            CanonicalField::Voltage => "voltage",
            CanonicalField::LampType => "lamp_type",
            CanonicalField::Application => "application",
            CanonicalField::DimmingProtocol => "dimming_protocol",
            CanonicalField::Cri => "cri",
            CanonicalField::Notes => "notes",
            CanonicalField::Quantity => "quantity",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::TypeDesignation => "Type / Tag",
            CanonicalField::Manufacturer => "Manufacturer",
            CanonicalField::Model => "Model / Catalog #",
            CanonicalField::Description => "Description",
            CanonicalField::Lumens => "Lumens",
            CanonicalField::Cct => "CCT",
            CanonicalField::Wattage => "Wattage",
            CanonicalField::MountingType => "Mounting Type",
            CanonicalField::Voltage => "Voltage",
            CanonicalField::LampType => "Lamp Type",
            CanonicalField::Application => "Application",
            CanonicalField::DimmingProtocol => "Dimming Protocol",
            CanonicalField::Cri => "CRI",
            CanonicalField::Notes => "Notes",
            CanonicalField::Quantity => "Quantity",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for CanonicalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        CanonicalField::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}
