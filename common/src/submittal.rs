//! サブミッタル（承認用一覧）の行モデル
//!
//! 指定品と承認済み代替品を1行にまとめる。性能値は承認済み製品を優先し、
//! なければ指定品の値を使う。xlsx / CSV 出力はこの行モデルを共通で使う。

use crate::catalog::Catalog;
use crate::project::Project;
use crate::types::Product;

pub const SUBMITTAL_HEADING: &str = "Lighting Submittal";
pub const MISSING: &str = "—";
pub const ON_CARD_TEXT: &str = "On line card - as specified";
pub const NO_ALTERNATIVE_TEXT: &str = "No alternative selected";

/// 列見出し
pub const SUBMITTAL_COLUMNS: &[&str] = &[
    "Type",
    "Specified",
    "Proposed Alternative",
    "Lumens",
    "CCT",
    "Wattage",
    "Mounting",
    "Qty",
];

/// 代替欄の内容
#[derive(Debug, Clone, PartialEq)]
pub enum Alternative {
    OnLineCard,
    Accepted { manufacturer: String, model_number: String },
    None,
}

impl std::fmt::Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alternative::OnLineCard => write!(f, "{}", ON_CARD_TEXT),
            Alternative::Accepted { manufacturer, model_number } => {
                write!(f, "{} {}", manufacturer, model_number)
            }
            Alternative::None => write!(f, "{}", NO_ALTERNATIVE_TEXT),
        }
    }
}

/// サブミッタル1行
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittalRow {
    pub type_designation: String,
    pub specified_manufacturer: String,
    pub specified_model: String,
    pub alternative: Alternative,
    pub lumens: String,
    pub cct: String,
    pub wattage: String,
    pub mounting: String,
    pub quantity: String,
}

impl SubmittalRow {
    /// 「指定品」欄（メーカー / 型番）
    pub fn specified(&self) -> String {
        match (self.specified_manufacturer.is_empty(), self.specified_model.is_empty()) {
            (false, false) => format!("{} / {}", self.specified_manufacturer, self.specified_model),
            (false, true) => self.specified_manufacturer.clone(),
            (true, false) => self.specified_model.clone(),
            (true, true) => MISSING.to_string(),
        }
    }

    /// 列見出しと同じ順のセル
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.type_designation.clone(),
            self.specified(),
            self.alternative.to_string(),
            self.lumens.clone(),
            self.cct.clone(),
            self.wattage.clone(),
            self.mounting.clone(),
            self.quantity.clone(),
        ]
    }
}

/// 値があれば単位を付けて表示、なければ "—"（0 も欠損扱い）
fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value.filter(|v| *v != 0.0) {
        Some(v) => format!("{}{}", v, unit),
        None => MISSING.to_string(),
    }
}

/// プロジェクトからサブミッタル行を作る（タイプ記号順、記号なしは末尾）
pub fn build_submittal(project: &Project, catalog: &Catalog) -> Vec<SubmittalRow> {
    let mut items: Vec<_> = project.items.iter().collect();
    items.sort_by(|a, b| match (&a.row.type_designation, &b.row.type_designation) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });

    items
        .into_iter()
        .map(|item| {
            let accepted: Option<&Product> = item
                .accepted_reference()
                .and_then(|cr| catalog.product(&cr.product_id));

            let alternative = if item.on_line_card {
                Alternative::OnLineCard
            } else if let Some(product) = accepted {
                Alternative::Accepted {
                    manufacturer: catalog
                        .manufacturer_name(&product.manufacturer_id)
                        .unwrap_or_default()
                        .to_string(),
                    model_number: product.model_number.clone(),
                }
            } else {
                if item.accepted_reference().is_some() {
                    log::warn!("item {}: accepted product is not in the catalog", item.id);
                }
                Alternative::None
            };

            let row = &item.row;
            let lumens = accepted.and_then(|p| p.lumens).or(row.lumens);
            let cct = accepted.and_then(|p| p.cct).or(row.cct);
            let wattage = accepted.and_then(|p| p.wattage).or(row.wattage);
            let mounting = accepted
                .and_then(|p| p.mounting_type.clone())
                .or_else(|| row.mounting_type.clone());

            SubmittalRow {
                type_designation: row.type_designation.clone().unwrap_or_else(|| MISSING.to_string()),
                specified_manufacturer: row.manufacturer.clone().unwrap_or_default(),
                specified_model: row.model.clone().unwrap_or_default(),
                alternative,
                lumens: lumens.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string()),
                cct: with_unit(cct, "K"),
                wattage: with_unit(wattage, "W"),
                mounting: mounting.unwrap_or_else(|| MISSING.to_string()),
                quantity: row.quantity.to_string(),
            }
        })
        .collect()
}
