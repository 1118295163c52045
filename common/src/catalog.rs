//! 製品カタログとラインカード
//!
//! カタログCSV（テンプレート列）からメーカー・製品を取り込む。
//! IDは名前・型番から計算するので、同じカタログを再取り込みしても重複しない。

use crate::coerce::{clean_text, parse_leading_number, parse_numeric};
use crate::columns::{RawRow, RawTable};
use crate::error::{Error, Result};
use crate::types::{Manufacturer, Product};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 取り込みテンプレートの列
pub const TEMPLATE_COLUMNS: &[&str] = &[
    "manufacturer",
    "model_number",
    "category",
    "form_factor",
    "lumens",
    "cct",
    "wattage",
    "voltage",
    "mounting_type",
    "cri",
    "dimming_protocol",
    "description",
    "discontinued",
];

const ID_LEN: usize = 16;

fn hashed_id(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.trim().to_lowercase().as_bytes());
        hasher.update([0u8]);
    }
    let digest = hex::encode(hasher.finalize());
    digest[..ID_LEN].to_string()
}

/// メーカー名からID（大文字小文字を区別しない）
pub fn manufacturer_id(name: &str) -> String {
    hashed_id(&[name])
}

/// メーカーIDと型番から製品ID
pub fn product_id(manufacturer_id: &str, model_number: &str) -> String {
    hashed_id(&[manufacturer_id, model_number])
}

/// 代理店が扱うメーカーの一覧
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCard {
    manufacturers: Vec<String>,
}

impl LineCard {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut card = Self::default();
        for name in names {
            card.add(name);
        }
        card
    }

    /// 追加（既にあれば false）
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into().trim().to_string();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.manufacturers.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.manufacturers.len();
        let key = name.trim().to_lowercase();
        self.manufacturers.retain(|m| m.to_lowercase() != key);
        self.manufacturers.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        self.manufacturers.iter().any(|m| m.to_lowercase() == key)
    }

    pub fn names(&self) -> &[String] {
        &self.manufacturers
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }
}

/// 取り込み結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// 取り込んだ製品数（置き換えを含む）
    pub imported: usize,
    /// CSVに含まれるメーカー数
    pub manufacturers_seen: usize,
    /// 新規作成したメーカー数
    pub manufacturers_created: usize,
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Imported {} products across {} manufacturers",
            self.imported, self.manufacturers_seen
        )?;
        if self.manufacturers_created > 0 {
            write!(f, " ({} new manufacturers created).", self.manufacturers_created)
        } else {
            write!(f, ".")
        }
    }
}

/// 製品カタログ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub manufacturers: Vec<Manufacturer>,
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn find_manufacturer(&self, name: &str) -> Option<&Manufacturer> {
        let key = name.trim().to_lowercase();
        self.manufacturers.iter().find(|m| m.name.to_lowercase() == key)
    }

    pub fn manufacturer_name(&self, id: &str) -> Option<&str> {
        self.manufacturers
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// メーカーを追加（既存なら既存のIDを返す）
    pub fn ensure_manufacturer(&mut self, name: &str) -> (String, bool) {
        if let Some(existing) = self.find_manufacturer(name) {
            return (existing.id.clone(), false);
        }
        let name = name.trim().to_string();
        let id = manufacturer_id(&name);
        self.manufacturers.push(Manufacturer {
            id: id.clone(),
            name,
            website: None,
        });
        self.manufacturers.sort_by_key(|m| m.name.to_lowercase());
        (id, true)
    }

    /// ラインカードのメーカーの現行製品（代替候補）
    pub fn candidates(&self, line_card: &LineCard) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| !p.discontinued)
            .filter(|p| {
                self.manufacturer_name(&p.manufacturer_id)
                    .map(|name| line_card.contains(name))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// テンプレート形式の表から製品を取り込む
    pub fn import_products(&mut self, table: &RawTable) -> Result<ImportSummary> {
        let columns = TemplateColumns::resolve(&table.headers);

        let mut mfr_names: Vec<String> = Vec::new();
        for row in &table.rows {
            if let Some(name) = columns.text(row, "manufacturer") {
                if !mfr_names.iter().any(|n| n.to_lowercase() == name.to_lowercase()) {
                    mfr_names.push(name);
                }
            }
        }

        if mfr_names.is_empty() {
            return Err(Error::Catalog(
                "No manufacturer names found. Ensure your CSV has a 'manufacturer' column.".into(),
            ));
        }

        let mut created = 0;
        for name in &mfr_names {
            if self.ensure_manufacturer(name).1 {
                log::info!("created manufacturer {}", name);
                created += 1;
            }
        }

        let mut products = Vec::new();
        for (i, row) in table.rows.iter().enumerate() {
            let (Some(mfr), Some(model)) = (columns.text(row, "manufacturer"), columns.text(row, "model_number")) else {
                log::warn!("catalog row {} skipped: manufacturer or model_number missing", i + 1);
                continue;
            };
            let Some(manufacturer) = self.find_manufacturer(&mfr) else {
                continue;
            };
            let manufacturer_id = manufacturer.id.clone();

            products.push(Product {
                id: product_id(&manufacturer_id, &model),
                manufacturer_id,
                model_number: model,
                category: columns.text(row, "category"),
                form_factor: columns.text(row, "form_factor"),
                lumens: columns.raw(row, "lumens").and_then(parse_numeric),
                cct: columns.raw(row, "cct").and_then(parse_numeric),
                wattage: columns.raw(row, "wattage").and_then(parse_numeric),
                voltage: columns.text(row, "voltage"),
                mounting_type: columns.text(row, "mounting_type"),
                cri: columns
                    .raw(row, "cri")
                    .and_then(parse_leading_number)
                    .filter(|v| *v != 0.0),
                dimming_protocol: columns.text(row, "dimming_protocol"),
                description: columns.text(row, "description"),
                discontinued: columns
                    .raw(row, "discontinued")
                    .map(|v| v.trim().eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            });
        }

        if products.is_empty() {
            return Err(Error::Catalog(
                "No valid product rows found. Check that 'manufacturer' and 'model_number' columns have data.".into(),
            ));
        }

        let imported = products.len();
        for product in products {
            match self.products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => self.products.push(product),
            }
        }

        Ok(ImportSummary {
            imported,
            manufacturers_seen: mfr_names.len(),
            manufacturers_created: created,
        })
    }
}

/// テンプレート列名 → 実際のヘッダー名（大文字小文字は無視）
struct TemplateColumns<'a> {
    headers: Vec<(&'static str, &'a str)>,
}

impl<'a> TemplateColumns<'a> {
    fn resolve(headers: &'a [String]) -> Self {
        let headers = TEMPLATE_COLUMNS
            .iter()
            .filter_map(|col| {
                headers
                    .iter()
                    .find(|h| h.trim().eq_ignore_ascii_case(col))
                    .map(|h| (*col, h.as_str()))
            })
            .collect();
        Self { headers }
    }

    fn raw<'r>(&self, row: &'r RawRow, column: &str) -> Option<&'r str> {
        self.headers
            .iter()
            .find(|(col, _)| *col == column)
            .and_then(|(_, header)| row.get(*header))
            .map(|v| v.as_str())
    }

    fn text(&self, row: &RawRow, column: &str) -> Option<String> {
        self.raw(row, column).and_then(clean_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        let grid = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        RawTable::from_grid(grid).unwrap()
    }

    fn sample() -> RawTable {
        table(&[
            &["manufacturer", "model_number", "lumens", "cct", "cri", "mounting_type", "discontinued"],
            &["Acuity", "LDN6", "2,000", "3500K", "90+", "Recessed", ""],
            &["acuity", "LDN4", "1000", "3000", "CRI 90", "Recessed", "TRUE"],
            &["Cooper", "", "1500", "", "", "", ""],
            &["Cooper", "HALO-6", "1500", "4000", "0", "Recessed", "false"],
        ])
    }

    #[test]
    fn test_import_products() {
        let mut catalog = Catalog::default();
        let summary = catalog.import_products(&sample()).unwrap();

        assert_eq!(summary.imported, 3);
        assert_eq!(summary.manufacturers_seen, 2);
        assert_eq!(summary.manufacturers_created, 2);
        assert_eq!(catalog.manufacturers.len(), 2);

        let ldn6 = catalog.products.iter().find(|p| p.model_number == "LDN6").unwrap();
        assert_eq!(ldn6.lumens, Some(2000.0));
        assert_eq!(ldn6.cct, Some(3500.0));
        assert_eq!(ldn6.cri, Some(90.0));
        assert!(!ldn6.discontinued);

        let ldn4 = catalog.products.iter().find(|p| p.model_number == "LDN4").unwrap();
        assert!(ldn4.discontinued);
        assert!(ldn4.cri.is_none());
        // 大文字小文字違いのメーカーは同一
        assert_eq!(ldn4.manufacturer_id, ldn6.manufacturer_id);

        let halo = catalog.products.iter().find(|p| p.model_number == "HALO-6").unwrap();
        assert!(halo.cri.is_none());
    }

    #[test]
    fn test_reimport_replaces() {
        let mut catalog = Catalog::default();
        catalog.import_products(&sample()).unwrap();
        let summary = catalog.import_products(&sample()).unwrap();

        assert_eq!(summary.manufacturers_created, 0);
        assert_eq!(catalog.products.len(), 3);
        assert_eq!(summary.to_string(), "Imported 3 products across 2 manufacturers.");
    }

    #[test]
    fn test_import_without_manufacturers() {
        let mut catalog = Catalog::default();
        let err = catalog
            .import_products(&table(&[&["model_number"], &["LDN6"]]))
            .unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_import_without_models() {
        let mut catalog = Catalog::default();
        let err = catalog
            .import_products(&table(&[&["Manufacturer", "model_number"], &["Acuity", ""]]))
            .unwrap_err();
        assert!(err.to_string().contains("No valid product rows"));
    }

    #[test]
    fn test_candidates_filter_line_card_and_discontinued() {
        let mut catalog = Catalog::default();
        catalog.import_products(&sample()).unwrap();

        let card = LineCard::new(["ACUITY"]);
        let candidates = catalog.candidates(&card);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].model_number, "LDN6");

        assert!(catalog.candidates(&LineCard::default()).is_empty());
    }

    #[test]
    fn test_line_card() {
        let mut card = LineCard::new(["Acuity", " acuity ", "Cooper"]);
        assert_eq!(card.names().len(), 2);
        assert!(card.contains("COOPER"));
        assert!(card.remove("cooper"));
        assert!(!card.contains("Cooper"));
        assert!(!card.add(""));
    }

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(manufacturer_id("Acuity"), manufacturer_id(" ACUITY"));
        assert_eq!(manufacturer_id("Acuity").len(), 16);
        assert_ne!(product_id("a", "LDN6"), product_id("a", "LDN4"));
    }
}
