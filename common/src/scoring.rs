//! 代替製品の採点
//!
//! スケジュール行1件に対して候補製品を固定の重み付き基準で採点し、
//! 一致した基準の説明文とともに降順で返す。
//!
//! | 基準 | 重み |
//! |---|---|
//! | 取付方法 | 25 |
//! | CCT | 20 |
//! | 光束 | 20〜30（±10%以内で線形） |
//! | CRI | 15（候補が80以上） |
//! | 電圧 | 5 |
//! | 消費電力 | 5（±30%以内） |
//!
//! 副作用のない純粋関数。片側に値がない基準は0点になるだけで、候補は除外されない。

use crate::types::{Product, ScheduleRow, ScoredCandidate};
use serde::{Deserialize, Serialize};

pub const MOUNTING_WEIGHT: f64 = 25.0;
pub const CCT_WEIGHT: f64 = 20.0;
pub const LUMENS_MAX_WEIGHT: f64 = 30.0;
pub const LUMENS_EDGE_WEIGHT: f64 = 20.0;
pub const CRI_WEIGHT: f64 = 15.0;
pub const VOLTAGE_WEIGHT: f64 = 5.0;
pub const WATTAGE_WEIGHT: f64 = 5.0;

/// 光束の許容幅（±10%）
pub const LUMENS_TOLERANCE: f64 = 0.1;
/// CRIの合格ライン
pub const MIN_CRI: f64 = 80.0;
/// 消費電力の許容比率
pub const WATTAGE_RATIO_RANGE: (f64, f64) = (0.7, 1.3);

/// 採点基準（評価順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    MountingType,
    Cct,
    Lumens,
    Cri,
    Voltage,
    Wattage,
}

/// 1基準分の得点
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub points: f64,
    pub reason: String,
}

/// 1候補分の採点内訳
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub hits: Vec<CriterionScore>,
}

impl ScoreBreakdown {
    /// 丸め前の合計
    pub fn raw_total(&self) -> f64 {
        self.hits.iter().map(|h| h.points).sum()
    }

    /// 四捨五入した最終スコア
    pub fn score(&self) -> u32 {
        round_score(self.raw_total())
    }

    /// 一致した基準（評価順）
    pub fn criteria(&self) -> Vec<Criterion> {
        self.hits.iter().map(|h| h.criterion).collect()
    }

    pub fn rationale(&self) -> String {
        self.hits
            .iter()
            .map(|h| h.reason.as_str())
            .collect::<Vec<_>>()
            .join(". ")
    }
}

/// スコアの丸め
///
/// `f64::round` は0.5を0から遠い側に丸める。合計は常に非負なので四捨五入（half-up）になる。
pub fn round_score(total: f64) -> u32 {
    if total <= 0.0 || !total.is_finite() {
        return 0;
    }
    total.round() as u32
}

/// 比較用の正規化（小文字化し、英数字以外を除去）
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 0 や非有限値は欠損扱い
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

fn present_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 候補1件を採点する
pub fn score_candidate(item: &ScheduleRow, product: &Product) -> ScoreBreakdown {
    let mut hits = Vec::new();

    if let (Some(specified), Some(cand)) = (present_text(&item.mounting_type), present_text(&product.mounting_type)) {
        if normalize(specified) == normalize(cand) {
            hits.push(CriterionScore {
                criterion: Criterion::MountingType,
                points: MOUNTING_WEIGHT,
                reason: "Mounting type matches".to_string(),
            });
        }
    }

    if let (Some(specified), Some(cand)) = (present(item.cct), present(product.cct)) {
        if specified == cand {
            hits.push(CriterionScore {
                criterion: Criterion::Cct,
                points: CCT_WEIGHT,
                reason: format!("CCT matches ({}K)", cand),
            });
        }
    }

    if let (Some(specified), Some(cand)) = (present(item.lumens), present(product.lumens)) {
        if let Some(points) = lumens_points(cand / specified) {
            hits.push(CriterionScore {
                criterion: Criterion::Lumens,
                points,
                reason: format!(
                    "Lumens: {} vs {} specified ({}%)",
                    cand,
                    specified,
                    (cand / specified * 100.0).round()
                ),
            });
        }
    }

    // 仕様側のCRIとは比較しない
    if let Some(cri) = present(product.cri) {
        if cri >= MIN_CRI {
            hits.push(CriterionScore {
                criterion: Criterion::Cri,
                points: CRI_WEIGHT,
                reason: format!("CRI {}", cri),
            });
        }
    }

    if let (Some(specified), Some(cand)) = (present_text(&item.voltage), present_text(&product.voltage)) {
        if normalize(specified) == normalize(cand) {
            hits.push(CriterionScore {
                criterion: Criterion::Voltage,
                points: VOLTAGE_WEIGHT,
                reason: "Voltage matches".to_string(),
            });
        }
    }

    if let (Some(specified), Some(cand)) = (present(item.wattage), present(product.wattage)) {
        let ratio = cand / specified;
        let (low, high) = WATTAGE_RATIO_RANGE;
        if ratio >= low && ratio <= high {
            hits.push(CriterionScore {
                criterion: Criterion::Wattage,
                points: WATTAGE_WEIGHT,
                reason: format!("Wattage: {}W", cand),
            });
        }
    }

    ScoreBreakdown { hits }
}

/// 得点の丸め単位（浮動小数の誤差を落とす）
const POINTS_PRECISION: f64 = 1e9;

/// 光束比（候補 / 仕様）に対する得点
///
/// 許容幅の端でちょうど20点、完全一致で30点。範囲外は None。
pub fn lumens_points(ratio: f64) -> Option<f64> {
    if !(ratio >= 1.0 - LUMENS_TOLERANCE && ratio <= 1.0 + LUMENS_TOLERANCE) {
        return None;
    }
    let proximity = (1.0 - (1.0 - ratio).abs() / LUMENS_TOLERANCE).clamp(0.0, 1.0);
    let points = LUMENS_EDGE_WEIGHT + proximity * (LUMENS_MAX_WEIGHT - LUMENS_EDGE_WEIGHT);
    Some((points * POINTS_PRECISION).round() / POINTS_PRECISION)
}

/// 候補群を採点して降順に並べる
///
/// 0点の候補は除外する。同点は入力順を保つ。
pub fn score_candidates(item: &ScheduleRow, candidates: &[Product]) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter_map(|product| {
            let breakdown = score_candidate(item, product);
            let score = breakdown.score();
            log::trace!("{} scored {} on {:?}", product.id, score, breakdown.criteria());
            if score == 0 {
                return None;
            }
            Some(ScoredCandidate {
                product: product.clone(),
                score,
                rationale: breakdown.rationale(),
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
