//! プロジェクト（スケジュール）と代替提案のワークフロー
//!
//! ## 状態遷移
//! - 取り込み直後は全行 `pending`
//! - 照合実行: ラインカード上のメーカー → `accepted`、
//!   それ以外は提案あり → `matched` / 提案なし → `no_match`
//! - 提案の承認 → 行は `accepted`、他の提案は `rejected`

use crate::catalog::LineCard;
use crate::error::{Error, Result};
use crate::types::{ScheduleRow, ScoredCandidate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// スケジュール行の照合状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Matched,
    NoMatch,
    Accepted,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "Pending"),
            MatchStatus::Matched => write!(f, "Needs Review"),
            MatchStatus::NoMatch => write!(f, "No Match"),
            MatchStatus::Accepted => write!(f, "Accepted"),
        }
    }
}

/// 提案の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Proposed,
    Accepted,
    Rejected,
}

/// 代替提案（クロスリファレンス）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub product_id: String,
    pub match_score: u32,
    pub match_reasoning: String,
    #[serde(default)]
    pub status: ProposalStatus,
}

impl From<&ScoredCandidate> for CrossReference {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            product_id: candidate.product.id.clone(),
            match_score: candidate.score,
            match_reasoning: candidate.rationale.clone(),
            status: ProposalStatus::Proposed,
        }
    }
}

/// プロジェクト内のスケジュール行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: usize,
    #[serde(flatten)]
    pub row: ScheduleRow,
    #[serde(default)]
    pub on_line_card: bool,
    #[serde(default)]
    pub match_status: MatchStatus,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
}

impl ScheduleItem {
    pub fn accepted_reference(&self) -> Option<&CrossReference> {
        self.cross_references
            .iter()
            .find(|cr| cr.status == ProposalStatus::Accepted)
    }

    /// 照合対象か（未処理かつラインカード外）
    pub fn needs_alternative(&self) -> bool {
        !self.on_line_card && self.match_status == MatchStatus::Pending
    }
}

/// 件数の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectSummary {
    pub items: usize,
    pub on_card: usize,
    /// matched + accepted
    pub matched: usize,
    pub pending: usize,
    pub no_match: usize,
}

impl std::fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} items, {} on card, {} matched, {} pending, {} no match",
            self.items, self.on_card, self.matched, self.pending, self.no_match
        )
    }
}

/// 照合実行の結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matched: usize,
    pub no_match: usize,
    pub accepted_on_card: usize,
}

/// プロジェクト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub items: Vec<ScheduleItem>,
}

impl Project {
    /// 正規化済みの行からプロジェクトを作成する
    ///
    /// 指定メーカーがラインカードにある行は `on_line_card` になる。
    pub fn from_rows(name: &str, rows: Vec<ScheduleRow>, line_card: &LineCard) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_PROJECT_NAME.to_string(),
            n => n.to_string(),
        };

        let items = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| ScheduleItem {
                id: i + 1,
                on_line_card: row
                    .manufacturer
                    .as_deref()
                    .map(|m| line_card.contains(m))
                    .unwrap_or(false),
                row,
                match_status: MatchStatus::Pending,
                cross_references: Vec::new(),
            })
            .collect();

        Self {
            name,
            agency: None,
            created_at: None,
            items,
        }
    }

    pub fn item(&self, id: usize) -> Option<&ScheduleItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn item_mut(&mut self, id: usize) -> Result<&mut ScheduleItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::Workflow(format!("schedule item {} not found", id)))
    }

    /// 照合対象の行ID
    pub fn pending_ids(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|i| i.needs_alternative())
            .map(|i| i.id)
            .collect()
    }

    /// 採点結果（上位N件に切り詰め済み）を反映する
    pub fn record_matches(&mut self, id: usize, top: &[ScoredCandidate]) -> Result<MatchStatus> {
        let item = self.item_mut(id)?;
        if top.is_empty() {
            item.match_status = MatchStatus::NoMatch;
        } else {
            item.cross_references.extend(top.iter().map(CrossReference::from));
            item.match_status = MatchStatus::Matched;
        }
        Ok(item.match_status)
    }

    /// ラインカード上の未処理行をそのまま承認する
    pub fn accept_on_card(&mut self) -> usize {
        let mut count = 0;
        for item in self
            .items
            .iter_mut()
            .filter(|i| i.on_line_card && i.match_status == MatchStatus::Pending)
        {
            item.match_status = MatchStatus::Accepted;
            count += 1;
        }
        count
    }

    /// 提案を承認する（他の提案は却下）
    pub fn accept(&mut self, id: usize, proposal: usize) -> Result<&CrossReference> {
        let item = self.item_mut(id)?;
        if proposal >= item.cross_references.len() {
            return Err(Error::Workflow(format!(
                "item {} has no proposal #{}",
                id,
                proposal + 1
            )));
        }

        for (i, cr) in item.cross_references.iter_mut().enumerate() {
            cr.status = if i == proposal {
                ProposalStatus::Accepted
            } else {
                ProposalStatus::Rejected
            };
        }
        item.match_status = MatchStatus::Accepted;
        Ok(&item.cross_references[proposal])
    }

    /// 提案を却下する（行の状態は変えない）
    pub fn reject(&mut self, id: usize, proposal: usize) -> Result<&CrossReference> {
        let item = self.item_mut(id)?;
        let cr = item.cross_references.get_mut(proposal).ok_or_else(|| {
            Error::Workflow(format!("item {} has no proposal #{}", id, proposal + 1))
        })?;
        cr.status = ProposalStatus::Rejected;
        Ok(cr)
    }

    pub fn summary(&self) -> ProjectSummary {
        let count = |status: MatchStatus| self.items.iter().filter(|i| i.match_status == status).count();
        ProjectSummary {
            items: self.items.len(),
            on_card: self.items.iter().filter(|i| i.on_line_card).count(),
            matched: count(MatchStatus::Matched) + count(MatchStatus::Accepted),
            pending: count(MatchStatus::Pending),
            no_match: count(MatchStatus::NoMatch),
        }
    }
}
