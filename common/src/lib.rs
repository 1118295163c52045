//! Luminaire cross-reference common library
//!
//! スケジュール取り込み（列検出・型変換）、代替製品の採点、
//! カタログ・プロジェクトのワークフローを提供する。ファイルI/Oは持たない。

pub mod error;
pub mod fields;
pub mod columns;
pub mod coerce;
pub mod types;
pub mod scoring;
pub mod catalog;
pub mod project;
pub mod submittal;
pub mod export;

pub use error::{Error, Result};
pub use fields::CanonicalField;
pub use columns::{auto_detect_columns, ColumnMapping, RawRow, RawTable};
pub use coerce::{apply_mapping, parse_cct, parse_numeric};
pub use types::{Manufacturer, Product, ScheduleRow, ScoredCandidate};
pub use scoring::{normalize, score_candidate, score_candidates, ScoreBreakdown};
pub use catalog::{Catalog, ImportSummary, LineCard};
pub use project::{CrossReference, MatchOutcome, MatchStatus, Project, ProjectSummary, ProposalStatus, ScheduleItem};
pub use submittal::{build_submittal, SubmittalRow};
