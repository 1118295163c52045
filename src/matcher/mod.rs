//! 代替製品の照合実行
//!
//! ラインカード外の未処理行ごとに候補プールを採点し、上位N件を提案として記録する。
//! 行ごとの採点は独立しているので rayon で並列に実行し、結果は行順に反映する。

use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use xref_common::{
    score_candidates, Catalog, Error, LineCard, MatchOutcome, MatchStatus, Project, ScoredCandidate,
};

/// 照合を実行してプロジェクトを更新する
///
/// # Arguments
/// * `project` - 対象プロジェクト（更新される）
/// * `catalog` - 製品カタログ
/// * `line_card` - 代理店のラインカード
/// * `top_n` - 1行あたりの提案数
/// * `show_progress` - 進捗バーを表示する
pub fn run_matching(
    project: &mut Project,
    catalog: &Catalog,
    line_card: &LineCard,
    top_n: usize,
    show_progress: bool,
) -> Result<MatchOutcome> {
    if line_card.is_empty() {
        return Err(Error::Workflow("No manufacturers on your line card. Add some first.".into()).into());
    }

    let candidates = catalog.candidates(line_card);
    if candidates.is_empty() {
        return Err(Error::Workflow(
            "No products found from your line card manufacturers. Import some first.".into(),
        )
        .into());
    }
    log::info!("candidate pool: {} products", candidates.len());

    let pending = project.pending_ids();

    let progress = if show_progress {
        let pb = ProgressBar::new(pending.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let snapshot: &Project = project;
    let results: Vec<(usize, Vec<ScoredCandidate>)> = pending
        .par_iter()
        .filter_map(|&id| snapshot.item(id))
        .map(|item| {
            let mut scored = score_candidates(&item.row, &candidates);
            scored.truncate(top_n);
            log::debug!("item {}: {} proposals", item.id, scored.len());
            progress.inc(1);
            (item.id, scored)
        })
        .collect();
    progress.finish_and_clear();

    let mut outcome = MatchOutcome::default();
    for (id, top) in &results {
        match project.record_matches(*id, top)? {
            MatchStatus::Matched => outcome.matched += 1,
            _ => outcome.no_match += 1,
        }
    }
    outcome.accepted_on_card = project.accept_on_card();

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xref_common::{Product, ScheduleRow};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        let (acuity, _) = catalog.ensure_manufacturer("Acuity");
        let (other, _) = catalog.ensure_manufacturer("Other");
        for (id, mfr, lumens, discontinued) in [
            ("p1", &acuity, 2000.0, false),
            ("p2", &acuity, 1900.0, false),
            ("p3", &acuity, 2050.0, true),
            ("p4", &other, 2000.0, false),
        ] {
            catalog.products.push(Product {
                id: id.to_string(),
                manufacturer_id: mfr.clone(),
                model_number: id.to_uppercase(),
                lumens: Some(lumens),
                discontinued,
                ..Default::default()
            });
        }
        catalog
    }

    fn project() -> Project {
        let rows = vec![
            ScheduleRow { manufacturer: Some("Acuity".into()), lumens: Some(2000.0), ..Default::default() },
            ScheduleRow { manufacturer: Some("Lumenpulse".into()), lumens: Some(2000.0), ..Default::default() },
            ScheduleRow { manufacturer: Some("Lumenpulse".into()), lumens: Some(500.0), ..Default::default() },
        ];
        Project::from_rows("Test", rows, &LineCard::new(["Acuity"]))
    }

    #[test]
    fn test_run_matching() {
        let mut p = project();
        let outcome = run_matching(&mut p, &catalog(), &LineCard::new(["Acuity"]), 1, false).unwrap();

        assert_eq!(outcome, MatchOutcome { matched: 1, no_match: 1, accepted_on_card: 1 });
        let item = p.item(2).unwrap();
        assert_eq!(item.cross_references.len(), 1);
        assert_eq!(item.cross_references[0].product_id, "p1");
        assert_eq!(item.cross_references[0].match_score, 30);
        assert_eq!(p.item(3).unwrap().match_status, MatchStatus::NoMatch);
        assert_eq!(p.item(1).unwrap().match_status, MatchStatus::Accepted);
    }

    #[test]
    fn test_run_matching_is_not_repeated() {
        let mut p = project();
        let card = LineCard::new(["Acuity"]);
        run_matching(&mut p, &catalog(), &card, 3, false).unwrap();
        let again = run_matching(&mut p, &catalog(), &card, 3, false).unwrap();
        assert_eq!(again, MatchOutcome::default());
        assert_eq!(p.item(2).unwrap().cross_references.len(), 2);
    }

    #[test]
    fn test_run_matching_requires_line_card() {
        let mut p = project();
        let err = run_matching(&mut p, &catalog(), &LineCard::default(), 3, false).unwrap_err();
        assert!(err.to_string().contains("line card"));
    }

    #[test]
    fn test_run_matching_requires_candidates() {
        let mut p = project();
        let err = run_matching(&mut p, &Catalog::default(), &LineCard::new(["Acuity"]), 3, false).unwrap_err();
        assert!(err.to_string().contains("No products found"));
    }
}
