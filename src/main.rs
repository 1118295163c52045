use clap::Parser;
use luminaire_xref::{cli, config, error, export, ingest, mapping, matcher, store};
use cli::{CatalogAction, Cli, Commands};
use config::Config;
use error::{Result, XrefError};
use std::path::{Path, PathBuf};
use xref_common::{apply_mapping, auto_detect_columns, build_submittal, MatchStatus, Project, ProposalStatus};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = Config::load()?;

    match cli.command {
        Commands::Detect { file } => {
            println!("🔍 luminaire-xref - 列検出\n");
            let table = ingest::parse_table(&file)?;
            println!("✔ {}行 / {}列を読み込み\n", table.len(), table.headers.len());

            let mapping = auto_detect_columns(&table.headers);
            mapping::print_mapping(&mapping);
        }

        Commands::Ingest { file, output, name, map, unmap, interactive } => {
            println!("📥 luminaire-xref - スケジュール取り込み\n");

            // 1. 表の読み込み
            println!("[1/3] 表を読み込み中...");
            let table = ingest::parse_table(&file)?;
            println!("✔ {}行を検出\n", table.len());

            // 2. 列の割り当て
            println!("[2/3] 列を割り当て中...");
            let mut mapping = auto_detect_columns(&table.headers);
            mapping::apply_overrides(&mut mapping, &table.headers, &map, &unmap)?;
            if interactive {
                mapping::adjust_interactively(&mut mapping, &table.headers)?;
            }
            for (header, fields) in mapping.shared_headers() {
                log::warn!("header '{}' is bound to {} fields", header, fields.len());
            }
            mapping::print_mapping(&mapping);
            println!("✔ {}フィールドを割り当て\n", mapping.len());

            // 3. プロジェクト作成
            println!("[3/3] プロジェクトを保存中...");
            let rows = apply_mapping(&table.rows, &mapping);
            let project_name = name.unwrap_or_else(|| file_stem(&file));
            let mut project = Project::from_rows(&project_name, rows, &config.line_card);
            project.agency = Some(config.agency_name.clone());
            project.created_at = Some(chrono::Local::now().to_rfc3339());

            let output = output.unwrap_or_else(|| file.with_extension("project.json"));
            store::save_project(&project, &output)?;
            println!("✔ プロジェクトを保存: {}", output.display());
            println!("  {}", project.summary());

            println!("\n✅ 取り込み完了");
        }

        Commands::Catalog { action } => {
            let catalog_path = config.catalog_path()?;
            let mut catalog = store::load_catalog(&catalog_path)?;

            match action {
                CatalogAction::Import { input } => {
                    println!("📦 luminaire-xref - カタログ取り込み\n");
                    let table = ingest::parse_table(&input)?;
                    let summary = catalog.import_products(&table)?;
                    store::save_catalog(&catalog, &catalog_path)?;
                    println!("✔ {}", summary);
                    println!("✔ カタログを保存: {}", catalog_path.display());
                }
                CatalogAction::List => {
                    println!("カタログ: {}", catalog_path.display());
                    for mfr in &catalog.manufacturers {
                        let count = catalog
                            .products
                            .iter()
                            .filter(|p| p.manufacturer_id == mfr.id)
                            .count();
                        let mark = if config.line_card.contains(&mfr.name) { "★" } else { " " };
                        println!("  {} {} ({}製品)", mark, mfr.name, count);
                    }
                    println!("合計: {}メーカー / {}製品", catalog.manufacturers.len(), catalog.products.len());
                }
            }
        }

        Commands::LineCard { add, remove } => {
            let mut config = config;
            let changed = !add.is_empty() || !remove.is_empty();

            for name in &add {
                if config.line_card.add(name.as_str()) {
                    println!("✔ 追加: {}", name);
                } else {
                    println!("既に登録済み: {}", name);
                }
            }
            for name in &remove {
                if config.line_card.remove(name) {
                    println!("✔ 削除: {}", name);
                } else {
                    println!("登録されていません: {}", name);
                }
            }
            if changed {
                config.save()?;
            }

            println!("ラインカード:");
            if config.line_card.is_empty() {
                println!("  (未登録)");
            }
            for name in config.line_card.names() {
                println!("  - {}", name);
            }
        }

        Commands::Match { project: project_path, top_n } => {
            println!("🔗 luminaire-xref - 代替品照合\n");

            let mut project = store::load_project(&project_path)?;
            let catalog = store::load_catalog(&config.catalog_path()?)?;
            let top_n = top_n.unwrap_or(config.top_n);
            if top_n == 0 {
                return Err(XrefError::Config("top_n は1以上を指定してください".into()));
            }

            println!("[1/2] 照合中...");
            let outcome = matcher::run_matching(&mut project, &catalog, &config.line_card, top_n, true)?;
            println!(
                "✔ 提案あり {}行 / 該当なし {}行 / ラインカード承認 {}行\n",
                outcome.matched, outcome.no_match, outcome.accepted_on_card
            );

            println!("[2/2] 結果を保存中...");
            store::save_project(&project, &project_path)?;
            println!("✔ 結果を保存: {}", project_path.display());
            println!("  {}", project.summary());

            println!("\n✅ 照合完了");
        }

        Commands::Review { project: project_path, item, accept, reject } => {
            let mut project = store::load_project(&project_path)?;
            let catalog = store::load_catalog(&config.catalog_path()?)?;

            match (item, accept, reject) {
                (Some(id), Some(n), _) => {
                    let cr = project.accept(id, proposal_index(n)?)?;
                    println!("✔ 行{}: 提案#{}を承認 ({})", id, n, cr.product_id);
                    store::save_project(&project, &project_path)?;
                }
                (Some(id), None, Some(n)) => {
                    let cr = project.reject(id, proposal_index(n)?)?;
                    println!("✔ 行{}: 提案#{}を却下 ({})", id, n, cr.product_id);
                    store::save_project(&project, &project_path)?;
                }
                _ => {
                    let items: Vec<_> = project
                        .items
                        .iter()
                        .filter(|i| match item {
                            Some(id) => i.id == id,
                            None => i.match_status == MatchStatus::Matched,
                        })
                        .collect();
                    if items.is_empty() {
                        println!("確認待ちの行はありません");
                    }

                    for i in items {
                        println!(
                            "行{} [{}] {} / {} ({})",
                            i.id,
                            i.row.type_designation.as_deref().unwrap_or("-"),
                            i.row.manufacturer.as_deref().unwrap_or("-"),
                            i.row.model.as_deref().unwrap_or("-"),
                            i.match_status
                        );
                        for (n, cr) in i.cross_references.iter().enumerate() {
                            let (mfr, model) = catalog
                                .product(&cr.product_id)
                                .map(|p| {
                                    (
                                        catalog.manufacturer_name(&p.manufacturer_id).unwrap_or("?"),
                                        p.model_number.as_str(),
                                    )
                                })
                                .unwrap_or(("?", cr.product_id.as_str()));
                            let mark = match cr.status {
                                ProposalStatus::Proposed => " ",
                                ProposalStatus::Accepted => "✔",
                                ProposalStatus::Rejected => "✗",
                            };
                            println!("  {} #{} {} {} - {}点", mark, n + 1, mfr, model, cr.match_score);
                            if !cr.match_reasoning.is_empty() {
                                println!("      {}", cr.match_reasoning);
                            }
                        }
                    }
                }
            }
        }

        Commands::Status { project: project_path } => {
            let project = store::load_project(&project_path)?;
            println!("プロジェクト: {}", project.name);
            if let Some(agency) = &project.agency {
                println!("  代理店: {}", agency);
            }
            if let Some(created) = &project.created_at {
                println!("  作成日時: {}", created);
            }
            println!("  {}", project.summary());

            for i in &project.items {
                let best = i.cross_references.iter().map(|cr| cr.match_score).max();
                println!(
                    "  行{:<4} {:<8} {:<20} {}{}",
                    i.id,
                    i.row.type_designation.as_deref().unwrap_or("-"),
                    i.row.manufacturer.as_deref().unwrap_or("-"),
                    i.match_status,
                    best.map(|s| format!(" (最高 {}点)", s)).unwrap_or_default()
                );
            }
        }

        Commands::Submittal { project: project_path, format, output } => {
            println!("📄 luminaire-xref - サブミッタル出力\n");

            let project = store::load_project(&project_path)?;
            let catalog = store::load_catalog(&config.catalog_path()?)?;
            let rows = build_submittal(&project, &catalog);

            let output = output.unwrap_or_else(|| {
                project_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            let generated = chrono::Local::now().format("%Y-%m-%d").to_string();
            let stem = format!("{} Submittal", project.name);

            export::export_submittal(&rows, &project.name, &generated, &format, &output, &stem)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { show, agency, top_n, catalog } => {
            let mut config = config;
            let mut changed = false;

            if let Some(name) = agency {
                config.agency_name = name;
                println!("✔ 代理店名を設定しました");
                changed = true;
            }
            if let Some(n) = top_n {
                config.set_top_n(n)?;
                println!("✔ 提案数を設定しました");
                changed = true;
            }
            if let Some(path) = catalog {
                config.catalog_path = Some(path);
                println!("✔ カタログの場所を設定しました");
                changed = true;
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  代理店名: {}", config.agency_name);
                println!("  提案数: {}", config.top_n);
                println!("  カタログ: {}", config.catalog_path()?.display());
                println!("  ラインカード: {}", config.line_card.names().join(", "));
            }
        }
    }

    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 1始まりの提案番号を添字にする
fn proposal_index(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| XrefError::Config("提案番号は1から指定してください".into()))
}
