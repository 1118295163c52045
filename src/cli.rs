use crate::export::SubmittalFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xref")]
#[command(about = "照明器具スケジュールのクロスリファレンス・サブミッタル作成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 表ファイルの列を自動判定して表示
    Detect {
        /// CSV/xlsx ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 器具スケジュールを取り込んでプロジェクトJSONを作成
    Ingest {
        /// CSV/xlsx ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 出力プロジェクトJSON（デフォルト: 入力ファイル名.project.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// プロジェクト名
        #[arg(short, long)]
        name: Option<String>,

        /// 列の割り当てを上書き（field=見出し、複数可）
        #[arg(short, long = "map")]
        map: Vec<String>,

        /// 割り当てを解除するフィールド（複数可）
        #[arg(long)]
        unmap: Vec<String>,

        /// 対話的に列の割り当てを調整
        #[arg(short, long)]
        interactive: bool,
    },

    /// 製品カタログ管理
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// ラインカード（取扱メーカー）を表示/編集
    LineCard {
        /// メーカーを追加（複数可）
        #[arg(long)]
        add: Vec<String>,

        /// メーカーを削除（複数可）
        #[arg(long)]
        remove: Vec<String>,
    },

    /// ラインカード外の行に代替品を照合
    Match {
        /// プロジェクトJSON
        #[arg(required = true)]
        project: PathBuf,

        /// 1行あたりの提案数（省略時は設定値）
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// 提案を確認・承認/却下
    Review {
        /// プロジェクトJSON
        #[arg(required = true)]
        project: PathBuf,

        /// 対象の行ID（省略時は確認待ちの一覧）
        #[arg(long)]
        item: Option<usize>,

        /// 承認する提案番号（1始まり）
        #[arg(long, requires = "item", conflicts_with = "reject")]
        accept: Option<usize>,

        /// 却下する提案番号（1始まり）
        #[arg(long, requires = "item")]
        reject: Option<usize>,
    },

    /// プロジェクトの集計を表示
    Status {
        /// プロジェクトJSON
        #[arg(required = true)]
        project: PathBuf,
    },

    /// サブミッタルを出力
    Submittal {
        /// プロジェクトJSON
        #[arg(required = true)]
        project: PathBuf,

        /// 出力形式 (xlsx/csv/both)
        #[arg(short, long, default_value = "xlsx")]
        format: SubmittalFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 代理店名を設定
        #[arg(long)]
        agency: Option<String>,

        /// 提案数の既定値を設定
        #[arg(long)]
        top_n: Option<usize>,

        /// カタログファイルの場所を設定
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// メーカーテンプレート（CSV/xlsx）から製品を取り込む
    Import {
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 登録済みのメーカーと製品数を表示
    List,
}
