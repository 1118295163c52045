//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 表として読み込めない、または行が1つもない
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Workflow error: {0}")]
    Workflow(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
