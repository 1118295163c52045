use thiserror::Error;

#[derive(Error, Debug)]
pub enum XrefError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("列の割り当てが不正です: {0}")]
    Mapping(String),

    #[error(transparent)]
    Common(#[from] xref_common::Error),
}

pub type Result<T> = std::result::Result<T, XrefError>;
