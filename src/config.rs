use crate::error::{Result, XrefError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use xref_common::LineCard;

/// 設定ファイルの場所を上書きする環境変数
pub const CONFIG_ENV: &str = "LUMINAIRE_XREF_CONFIG";

const DEFAULT_AGENCY: &str = "My Agency";
const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub agency_name: String,
    /// 代理店が扱うメーカー
    pub line_card: LineCard,
    /// 1行あたりの提案数
    pub top_n: usize,
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agency_name: DEFAULT_AGENCY.into(),
            line_card: LineCard::default(),
            top_n: DEFAULT_TOP_N,
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| XrefError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("luminaire-xref"))
    }

    /// カタログファイルのパス（未設定なら設定ファイルと同じ場所）
    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.catalog_path {
            return Ok(path.clone());
        }
        let config_path = Self::config_path()?;
        let dir = config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(dir.join("catalog.json"))
    }

    pub fn set_top_n(&mut self, top_n: usize) -> Result<()> {
        if top_n == 0 {
            return Err(XrefError::Config("top_n は1以上を指定してください".into()));
        }
        self.top_n = top_n;
        Ok(())
    }
}
