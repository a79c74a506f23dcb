use crate::utils::error::{FolioError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayMode {
    /// 自家的 `/api/contact` 服務，JSON body
    #[default]
    Backend,
    /// 第三方表單腳本，form-encoded body，回應不可見
    Script,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayFile {
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub mode: RelayMode,
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl RelayConfig {
    pub fn new(mode: RelayMode, endpoint: impl Into<String>) -> Self {
        Self {
            mode,
            endpoint: endpoint.into(),
            timeout_seconds: None,
        }
    }

    /// 從 TOML 檔案載入 relay 設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        let file: RelayFile =
            toml::from_str(&processed_content).map_err(|e| FolioError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(file.relay)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

/// 替換環境變數 (例如 ${FOLIO_RELAY_ENDPOINT})，找不到的保留原樣
pub fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("relay.endpoint", &self.endpoint)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("relay.timeout_seconds", timeout, 1, 60)?;
        }
        Ok(())
    }
}
