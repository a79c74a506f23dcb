use crate::core::sheets::{SheetsSettings, GOOGLE_SHEETS_BASE_URL, GOOGLE_TOKEN_URI};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Contact relay: appends portfolio contact messages to a spreadsheet")]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    #[arg(long, env = "GOOGLE_SHEETS_ID")]
    pub spreadsheet_id: Option<String>,

    #[arg(long, env = "SHEET_NAME", default_value = "Sheet1")]
    pub sheet_name: String,

    #[arg(long, env = "GOOGLE_CLIENT_EMAIL")]
    pub client_email: Option<String>,

    #[arg(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true, allow_hyphen_values = true)]
    pub private_key: Option<String>,

    #[arg(long, env = "GOOGLE_TOKEN_URI", default_value = GOOGLE_TOKEN_URI)]
    pub token_uri: String,

    #[arg(long, env = "GOOGLE_SHEETS_BASE_URL", default_value = GOOGLE_SHEETS_BASE_URL)]
    pub sheets_base_url: String,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            crate::utils::error::FolioError::InvalidConfigValueError {
                field: "host".to_string(),
                value: self.host.clone(),
                reason: format!("{}", e),
            }
        })
    }

    /// 取得 Sheets client 的憑證與目標工作表
    pub fn sheets_settings(&self) -> Result<SheetsSettings> {
        let spreadsheet_id = validate_required_field("spreadsheet_id", &self.spreadsheet_id)?;
        let client_email = validate_required_field("client_email", &self.client_email)?;
        let private_key = validate_required_field("private_key", &self.private_key)?;

        Ok(SheetsSettings {
            spreadsheet_id: spreadsheet_id.clone(),
            sheet_name: self.sheet_name.clone(),
            client_email: client_email.clone(),
            private_key_pem: normalize_private_key(private_key),
            token_uri: self.token_uri.clone(),
            base_url: self.sheets_base_url.clone(),
        })
    }
}

/// .env 裡的 PEM 通常是字面上的 `\n`，換回真正的換行
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        let settings = self.sheets_settings()?;
        validate_non_empty_string("spreadsheet_id", &settings.spreadsheet_id)?;
        validate_non_empty_string("sheet_name", &settings.sheet_name)?;
        validate_non_empty_string("client_email", &settings.client_email)?;
        validate_url("token_uri", &settings.token_uri)?;
        validate_url("sheets_base_url", &settings.base_url)?;

        if !settings.private_key_pem.contains("PRIVATE KEY") {
            return Err(crate::utils::error::FolioError::InvalidConfigValueError {
                field: "private_key".to_string(),
                value: "<redacted>".to_string(),
                reason: "Expected a PEM encoded private key".to_string(),
            });
        }

        tracing::info!("✅ Server configuration validation passed");
        Ok(())
    }
}
