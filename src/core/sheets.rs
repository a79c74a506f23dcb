// 以 service account 驗證的 Google Sheets append client
//
// 流程：
// 1. 用 service account 私鑰簽 RS256 JWT assertion
// 2. 到 token URI 換取短期 access token
// 3. 以 `values:append` 寫入 `<sheet>!A:D`
//
// access token 在到期前重複使用；失敗不重試，直接回傳給呼叫端

use crate::domain::model::ContactRow;
use crate::domain::ports::SheetSink;
use crate::utils::error::{FolioError, Result};
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// assertion 有效一小時 (Google 接受的上限)
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// 在 token 到期前這麼久就重新取得
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);
/// 單次呼叫 token 或 Sheets 端點的時間上限
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SheetsSettings {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub client_email: String,
    pub private_key_pem: String,
    pub token_uri: String,
    pub base_url: String,
}

impl SheetsSettings {
    /// 涵蓋四個欄位的 A1 範圍
    pub fn range(&self) -> String {
        format!("{}!A:D", self.sheet_name)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// OAuth 錯誤內容，例如 `{"error":"invalid_grant","error_description":"..."}`
#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Serialize)]
struct AppendBody {
    values: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub struct GoogleSheets {
    client: Client,
    settings: SheetsSettings,
    signing_key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheets {
    /// 私鑰不是可用的 RSA PEM 時立即失敗
    pub fn new(settings: SheetsSettings) -> Result<Self> {
        let signing_key = EncodingKey::from_rsa_pem(settings.private_key_pem.as_bytes())?;
        Ok(Self {
            client: http_client(DEFAULT_REQUEST_TIMEOUT)?,
            settings,
            signing_key,
            token: Mutex::new(None),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = http_client(timeout)?;
        Ok(self)
    }

    pub fn settings(&self) -> &SheetsSettings {
        &self.settings
    }

    fn signed_assertion(&self) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.settings.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.settings.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.signing_key,
        )?)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let assertion = self.signed_assertion()?;
        let request = TokenRequest {
            grant_type: JWT_BEARER_GRANT,
            assertion: &assertion,
        };

        tracing::debug!("Requesting access token from {}", self.settings.token_uri);
        let response = self
            .client
            .post(&self.settings.token_uri)
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<OAuthError>(&body) {
                Ok(err) => format!(
                    "{}: {}",
                    err.error,
                    err.error_description.unwrap_or_default()
                ),
                Err(_) => format!("HTTP {}: {}", status, body),
            };
            return Err(FolioError::AuthError { message });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        Ok(CachedToken {
            access_token: token.access_token,
            refresh_at: Instant::now() + lifetime,
        })
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    fn append_url(&self) -> Result<url::Url> {
        let base = format!(
            "{}/spreadsheets/{}/values/",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.spreadsheet_id
        );
        let mut url = url::Url::parse(&base).map_err(|e| FolioError::InvalidConfigValueError {
            field: "sheets_base_url".to_string(),
            value: base.clone(),
            reason: e.to_string(),
        })?;
        // 工作表名稱可能有空白，push() 會處理跳脫
        url.path_segments_mut()
            .map_err(|_| FolioError::ConfigError {
                message: "sheets_base_url cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .push(&format!("{}:append", self.settings.range()));
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }
}

#[async_trait]
impl SheetSink for GoogleSheets {
    async fn append_row(&self, row: ContactRow) -> Result<()> {
        let token = self.access_token().await?;
        let url = self.append_url()?;
        let body = AppendBody {
            values: vec![row.into_values()],
        };

        tracing::debug!("Appending row to {}", self.settings.range());
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                // 清掉快取，下次請求重新驗證
                *self.token.lock().await = None;
            }
            return Err(FolioError::SheetsApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
