use crate::core::gallery::Project;
use crate::core::navigation::NavLink;
use crate::domain::icons::IconKind;
use crate::utils::error::{FolioError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: IconKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub icon: IconKind,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

impl ContactDetails {
    /// 去掉空白後的 `tel:` 連結
    pub fn phone_href(&self) -> String {
        let digits: String = self.phone.split_whitespace().collect();
        format!("tel:{}", digits)
    }

    pub fn mail_href(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AboutTab {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<String>,
}

/// 頁面要呈現的所有內容，從 TOML 檔案載入
#[derive(Debug, Clone, Deserialize)]
pub struct SiteContent {
    pub nav_links: Vec<NavLink>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub about_tabs: Vec<AboutTab>,
    pub contact: Option<ContactDetails>,
}

impl SiteContent {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FolioError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 依導覽順序的區塊 id，即 scroll-spy 認得的集合
    pub fn section_ids(&self) -> Vec<String> {
        self.nav_links
            .iter()
            .map(|link| link.section_id().to_string())
            .collect()
    }

    pub fn about_tab_names(&self) -> Vec<String> {
        self.about_tabs.iter().map(|tab| tab.name.clone()).collect()
    }

    /// 無法對應到已知圖示的數量
    pub fn fallback_icon_count(&self) -> usize {
        self.socials
            .iter()
            .map(|s| s.icon)
            .chain(self.services.iter().map(|s| s.icon))
            .chain(
                self.contact
                    .iter()
                    .flat_map(|c| c.socials.iter().map(|s| s.icon)),
            )
            .filter(IconKind::is_fallback)
            .count()
    }
}

impl Validate for SiteContent {
    fn validate(&self) -> Result<()> {
        validate_positive_number("nav_links", self.nav_links.len(), 1)?;

        let mut seen = HashSet::new();
        for link in &self.nav_links {
            validate_non_empty_string("nav_links.path", link.section_id())?;
            if !seen.insert(link.section_id()) {
                return Err(FolioError::InvalidConfigValueError {
                    field: "nav_links.path".to_string(),
                    value: link.path.clone(),
                    reason: "Duplicate section id".to_string(),
                });
            }
        }

        let mut project_ids = HashSet::new();
        for project in &self.projects {
            if !project_ids.insert(project.id) {
                return Err(FolioError::InvalidConfigValueError {
                    field: "projects.id".to_string(),
                    value: project.id.to_string(),
                    reason: "Duplicate project id".to_string(),
                });
            }
        }

        let fallbacks = self.fallback_icon_count();
        if fallbacks > 0 {
            tracing::warn!("{} icon name(s) not recognised, rendering fallback", fallbacks);
        }
        Ok(())
    }
}
