pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::ServerConfig;
pub use config::{RelayConfig, RelayMode, SiteContent};

pub use core::{scroll_spy::ScrollSpy, sheets::GoogleSheets, submission::ContactForm};
pub use utils::error::{FolioError, Result};
