pub mod content;
pub mod relay;
#[cfg(feature = "cli")]
pub mod server;

pub use content::SiteContent;
pub use relay::{RelayConfig, RelayMode};
#[cfg(feature = "cli")]
pub use server::ServerConfig;
