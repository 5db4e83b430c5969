pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;
pub use crate::config::AppConfig;

pub use crate::core::{
    cycle::AlertEngine, fetcher::SerpApiFetcher, notifier::DiscordNotifier,
    seen_store::FileSeenStore,
};
pub use crate::utils::error::{AlertError, Result};
