mod config;
pub mod database;

pub use config::Config;
pub use database::{LeaderboardEntry, UserStore};

use std::path::PathBuf;

/// Returns the app data directory.
///
/// `STREAKTRACK_DATA_DIR` overrides the location outright (used by the CLI
/// e2e tests). Otherwise `~/.config/streaktrack/`, or `streaktrack-dev`
/// when `STREAKTRACK_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = if let Ok(custom) = std::env::var("STREAKTRACK_DATA_DIR") {
        PathBuf::from(custom)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("STREAKTRACK_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("streaktrack-dev")
        } else {
            base_dir.join("streaktrack")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
