//! Centralized application directory paths for munjiz.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/munjiz/` | `~/.local/share/munjiz/` |
//! | Config | `~/Library/Application Support/munjiz/` | `~/.config/munjiz/` |
//!
//! # Environment Overrides
//!
//! - `MUNJIZ_DATA_DIR`: overrides [`data_dir`]
//! - `MUNJIZ_CONFIG_DIR`: overrides [`config_dir`]

use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "munjiz";

/// Application data root directory.
///
/// Holds the persisted document and the activation marker.
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve_dir(
        std::env::var_os("MUNJIZ_DATA_DIR"),
        dirs::data_dir(),
        "/tmp/munjiz-data",
    )
}

/// Application config directory (`config.toml`).
#[must_use]
pub fn config_dir() -> PathBuf {
    resolve_dir(
        std::env::var_os("MUNJIZ_CONFIG_DIR"),
        dirs::config_dir(),
        "/tmp/munjiz-config",
    )
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Directory holding one file per storage key (`data_dir()/store/`).
#[must_use]
pub fn store_dir() -> PathBuf {
    data_dir().join("store")
}

fn resolve_dir(override_dir: Option<OsString>, platform: Option<PathBuf>, fallback: &str) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }
    platform
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(fallback))
}
