//! Application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data | `~/Library/Application Support/tabscout/` | `~/.local/share/tabscout/` |
//! | Config | `~/Library/Application Support/tabscout/` | `~/.config/tabscout/` |
//!
//! `TABSCOUT_DATA_DIR` and `TABSCOUT_CONFIG_DIR` override the defaults.

use std::path::PathBuf;

/// Persistent data directory (history and recent tabs).
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TABSCOUT_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("tabscout"))
        .unwrap_or_else(|| PathBuf::from("/tmp/tabscout-data"))
}

/// Configuration directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TABSCOUT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("tabscout"))
        .unwrap_or_else(|| PathBuf::from("/tmp/tabscout-config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirs_are_namespaced() {
        let data = data_dir();
        let config = config_dir();
        assert!(data.to_string_lossy().contains("tabscout"));
        assert!(config.to_string_lossy().contains("tabscout"));
    }
}
