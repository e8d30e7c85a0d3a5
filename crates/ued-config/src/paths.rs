//! Where analysis settings live on disk.
//!
//! The default settings file is `analysis.toml` under the platform config
//! directory, in a `ued` subdirectory. On Linux that is
//! `$XDG_CONFIG_HOME/ued/analysis.toml`.
//!
//! ```rust,no_run
//! let path = ued_config::paths::default_config_path();
//! println!("settings: {}", path.display());
//! ```

use std::path::PathBuf;

use crate::ConfigError;

const APP_DIR: &str = "ued";
const SETTINGS_FILE: &str = "analysis.toml";

/// Per-user settings directory, or `./ued` when the platform has none.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Default settings file inside [`user_config_dir`].
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Creates [`user_config_dir`] if needed and returns it.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_live_under_app_dir() {
        let path = default_config_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(SETTINGS_FILE));
        let dir = path.parent().map(PathBuf::from);
        assert_eq!(dir, Some(user_config_dir()));
        assert!(user_config_dir().ends_with(APP_DIR));
    }
}
