//! Session persistence configuration.

use std::ffi::OsString;
use std::path::PathBuf;

/// Storage key the session record is kept under.
pub const DEFAULT_STORAGE_KEY: &str = "user";

/// Environment variable overriding the native session directory.
pub const SESSION_DIR_ENV: &str = "CHAINBOARD_SESSION_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Name of the single persisted record.
    pub storage_key: String,

    /// Directory for the native file-backed store. `None` means the OS data
    /// directory (`{data_dir}/chainboard`). Ignored in the browser.
    pub dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            dir: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_dir_var(std::env::var_os(SESSION_DIR_ENV))
    }

    /// `value` is the raw `CHAINBOARD_SESSION_DIR`. Unset or blank keeps the
    /// OS data directory.
    pub(crate) fn from_dir_var(value: Option<OsString>) -> Self {
        let dir = value
            .filter(|value| value.to_str().is_none_or(|v| !v.trim().is_empty()))
            .map(PathBuf::from);

        Self {
            dir,
            ..Self::default()
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unset_or_blank_dir_falls_back_to_data_dir() {
        assert_eq!(SessionConfig::from_dir_var(None), SessionConfig::default());
        assert_eq!(SessionConfig::from_dir_var(Some("".into())).dir, None);
        assert_eq!(SessionConfig::from_dir_var(Some("   ".into())).dir, None);
    }

    #[test]
    fn dir_override_keeps_the_storage_key() {
        let config = SessionConfig::from_dir_var(Some("/var/lib/chainboard".into()));
        assert_eq!(config.dir, Some(PathBuf::from("/var/lib/chainboard")));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}
