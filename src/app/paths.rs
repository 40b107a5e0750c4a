// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to [`config_dir_with_override`] (for tests)
//! 2. **CLI argument** (`--config-dir`) - set via [`init_cli_override`]
//! 3. **Environment variable** (`ZOOM_VIEW_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "ZoomView";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ZOOM_VIEW_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--config-dir` CLI argument. Only the first call takes effect.
pub fn init_cli_override(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("config dir override already initialized, ignoring");
    }
}

fn cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

/// Returns the application config directory with an optional override taking
/// highest priority.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli_config_dir() {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch the process environment.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_override_wins() {
        let custom = PathBuf::from("/tmp/zoom-view-custom");
        assert_eq!(config_dir_with_override(Some(custom.clone())), Some(custom));
    }

    #[test]
    fn env_var_is_respected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/tmp/zoom-view-env");

        let dir = config_dir_with_override(None);
        std::env::remove_var(ENV_CONFIG_DIR);

        // A CLI override set by another test would take precedence.
        if cli_config_dir().is_none() {
            assert_eq!(dir, Some(PathBuf::from("/tmp/zoom-view-env")));
        }
    }

    #[test]
    fn empty_env_var_falls_back_to_platform_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        let dir = config_dir_with_override(None);
        std::env::remove_var(ENV_CONFIG_DIR);

        if cli_config_dir().is_none() {
            if let Some(path) = dir {
                assert!(path.ends_with(APP_NAME));
            }
        }
    }
}
