//! Defaults, environment variable names, and cache paths.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Application name used in logs and cache paths.
pub const APP_NAME: &str = "figkeep";

/// Default tick granularity of the hold loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Default event-pump duration for `show` and `refresh`.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(1);

/// Prompt printed for the any-key trigger when none is configured.
pub const ANY_KEY_PROMPT: &str = "Press any key to exit...";

/// Prompt printed for the Enter trigger when none is configured.
pub const ENTER_PROMPT: &str = "Press Enter to exit...";

/// Overrides the hold loop tick, in milliseconds.
pub const ENV_POLL_MS: &str = "FIGKEEP_POLL_MS";
/// Overrides the hold loop trigger name.
pub const ENV_TRIGGER: &str = "FIGKEEP_TRIGGER";
/// Overrides the hold loop tty gate (`0`/`1`, `false`/`true`).
pub const ENV_ONLY_IF_TTY: &str = "FIGKEEP_ONLY_IF_TTY";
/// Backend the plotting library has been told to use, if any.
pub const ENV_BACKEND: &str = "MPLBACKEND";
/// Overrides the cache directory.
pub const ENV_CACHE_DIR: &str = "FIGKEEP_CACHE_DIR";

/// File name of the window geometry cache inside the cache directory.
pub const GEOMETRY_FILE: &str = "window_geometry.json";

/// File consulted first when deriving the machine id.
pub const MACHINE_ID_FILE: &str = "/etc/machine-id";

fn resolve_cache_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(ENV_CACHE_DIR) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(".cache").join(APP_NAME);
    }
    std::env::temp_dir().join(APP_NAME)
}

static CACHE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the cache directory for this process, resolved on first use.
pub fn cache_dir() -> &'static PathBuf {
    CACHE_DIR.get_or_init(resolve_cache_dir)
}

/// Returns the default window geometry cache path.
pub fn default_geometry_file() -> PathBuf {
    cache_dir().join(GEOMETRY_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_file_lives_in_cache_dir() {
        let path = default_geometry_file();
        assert!(path.starts_with(cache_dir()));
        assert!(path.ends_with(GEOMETRY_FILE));
    }

    #[test]
    fn default_tick_is_fifty_millis() {
        assert_eq!(DEFAULT_POLL_INTERVAL.as_millis(), 50);
    }
}
