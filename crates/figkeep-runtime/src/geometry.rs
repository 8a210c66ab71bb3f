//! Window geometry persistence.
//!
//! Remembers where a tagged window was placed so the next run can put it
//! back. Entries are keyed by `<tag>@<machine-id>` so a cache shared
//! through a synced home directory does not move windows onto monitors
//! that another machine has.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use figkeep_common::constants::{MACHINE_ID_FILE, default_geometry_file};
use figkeep_common::error::{FigkeepError, Result};
use figkeep_common::types::{Geometry, WindowId};
use figkeep_common::warn;
use serde::{Deserialize, Serialize};

use crate::window::WindowSystem;

const CACHE_VERSION: u32 = 1;

/// A stored geometry and when it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedGeometry {
    /// Window placement.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// When the placement was recorded.
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    windows: BTreeMap<String, CachedGeometry>,
}

/// On-disk map from `<tag>@<machine-id>` to window geometry.
#[derive(Debug)]
pub struct GeometryCache {
    path: PathBuf,
    machine_id: String,
    entries: BTreeMap<String, CachedGeometry>,
}

impl GeometryCache {
    /// Opens the cache at the default location for this machine.
    ///
    /// # Errors
    ///
    /// See [`GeometryCache::open`].
    pub fn open_default() -> Result<Self> {
        Self::open(default_geometry_file())
    }

    /// Opens the cache at `path` for this machine.
    ///
    /// A missing file yields an empty cache. So does an unreadable JSON
    /// document, with a one-time warning; it is overwritten on next save.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_for(path, machine_id())
    }

    /// Opens the cache at `path` on behalf of `machine_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open_for(path: impl Into<PathBuf>, machine_id: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<CacheFile>(&text) {
                Ok(file) => file.windows,
                Err(e) => {
                    let _ = warn::warn_once(
                        "geometry:corrupt_cache",
                        "window geometry cache is unreadable; starting empty",
                        Some(&e),
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(FigkeepError::Io { path, source: e }),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "geometry cache opened");
        Ok(Self {
            path,
            machine_id: machine_id.into(),
            entries,
        })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Machine id used in keys.
    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    fn key(&self, tag: &str) -> String {
        format!("{tag}@{}", self.machine_id)
    }

    /// Geometry stored for `tag` on this machine.
    pub fn get(&self, tag: &str) -> Option<Geometry> {
        self.entries.get(&self.key(tag)).map(|e| e.geometry)
    }

    /// Stores `geometry` for `tag`, returning the previous value.
    pub fn insert(&mut self, tag: &str, geometry: Geometry) -> Option<Geometry> {
        let entry = CachedGeometry {
            geometry,
            saved_at: Utc::now(),
        };
        self.entries.insert(self.key(tag), entry).map(|e| e.geometry)
    }

    /// Forgets `tag` on this machine. Returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.entries.remove(&self.key(tag)).is_some()
    }

    /// Every entry, for all machines, ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CachedGeometry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Writes the cache atomically, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| FigkeepError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let file = CacheFile {
            version: CACHE_VERSION,
            windows: self.entries.clone(),
        };
        let json = serde_json::to_vec_pretty(&file)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| FigkeepError::Io {
            path: dir.clone(),
            source: e,
        })?;
        tmp.write_all(&json).map_err(|e| FigkeepError::Io {
            path: tmp.path().to_path_buf(),
            source: e,
        })?;
        let _ = tmp.persist(&self.path).map_err(|e| FigkeepError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;
        tracing::debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "geometry cache saved"
        );
        Ok(())
    }
}

/// Identifies this machine for cache keys.
///
/// Uses `/etc/machine-id`, then the host name, then `"unknown"`.
pub fn machine_id() -> String {
    if let Ok(id) = std::fs::read_to_string(MACHINE_ID_FILE) {
        let id = id.trim();
        if !id.is_empty() {
            return id.to_owned();
        }
    }
    host_name().unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(unix)]
fn host_name() -> Option<String> {
    nix::unistd::gethostname()
        .ok()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(not(unix))]
fn host_name() -> Option<String> {
    std::env::var("COMPUTERNAME").ok().filter(|name| !name.is_empty())
}

/// Moves a window to the geometry remembered for `tag`.
///
/// Returns whether a geometry was applied. Placement failures are
/// best-effort and reported once.
pub fn restore_geometry(
    windows: &dyn WindowSystem,
    id: WindowId,
    tag: &str,
    cache: &GeometryCache,
) -> bool {
    let Some(geometry) = cache.get(tag) else {
        return false;
    };
    match windows.set_geometry(id, geometry) {
        Ok(()) => {
            tracing::debug!(window = %id, tag, %geometry, "window geometry restored");
            true
        }
        Err(e) => {
            let _ = warn::warn_once(
                "geometry:restore",
                "could not restore window geometry; continuing",
                Some(&e),
            );
            false
        }
    }
}

/// Records the current geometry of a window under `tag`.
///
/// Returns whether a geometry was recorded; backends that cannot report
/// placement record nothing. The cache is not saved.
///
/// # Errors
///
/// Returns an error if the window system fails to report the geometry.
pub fn remember_geometry(
    windows: &dyn WindowSystem,
    id: WindowId,
    tag: &str,
    cache: &mut GeometryCache,
) -> Result<bool> {
    match windows.geometry(id)? {
        Some(geometry) => {
            let _ = cache.insert(tag, geometry);
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;

    const G: Geometry = Geometry {
        x: 100,
        y: 50,
        width: 800,
        height: 600,
    };

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = GeometryCache::open_for(dir.path().join("g.json"), "m1").expect("open");
        assert_eq!(cache.entries().count(), 0);
        assert_eq!(cache.get("plot"), None);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("g.json");

        let mut cache = GeometryCache::open_for(&path, "m1").expect("open");
        assert_eq!(cache.insert("plot", G), None);
        cache.save().expect("save");

        let reloaded = GeometryCache::open_for(&path, "m1").expect("reopen");
        assert_eq!(reloaded.get("plot"), Some(G));
    }

    #[test]
    fn entries_are_per_machine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("g.json");

        let mut a = GeometryCache::open_for(&path, "laptop").expect("open");
        let _ = a.insert("plot", G);
        a.save().expect("save");

        let b = GeometryCache::open_for(&path, "desktop").expect("open");
        assert_eq!(b.get("plot"), None);
        assert_eq!(b.entries().next().map(|(k, _)| k), Some("plot@laptop"));
    }

    #[test]
    fn insert_replaces_and_remove_forgets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cache = GeometryCache::open_for(dir.path().join("g.json"), "m").expect("open");
        let moved = Geometry { x: 0, ..G };
        let _ = cache.insert("plot", G);
        assert_eq!(cache.insert("plot", moved), Some(G));
        assert!(cache.remove("plot"));
        assert!(!cache.remove("plot"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("g.json");
        std::fs::write(&path, "{not json").expect("write");
        let cache = GeometryCache::open_for(&path, "m").expect("open");
        assert_eq!(cache.entries().count(), 0);
    }

    #[test]
    fn machine_id_is_never_empty() {
        assert!(!machine_id().is_empty());
    }

    struct Placed {
        reported: Option<Geometry>,
        applied: RefCell<Vec<(WindowId, Geometry)>>,
    }

    impl WindowSystem for Placed {
        fn backend(&self) -> String {
            "TkAgg".into()
        }

        fn open_windows(&self) -> Result<Vec<WindowId>> {
            Ok(vec![WindowId::new(1)])
        }

        fn pump_all_events(&self, _timeout: Duration) -> Result<()> {
            Ok(())
        }

        fn show_blocking(&self) -> Result<()> {
            Ok(())
        }

        fn geometry(&self, _id: WindowId) -> Result<Option<Geometry>> {
            Ok(self.reported)
        }

        fn set_geometry(&self, id: WindowId, geometry: Geometry) -> Result<()> {
            self.applied.borrow_mut().push((id, geometry));
            Ok(())
        }
    }

    #[test]
    fn remember_then_restore() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cache = GeometryCache::open_for(dir.path().join("g.json"), "m").expect("open");
        let ws = Placed {
            reported: Some(G),
            applied: RefCell::new(Vec::new()),
        };

        assert!(!restore_geometry(&ws, WindowId::new(1), "plot", &cache));
        assert!(remember_geometry(&ws, WindowId::new(1), "plot", &mut cache).expect("remember"));
        assert!(restore_geometry(&ws, WindowId::new(2), "plot", &cache));
        assert_eq!(*ws.applied.borrow(), vec![(WindowId::new(2), G)]);
    }

    #[test]
    fn remember_without_reported_geometry_is_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cache = GeometryCache::open_for(dir.path().join("g.json"), "m").expect("open");
        let ws = Placed {
            reported: None,
            applied: RefCell::new(Vec::new()),
        };
        assert!(!remember_geometry(&ws, WindowId::new(1), "plot", &mut cache).expect("remember"));
        assert_eq!(cache.get("plot"), None);
    }
}
