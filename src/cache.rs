//! Per-wallpaper derivation cache.
//!
//! Each wallpaper gets a directory named by a hash of its canonical path,
//! holding up to three independently cached artifacts:
//! - `thumbnail.jpg`: bounded nearest-neighbour downscale of the image
//! - `animated_meta.json`: animation metadata, present only for animated sources
//! - `smart.json`: derived light/dark mode and colour variant

use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Digest;
use sha2::Sha256;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

/// The cache home directory for derived wallpaper artifacts.
pub static CACHE_HOME: Lazy<CacheHome> = Lazy::new(|| match CacheHome::resolve() {
    Ok(c) => c,
    Err(e) => {
        warn!("Failed to resolve cache home: {}", e);
        CacheHome(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
});

/// Helper that resolves the application cache directory.
#[derive(Clone, Debug)]
pub struct CacheHome(pub PathBuf);

impl CacheHome {
    /// Resolve the CacheHome according to:
    /// * If `WALLMAN_CACHE_DIR` env var is set, use that directory
    /// * Otherwise use the platform `ProjectDirs::cache_dir()` for wallman
    pub fn resolve() -> eyre::Result<CacheHome> {
        if let Ok(override_dir) = std::env::var("WALLMAN_CACHE_DIR") {
            return Ok(CacheHome(PathBuf::from(override_dir)));
        }
        if let Some(pd) = ProjectDirs::from("", "wallman", "wallman") {
            Ok(CacheHome(pd.cache_dir().to_path_buf()))
        } else {
            Err(eyre::eyre!("Could not determine cache directory"))
        }
    }

    /// Returns the path to the wallpapers subdirectory.
    pub fn wallpapers_dir(&self) -> PathBuf {
        self.0.join("wallpapers")
    }

    /// Resolve the cache entry for an already-canonicalized wallpaper path.
    #[must_use]
    pub fn entry_for(&self, canonical: &Path) -> CacheEntry {
        CacheEntry::for_wallpaper(self, canonical)
    }
}

impl std::ops::Deref for CacheHome {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.0.as_path()
    }
}

/// A cache entry for one wallpaper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    /// Directory for this cache entry.
    pub dir: PathBuf,
}

impl CacheEntry {
    /// Create a cache entry for the given canonical wallpaper path.
    ///
    /// The key is a SHA-256 of the path bytes, so equal paths always map to
    /// the same entry regardless of the process working directory. Keys are
    /// path-based, not content-based: a file overwritten in place keeps its
    /// entry (see `clean`).
    pub fn for_wallpaper(home: &CacheHome, canonical: &Path) -> Self {
        let hash = {
            let mut hasher = Sha256::new();
            hasher.update(canonical.as_os_str().as_encoded_bytes());
            let result = hasher.finalize();
            hex::encode(result)
        };
        // Use first 16 chars of hash for shorter paths
        let short_hash = &hash[..16];
        let dir = home.wallpapers_dir().join(short_hash);
        Self { dir }
    }

    /// Create the entry directory if needed.
    pub fn ensure_dir(&self) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path to the cached thumbnail.
    pub fn thumbnail_path(&self) -> PathBuf {
        self.dir.join("thumbnail.jpg")
    }

    /// Path to the animation metadata record.
    pub fn animated_meta_path(&self) -> PathBuf {
        self.dir.join("animated_meta.json")
    }

    /// Path to the derived smart options record.
    pub fn smart_opts_path(&self) -> PathBuf {
        self.dir.join("smart.json")
    }

    /// Read a JSON cache record. Missing and unparsable files are both
    /// reported as `None`; the caller recomputes in either case.
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let text = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => {
                debug!(cache_file = %path.display(), "Cache hit");
                Some(value)
            }
            Err(e) => {
                debug!(cache_file = %path.display(), error = %e, "Discarding unparsable cache record");
                None
            }
        }
    }

    /// Write a JSON cache record atomically.
    pub fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> eyre::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string(value)?;
        write_atomic(path, json.as_bytes())?;
        debug!(cache_file = %path.display(), "Cached record");
        Ok(())
    }
}

/// All-or-nothing file write: the bytes land in a temp file in the target
/// directory and are renamed into place, so a concurrent reader observes
/// either the old content or the new, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("No parent directory for {}", path.display()))?;
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path)?;
    Ok(())
}

/// Clean the wallpaper cache directory.
pub fn clean_cache(home: &CacheHome) -> eyre::Result<CleanResult> {
    let cache_dir = home.wallpapers_dir();
    let mut result = CleanResult::default();

    if !cache_dir.exists() {
        return Ok(result);
    }

    for entry in std::fs::read_dir(&cache_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
            result.entries_removed += 1;
        }
    }

    // Remove the wallpapers directory itself if empty
    if std::fs::read_dir(&cache_dir)?.next().is_none() {
        std::fs::remove_dir(&cache_dir)?;
    }

    Ok(result)
}

/// Result of a cache clean operation.
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Number of cache entries removed.
    pub entries_removed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        value: u32,
    }

    #[test]
    fn entry_key_is_deterministic() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().to_path_buf());

        let a = home.entry_for(Path::new("/walls/one.png"));
        let b = home.entry_for(Path::new("/walls/one.png"));
        let c = home.entry_for(Path::new("/walls/two.png"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn corrupt_record_reads_as_absent() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().to_path_buf());
        let entry = home.entry_for(Path::new("/walls/one.png"));

        entry.ensure_dir()?;
        std::fs::write(entry.smart_opts_path(), "{not json")?;

        let got: Option<Record> = entry.read_json(&entry.smart_opts_path());
        assert!(got.is_none());
        Ok(())
    }

    #[test]
    fn write_then_read_roundtrip() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().to_path_buf());
        let entry = home.entry_for(Path::new("/walls/one.png"));

        entry.write_json(&entry.animated_meta_path(), &Record { value: 7 })?;
        let got: Option<Record> = entry.read_json(&entry.animated_meta_path());
        assert_eq!(got, Some(Record { value: 7 }));
        Ok(())
    }

    #[test]
    fn clean_removes_entries() -> eyre::Result<()> {
        let td = tempdir()?;
        let home = CacheHome(td.path().to_path_buf());
        let entry = home.entry_for(Path::new("/walls/one.png"));
        entry.write_json(&entry.smart_opts_path(), &Record { value: 1 })?;

        let result = clean_cache(&home)?;
        assert_eq!(result.entries_removed, 1);
        assert!(!home.wallpapers_dir().exists());
        Ok(())
    }
}
