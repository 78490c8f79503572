//! Durable named preset store
//!
//! Presets persist as newline-delimited `name seconds` pairs in a plain
//! text file under the application data directory. Persistence is
//! best-effort: the in-memory list is the source of truth for the session,
//! and I/O failures are logged and swallowed rather than surfaced.

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::TimerError;

/// Default presets seeded on first run. Names are single tokens so they
/// survive the two-token line format.
const DEFAULT_PRESETS: [(&str, u32); 4] = [
    ("Quick", 60),
    ("FiveMin", 300),
    ("TenMin", 600),
    ("HalfHour", 1800),
];

/// A named, reusable duration template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub seconds: u32,
}

/// Mapping from preset name to duration, backed by a text file.
///
/// Names are case-sensitive exact-match keys; insertion order is preserved.
#[derive(Debug)]
pub struct PresetStore {
    presets: Mutex<Vec<Preset>>,
    path: PathBuf,
}

impl PresetStore {
    /// Open the store at the default per-user data path
    pub fn open_default() -> Self {
        Self::open(default_preset_path())
    }

    /// Open the store backed by the given file, loading it immediately.
    /// A missing file seeds the default presets and persists them.
    pub fn open(path: PathBuf) -> Self {
        let store = Self {
            presets: Mutex::new(Vec::new()),
            path,
        };
        store.load();
        store
    }

    fn lock_presets(&self) -> MutexGuard<'_, Vec<Preset>> {
        self.presets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let mut presets = self.lock_presets();
                *presets = parse_presets(&contents);
                info!("Loaded {} presets from {}", presets.len(), self.path.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let mut presets = self.lock_presets();
                *presets = DEFAULT_PRESETS
                    .iter()
                    .map(|&(name, seconds)| Preset {
                        name: name.to_string(),
                        seconds,
                    })
                    .collect();
                info!("Seeding default presets at {}", self.path.display());
                self.persist(&presets);
            }
            Err(e) => {
                // Unreadable existing file: start the session empty rather
                // than clobbering it with defaults.
                warn!("Failed to read presets from {}: {}", self.path.display(), e);
            }
        }
    }

    /// Insert or update a preset by name, then persist
    pub fn save(&self, name: &str, seconds: u32) {
        let mut presets = self.lock_presets();
        match presets.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.seconds = seconds,
            None => presets.push(Preset {
                name: name.to_string(),
                seconds,
            }),
        }
        info!("Saved preset {} ({}s)", name, seconds);
        self.persist(&presets);
    }

    /// Remove a preset by exact name, then persist
    pub fn delete(&self, name: &str) -> Result<(), TimerError> {
        let mut presets = self.lock_presets();
        let index = presets
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TimerError::PresetNotFound(name.to_string()))?;

        presets.remove(index);
        info!("Deleted preset {}", name);
        self.persist(&presets);
        Ok(())
    }

    /// Snapshot of all presets in insertion order
    pub fn list(&self) -> Vec<Preset> {
        self.lock_presets().clone()
    }

    /// Look up one preset by exact name
    pub fn find(&self, name: &str) -> Option<Preset> {
        self.lock_presets().iter().find(|p| p.name == name).cloned()
    }

    /// Best-effort durable write; failures are logged and swallowed
    fn persist(&self, presets: &[Preset]) {
        if let Err(e) = write_presets(&self.path, presets) {
            warn!("Failed to persist presets to {}: {}", self.path.display(), e);
        }
    }
}

/// Parse the backing file, silently skipping malformed lines (wrong token
/// count or non-integer duration) so one bad line never aborts the load.
fn parse_presets(contents: &str) -> Vec<Preset> {
    let mut presets = Vec::new();
    for line in contents.lines() {
        let mut tokens = line.split(' ');
        if let (Some(name), Some(seconds), None) = (tokens.next(), tokens.next(), tokens.next()) {
            if let Ok(seconds) = seconds.parse::<u32>() {
                presets.push(Preset {
                    name: name.to_string(),
                    seconds,
                });
                continue;
            }
        }
        warn!("Skipping malformed preset line: {:?}", line);
    }
    presets
}

fn write_presets(path: &Path, presets: &[Preset]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut out = String::new();
    for preset in presets {
        // Infallible: writing to a String cannot fail
        let _ = writeln!(out, "{} {}", preset.name, preset.seconds);
    }
    fs::write(path, out)
}

/// `<data dir>/timekeep/presets.txt`, falling back to the working directory
/// when the platform exposes no data dir
fn default_preset_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timekeep")
        .join("presets.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("presets.txt")
    }

    #[test]
    fn first_open_seeds_defaults_and_persists_them() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open(temp_path(&dir));

        let presets = store.list();
        assert_eq!(presets.len(), 4);
        assert_eq!(presets[0], Preset { name: "Quick".into(), seconds: 60 });
        assert_eq!(presets[3].seconds, 1800);

        // Seeds hit the file immediately
        let reopened = PresetStore::open(temp_path(&dir));
        assert_eq!(reopened.list(), presets);
    }

    #[test]
    fn save_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open(temp_path(&dir));
        store.save("Lunch", 1500);

        let reopened = PresetStore::open(temp_path(&dir));
        assert_eq!(
            reopened.find("Lunch"),
            Some(Preset { name: "Lunch".into(), seconds: 1500 })
        );
    }

    #[test]
    fn save_upserts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open(temp_path(&dir));
        let before = store.list().len();

        store.save("Quick", 90);
        assert_eq!(store.list().len(), before);
        assert_eq!(store.find("Quick").unwrap().seconds, 90);
    }

    #[test]
    fn delete_round_trips_and_rejects_unknown_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open(temp_path(&dir));
        store.save("Lunch", 1500);
        store.delete("Lunch").unwrap();

        assert_eq!(
            store.delete("Lunch"),
            Err(TimerError::PresetNotFound("Lunch".into()))
        );
        let reopened = PresetStore::open(temp_path(&dir));
        assert_eq!(reopened.find("Lunch"), None);
    }

    #[test]
    fn names_match_case_sensitively() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open(temp_path(&dir));
        store.save("Lunch", 1500);
        assert_eq!(store.find("lunch"), None);
        assert!(store.delete("LUNCH").is_err());
    }

    #[test]
    fn malformed_lines_are_skipped_without_aborting_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir);
        std::fs::write(
            &path,
            "Quick 60\nthree token line\nNoDuration\nBadNumber abc\nHalfHour 1800\n",
        )
        .unwrap();

        let store = PresetStore::open(path);
        let presets = store.list();
        assert_eq!(
            presets,
            vec![
                Preset { name: "Quick".into(), seconds: 60 },
                Preset { name: "HalfHour".into(), seconds: 1800 },
            ]
        );
    }
}
