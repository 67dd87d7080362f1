//! File-system helpers and the persistent odds cache.
//!
//! Pregame lines stop changing once a game tips off, so odds are fetched at
//! most once per event and kept in a single JSON file keyed by event id.

use std::{
    collections::BTreeMap,
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::cli::types::ids::EventId;
use crate::espn::odds::GameOdds;
use crate::{EspnError, Result};

fn cache_root() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    })
}

/// Path: ~/.cache/espn-wbb/odds_cache.json
pub fn default_odds_cache_path() -> PathBuf {
    cache_root().join("espn-wbb").join("odds_cache.json")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Odds per event id, backed by one JSON file.
#[derive(Debug, Clone, Default)]
pub struct OddsCache {
    path: PathBuf,
    entries: BTreeMap<EventId, GameOdds>,
}

impl OddsCache {
    /// Read the cache file. A missing file is an empty cache; a file that
    /// exists but does not parse is an error.
    pub fn try_load(path: &Path) -> Result<Self> {
        let entries = match try_read_to_string(path) {
            Some(s) => serde_json::from_str(&s).map_err(|e| EspnError::Cache {
                message: format!("{}: {}", path.display(), e),
            })?,
            None => BTreeMap::new(),
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Like [`try_load`](Self::try_load), but an unreadable cache starts
    /// empty and is overwritten on the next save.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            warn!("Ignoring odds cache: {}", e);
            Self {
                path: path.to_path_buf(),
                entries: BTreeMap::new(),
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, event_id: &EventId) -> Option<&GameOdds> {
        self.entries.get(event_id)
    }

    pub fn insert(&mut self, event_id: EventId, odds: GameOdds) {
        self.entries.insert(event_id, odds);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole cache back as pretty JSON.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_string(&self.path, &json)?;
        debug!("Saved {} odds entries to {}", self.len(), self.path.display());
        Ok(())
    }
}
