//! # Stats Store Module
//!
//! Tolerant loading and structure-preserving saving of the stats file.
//!
//! ## Loading
//! - Missing, unreadable or unparseable files never fail the load; they fall
//!   back to an empty document and the default category set
//! - Parse failures are retried once after stripping `//` and `/* */` comments
//! - The parsed document is kept as the last-loaded document
//!
//! ## Saving
//! - Values are merged into a copy of the last-loaded document
//! - Subskill entries keep their fields and only get `average` updated
//! - Output is written to a temp file and renamed over the target

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info, warn};

use crate::comments::strip_comments;
use crate::document::{FlatStats, StatsDocument};
use crate::error::{Result, StatsError};

/// File name used when no path is given.
pub const DEFAULT_STATS_FILE: &str = "stats.json";

/// Categories shown when there is nothing to load, so the chart is never empty.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Hero Shooter",
    "Colony Sim",
    "Vehicular Combat",
    "City Builder",
    "Roguelike",
    "Destruction",
];

/// The zero-valued default set built from `DEFAULT_CATEGORIES`.
pub fn default_flat_stats() -> FlatStats {
    DEFAULT_CATEGORIES
        .iter()
        .map(|name| (name.to_string(), 0.0))
        .collect()
}

/// Owns one stats file and the document last loaded from it.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
    /// `None` until a load produced a real document.
    last_loaded: Option<StatsDocument>,
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATS_FILE)
    }
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document retained by the last load or save, if any.
    pub fn document(&self) -> Option<&StatsDocument> {
        self.last_loaded.as_ref()
    }

    /// Re-reads the store's own path.
    pub fn reload(&mut self) -> FlatStats {
        let path = self.path.clone();
        self.load(&path)
    }

    /// Loads `path`, always producing usable values.
    ///
    /// The store's path becomes `path`, so a later `reload` reads the same
    /// file. Every failure is logged and degrades to the default set.
    pub fn load(&mut self, path: &Path) -> FlatStats {
        self.path = path.to_path_buf();

        let document = match read_document(path) {
            Ok(doc) => Some(doc),
            Err(StatsError::MissingFile { path }) => {
                warn!("Stats file not found at {}, using defaults", path.display());
                None
            }
            Err(e) => {
                warn!("{}; falling back to defaults", e);
                None
            }
        };

        let flat = match &document {
            Some(doc) if !doc.is_empty() => doc.flatten(),
            _ => default_flat_stats(),
        };
        self.last_loaded = document;

        info!("Loaded stats used for display: {:?}", flat);
        flat
    }

    /// Merges `stats` into the last-loaded document and writes it to `path`.
    ///
    /// With no prior document the file holds exactly `stats`. On success the
    /// written document becomes the last-loaded one. Failures are logged and
    /// returned; the previous file is left in place.
    pub fn save(&mut self, path: &Path, stats: &FlatStats) -> Result<()> {
        let merged = match &self.last_loaded {
            Some(doc) => doc.merged(stats),
            None => StatsDocument::from_flat(stats),
        };

        match write_document(path, &merged) {
            Ok(()) => {
                info!("Stats saved to {}", path.display());
                self.path = path.to_path_buf();
                self.last_loaded = Some(merged);
                Ok(())
            }
            Err(e) => {
                error!("Error saving stats: {}", e);
                Err(e)
            }
        }
    }

    /// Saves to the store's own path.
    pub fn save_current(&mut self, stats: &FlatStats) -> Result<()> {
        let path = self.path.clone();
        self.save(&path, stats)
    }
}

/// Reads and tolerantly parses a stats file.
fn read_document(path: &Path) -> Result<StatsDocument> {
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StatsError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => StatsError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let value = parse_tolerant(path, &raw)?;
    match value {
        Value::Object(map) => Ok(StatsDocument::from_map(map)),
        other => Err(StatsError::NotAMapping {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Strict parse first, then one retry with comments stripped.
fn parse_tolerant(path: &Path, raw: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("JSON parse error in {}: {}; retrying without comments", path.display(), e);
            let cleaned = strip_comments(raw);
            serde_json::from_str::<Value>(&cleaned).map_err(|source| {
                warn!("Parse still failed after stripping comments: {}", source);
                StatsError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })
        }
    }
}

/// Serializes `doc` and atomically replaces `path` with it.
fn write_document(path: &Path, doc: &StatsDocument) -> Result<()> {
    let mut json_string = serde_json::to_string_pretty(doc).map_err(StatsError::Serialize)?;
    json_string.push('\n');

    let temp_path = temp_path_for(path);
    let write_err = |source| StatsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(json_string.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_err(e)
    })
}

/// Sibling path used while writing, e.g. `stats.json.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_STATS_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
