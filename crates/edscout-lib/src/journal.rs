//! Player state provider backed by the game's journal directory.
//!
//! The journal is an append-only, timestamp-ordered log of JSON lines. The
//! game may still be writing it while we read, so a torn final line is
//! skipped rather than treated as an error. Every read produces a fresh
//! snapshot; nothing is cached across runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::UserDirs;
use serde::Deserialize;
use tracing::debug;

use crate::candidate::Coords;
use crate::error::{Error, Result};

/// Snapshot of the player's last known location.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLocation {
    /// Current system name.
    pub system: String,
    /// Galactic coordinates, when the event carried them.
    pub coords: Option<Coords>,
    /// Timestamp of the location event.
    pub timestamp: Option<DateTime<Utc>>,
}

/// One commodity stack in the cargo hold.
#[derive(Debug, Clone, PartialEq)]
pub struct CargoItem {
    /// Localised commodity name when available, otherwise the internal one.
    pub name: String,
    /// Number of units carried.
    pub count: u32,
}

/// Default journal location under the user's home directory.
pub fn default_journal_dir() -> Result<PathBuf> {
    let dirs = UserDirs::new().ok_or(Error::HomeDirUnavailable)?;
    Ok(dirs
        .home_dir()
        .join("Saved Games")
        .join("Frontier Developments")
        .join("Elite Dangerous"))
}

/// Newest `Journal.*.log` file by modification time.
pub fn latest_journal(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(Error::JournalDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !(name.starts_with("Journal.") && name.ends_with(".log")) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map(|(m, _)| modified > *m).unwrap_or(true) {
            newest = Some((modified, entry.path()));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| Error::NoJournalFiles {
            path: dir.to_path_buf(),
        })
}

#[derive(Debug, Deserialize)]
struct JournalEvent {
    event: String,
    #[serde(rename = "StarSystem")]
    star_system: Option<String>,
    #[serde(rename = "StarPos")]
    star_pos: Option<[f64; 3]>,
    timestamp: Option<String>,
}

/// Most recent `FSDJump` or `Location` event in the newest journal file.
///
/// Scans the file backwards so the latest event of either kind wins.
/// Unparseable lines, including a final line the game has not finished
/// writing, are skipped.
pub fn current_location(dir: &Path) -> Result<PlayerLocation> {
    let journal = latest_journal(dir)?;
    let contents = fs::read_to_string(&journal)?;

    for line in contents.lines().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(event) = serde_json::from_str::<JournalEvent>(line) else {
            debug!(journal = %journal.display(), "skipping unparseable journal line");
            continue;
        };
        if event.event != "FSDJump" && event.event != "Location" {
            continue;
        }
        let Some(system) = event.star_system else {
            continue;
        };
        let coords = event.star_pos.map(|[x, y, z]| Coords { x, y, z });
        let timestamp = event
            .timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));
        return Ok(PlayerLocation {
            system,
            coords,
            timestamp,
        });
    }

    Err(Error::LocationNotFound { path: journal })
}

#[derive(Debug, Deserialize)]
struct CargoFile {
    #[serde(rename = "Inventory", default)]
    inventory: Vec<CargoEntry>,
}

#[derive(Debug, Deserialize)]
struct CargoEntry {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Name_Localised")]
    name_localised: Option<String>,
    #[serde(rename = "Count", default)]
    count: u32,
}

impl CargoEntry {
    // Limpets are mining equipment, not sellable cargo.
    fn is_drone(&self) -> bool {
        self.name.eq_ignore_ascii_case("drones")
            || self
                .name_localised
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case("limpet"))
    }

    fn display_name(&self) -> String {
        self.name_localised.clone().unwrap_or_else(|| self.name.clone())
    }
}

/// Full non-drone cargo manifest from `Cargo.json`.
pub fn cargo_manifest(dir: &Path) -> Result<Vec<CargoItem>> {
    let cargo_file = dir.join("Cargo.json");
    if !cargo_file.is_file() {
        return Err(Error::CargoFileNotFound { path: cargo_file });
    }
    let contents = fs::read_to_string(&cargo_file)?;
    let parsed: CargoFile = serde_json::from_str(&contents)?;
    Ok(parsed
        .inventory
        .into_iter()
        .filter(|entry| !entry.is_drone())
        .map(|entry| CargoItem {
            name: entry.display_name(),
            count: entry.count,
        })
        .collect())
}

/// Highest-count non-drone commodity in the hold, or `None` when empty.
pub fn main_cargo(dir: &Path) -> Result<Option<CargoItem>> {
    let mut manifest = cargo_manifest(dir)?;
    manifest.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    Ok(manifest.into_iter().next())
}
