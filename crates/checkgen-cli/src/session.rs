//! Session file: the current checklist between CLI invocations.
//!
//! The core store is in-memory only; persisting the active checklist so
//! `show`, `toggle`, and `tui` can pick it up in a later process is a
//! CLI concern, handled here as one JSON file under
//! `$XDG_STATE_HOME/checkgen` (or `~/.local/state/checkgen`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkgen_core::{Checklist, Variant};

/// One generated checklist plus the request that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub variant: Variant,
    pub request: String,
    pub generated_at: DateTime<Utc>,
    pub checklist: Checklist,
}

impl Session {
    pub fn new(variant: Variant, request: String, checklist: Checklist) -> Self {
        Self {
            id: Uuid::new_v4(),
            variant,
            request,
            generated_at: Utc::now(),
            checklist,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the checkgen state directory (XDG layout).
pub fn state_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("checkgen");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("state")
        .join("checkgen")
}

/// Return the path to the session file.
pub fn session_path() -> PathBuf {
    state_dir().join("session.json")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load the session at the default path. `Ok(None)` when none exists.
pub fn load() -> Result<Option<Session>> {
    load_from(&session_path())
}

pub fn load_from(path: &Path) -> Result<Option<Session>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read session file at {}", path.display()));
        }
    };
    let session: Session = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse session file at {}", path.display()))?;
    Ok(Some(session))
}

/// Write the session, creating parent dirs as needed.
pub fn save(session: &Session) -> Result<()> {
    save_to(&session_path(), session)
}

pub fn save_to(path: &Path, session: &Session) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create state directory {}", dir.display()))?;
    }
    let contents = serde_json::to_string_pretty(session).context("failed to serialize session")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write session file at {}", path.display()))?;
    Ok(())
}

/// Delete the session file. Returns whether one existed.
pub fn clear() -> Result<bool> {
    clear_at(&session_path())
}

pub fn clear_at(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            Err(e).with_context(|| format!("failed to remove session file at {}", path.display()))
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
