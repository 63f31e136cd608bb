//! Session persistence bridge
//!
//! Mirrors the session to a JSON snapshot file after every mutation and
//! restores it at startup. Writes are fire-and-forget: a failed write is
//! logged and swallowed (best-effort durability, not a guarantee).
//! Uploaded file bytes are never persisted, only the file's name.

use crate::ledger::ResponseLedger;
use crate::questions::Question;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The persisted form of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub questions: Vec<Question>,

    pub current_question_index: usize,

    pub responses: ResponseLedger,

    /// Label of the selected built-in set, if any
    #[serde(default)]
    pub selected_set: Option<String>,

    /// Uploaded file name; metadata only, the bytes are not restorable
    #[serde(default)]
    pub file_name: Option<String>,
}

/// File-backed snapshot store under a single fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored snapshot, if one exists.
    pub async fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read snapshot at {:?}", self.path))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot at {:?}", self.path))?;
        Ok(Some(snapshot))
    }

    /// Write a snapshot synchronously.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {:?}", parent))?;
            }
        }
        let raw = serde_json::to_string_pretty(snapshot).context("failed to encode snapshot")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write snapshot at {:?}", self.path))?;
        Ok(())
    }

    /// Fire-and-forget write; must not block the caller. Failures are
    /// logged and swallowed.
    pub fn save_background(&self, snapshot: Snapshot) {
        let store = self.clone();
        tokio::spawn(async move {
            if let Err(e) = store.save(&snapshot) {
                warn!("snapshot write failed: {:#}", e);
            }
        });
    }

    /// Delete the stored snapshot, if present.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to delete snapshot at {:?}", self.path))
            }
        }
    }
}
