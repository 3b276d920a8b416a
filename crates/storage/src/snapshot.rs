// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Latest-checkpoint file, replaced atomically on every write

use crate::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use trickle_core::{Checkpoint, CheckpointSink, SinkError};
use uuid::Uuid;

/// Format version written alongside every checkpoint
pub const CHECKPOINT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    checkpoint: Checkpoint,
}

/// Holds the most recent checkpoint as pretty JSON.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a reader sees either the previous checkpoint or the new one. Saves are
/// serialized across clones, and a checkpoint older than the one already
/// saved for the same run is dropped.
#[derive(Debug, Clone)]
pub struct CheckpointFile {
    path: PathBuf,
    /// Run id and processed count of the last save
    last_saved: Arc<Mutex<Option<(Uuid, u64)>>>,
}

impl CheckpointFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_saved: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "checkpoint".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Replace the file with `checkpoint`.
    ///
    /// Returns `false` when the checkpoint was stale and nothing was written.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<bool, StorageError> {
        let mut last_saved = self.last_saved.lock().unwrap_or_else(|e| e.into_inner());
        let processed = checkpoint.processed();
        if let Some((run_id, saved)) = *last_saved {
            if run_id == checkpoint.run_id && processed < saved {
                tracing::debug!(processed, saved, "stale checkpoint, not saving");
                return Ok(false);
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&Envelope {
            version: CHECKPOINT_VERSION,
            checkpoint: checkpoint.clone(),
        })?;

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;
        *last_saved = Some((checkpoint.run_id, processed));
        Ok(true)
    }

    /// Read the checkpoint back for inspection. `None` when absent.
    pub fn load(&self) -> Result<Option<Checkpoint>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&content)?;
        if envelope.version != CHECKPOINT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: envelope.version,
                expected: CHECKPOINT_VERSION,
            });
        }
        Ok(Some(envelope.checkpoint))
    }

    /// Remove the file. Missing files are fine.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CheckpointSink for CheckpointFile {
    fn emit(&self, checkpoint: &Checkpoint) -> Result<(), SinkError> {
        if self.save(checkpoint)? {
            tracing::debug!(path = %self.path.display(), "checkpoint saved");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
