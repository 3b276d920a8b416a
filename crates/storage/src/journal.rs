// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only checkpoint journal

use crate::StorageError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use trickle_core::{Checkpoint, CheckpointSink, SinkError};

struct JournalFile {
    file: File,
    sequence: u64,
}

/// One JSON line per checkpoint, synced on every append
pub struct CheckpointJournal {
    path: PathBuf,
    inner: Mutex<JournalFile>,
}

impl CheckpointJournal {
    /// Open or create a journal at the given path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        // Count existing entries to continue the sequence; blank lines are not entries
        let reader = BufReader::new(File::open(path)?);
        let mut sequence = 0;
        for line in reader.lines() {
            if !line?.is_empty() {
                sequence += 1;
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            inner: Mutex::new(JournalFile { file, sequence }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a checkpoint, returning its sequence number
    pub fn append(&self, checkpoint: &Checkpoint) -> Result<u64, StorageError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let seq = inner.sequence + 1;
        let line = serde_json::to_string(&JournalEntry {
            seq,
            checkpoint: checkpoint.clone(),
        })?;
        writeln!(inner.file, "{}", line)?;
        inner.file.sync_all()?;
        inner.sequence = seq;
        Ok(seq)
    }

    /// Number of entries written so far, including earlier sessions
    pub fn sequence(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).sequence
    }

    /// Every checkpoint in the journal, oldest first
    pub fn read_all(path: &Path) -> Result<Vec<Checkpoint>, StorageError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut checkpoints = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let entry: JournalEntry = serde_json::from_str(&line)?;
            checkpoints.push(entry.checkpoint);
        }

        Ok(checkpoints)
    }
}

impl CheckpointSink for CheckpointJournal {
    fn emit(&self, checkpoint: &Checkpoint) -> Result<(), SinkError> {
        let seq = self.append(checkpoint)?;
        tracing::debug!(seq, path = %self.path.display(), "checkpoint journaled");
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JournalEntry {
    seq: u64,
    checkpoint: Checkpoint,
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
