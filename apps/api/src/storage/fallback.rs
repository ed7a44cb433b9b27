//! Local fallback log: a JSON array of records that missed the remote store.
//!
//! Appends are read-modify-write under a process-wide lock. The new array is
//! written to a temp file in the same directory and renamed over the log, so
//! a failed write never truncates existing entries.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{ApplicationRecord, InterviewQuestion, VideoResponse};
use crate::models::candidate::{CandidateProfile, TechStackSelection};

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("fallback log io error: {0}")]
    Io(#[from] io::Error),

    #[error("fallback log is not a JSON array: {0}")]
    Format(#[from] serde_json::Error),

    #[error("fallback log lock poisoned")]
    Poisoned,
}

/// One log entry: the full record plus when and why it fell back. Profile
/// fields sit at the top level, like the flat entries older tools wrote.
#[derive(Debug, Serialize)]
pub struct FallbackEntry<'a> {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: &'a CandidateProfile,
    pub tech_stack: &'a TechStackSelection,
    pub questions: &'a [InterviewQuestion],
    pub responses: &'a [VideoResponse],
    pub generated_questions: &'a str,
    pub submitted_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
    pub storage_error: &'a str,
}

impl<'a> FallbackEntry<'a> {
    pub fn new(record: &'a ApplicationRecord, storage_error: &'a str) -> Self {
        Self {
            id: record.id,
            profile: &record.profile,
            tech_stack: &record.tech_stack,
            questions: &record.questions,
            responses: &record.responses,
            generated_questions: &record.generated_questions,
            submitted_at: record.submitted_at,
            timestamp: Utc::now(),
            storage_error,
        }
    }
}

pub struct FallbackLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FallbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `record` with `storage_error` and returns the new entry count.
    /// Blocking; call from the blocking pool.
    pub fn append(
        &self,
        record: &ApplicationRecord,
        storage_error: &str,
    ) -> Result<usize, FallbackError> {
        let _guard = self.lock.lock().map_err(|_| FallbackError::Poisoned)?;

        let mut entries = self.read_entries()?;
        entries.push(serde_json::to_value(FallbackEntry::new(record, storage_error))?);
        self.write_entries(&entries)?;

        Ok(entries.len())
    }

    /// All entries currently in the log. A missing file is an empty log.
    pub fn entries(&self) -> Result<Vec<Value>, FallbackError> {
        let _guard = self.lock.lock().map_err(|_| FallbackError::Poisoned)?;
        self.read_entries()
    }

    fn read_entries(&self) -> Result<Vec<Value>, FallbackError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_entries(&self, entries: &[Value]) -> Result<(), FallbackError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
