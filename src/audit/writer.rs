// ABOUTME: AuditWriter - appends one JSON line per extracted final answer to
// ABOUTME: a per-subagent log file, creating parent directories as needed.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{Response, Truncator, extract_final_text};
use crate::error::AuditError;

/// Longest file stem derived from a subagent name.
const MAX_FILE_STEM: usize = 120;

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-.]+").expect("file name regex is valid"));

/// Append locks shared by every writer in the process, keyed by log file.
static APPEND_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn append_lock_for(file: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    Arc::clone(APPEND_LOCKS.lock().entry(key).or_default())
}

/// Kind of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    FinalResult,
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Seconds since the Unix epoch.
    pub ts: f64,
    pub kind: RecordKind,
    pub subagent: String,
    /// Extracted answer, possibly truncated.
    pub content: String,
}

impl AuditRecord {
    /// A final-result record stamped with the current time.
    pub fn final_result(subagent: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            ts: now_seconds(),
            kind: RecordKind::FinalResult,
            subagent: subagent.into(),
            content: content.into(),
        }
    }
}

/// Appends final answers for one subagent.
///
/// Writers may be shared across threads, and several writers may target the
/// same file; appends to one file are serialized so every record lands as one
/// whole line.
#[derive(Debug)]
pub struct AuditWriter {
    file: PathBuf,
    subagent: String,
    truncator: Truncator,
    append_lock: Arc<Mutex<()>>,
}

impl AuditWriter {
    /// Create a writer.
    ///
    /// If `path` has a file extension it is the log file; otherwise it is a
    /// directory holding `<sanitized subagent>.jsonl`. Fails when `max_log`
    /// is zero.
    pub fn new(
        path: impl Into<PathBuf>,
        subagent: impl Into<String>,
        max_log: usize,
    ) -> Result<Self, AuditError> {
        let path = path.into();
        let subagent = subagent.into();
        let file = if path.extension().is_some() {
            path
        } else {
            path.join(format!("{}.jsonl", safe_file_name(&subagent)))
        };

        let truncator = Truncator::new(max_log)?;
        let append_lock = append_lock_for(&file);
        Ok(Self {
            file,
            subagent,
            truncator,
            append_lock,
        })
    }

    /// Path of the log file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn subagent(&self) -> &str {
        &self.subagent
    }

    pub fn max_log(&self) -> usize {
        self.truncator.max_len()
    }

    /// Extract, truncate, and append the final answer in `response`.
    ///
    /// Returns `Ok(None)` without writing when no text is found.
    pub fn record(&self, response: &Response) -> Result<Option<AuditRecord>, AuditError> {
        let Some(text) = extract_final_text(response) else {
            debug!(subagent = %self.subagent, "no final text in response, skipping audit");
            return Ok(None);
        };

        let record = AuditRecord::final_result(&self.subagent, self.truncator.truncate(&text));
        self.append(&record)?;
        Ok(Some(record))
    }

    /// Append a record as one JSON line.
    pub fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let io_err = |source| AuditError::Io {
            path: self.file.clone(),
            source,
        };

        let _guard = self.append_lock.lock();
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).map_err(io_err)?;

        debug!(
            subagent = %self.subagent,
            file = %self.file.display(),
            bytes = line.len(),
            "appended audit record"
        );
        Ok(())
    }

    /// Read every record in the log file. A missing file has no records.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let content = match std::fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AuditError::Io {
                    path: self.file.clone(),
                    source,
                });
            }
        };

        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(AuditError::from))
            .collect()
    }
}

/// File stem for a subagent: unsafe runs become `_`, capped in length,
/// with a generated name when nothing usable remains.
pub fn safe_file_name(subagent: &str) -> String {
    let cleaned = UNSAFE_FILE_CHARS.replace_all(subagent.trim(), "_");
    let stem: String = cleaned.chars().take(MAX_FILE_STEM).collect();
    if stem.is_empty() {
        let id = Uuid::new_v4().simple().to_string();
        format!("subagent_{}", &id[..8])
    } else {
        stem
    }
}

fn now_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}
