//! Append-only JSON event logs.
//!
//! Each hook owns `<log_dir>/<name>.json`, a pretty-printed JSON array that
//! grows by one element per invocation. A missing or corrupt file starts a
//! fresh array.

use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used for the exported transcript
pub const CHAT_LOG_NAME: &str = "chat";

#[derive(Debug, Clone)]
pub struct JsonLog {
    dir: PathBuf,
}

impl JsonLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the log for `name`
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Read all entries; missing or unparsable files read as empty.
    pub fn read_all(&self, name: &str) -> Vec<Value> {
        fs::read_to_string(self.path(name))
            .ok()
            .and_then(|content| serde_json::from_str::<Vec<Value>>(&content).ok())
            .unwrap_or_default()
    }

    /// Append one entry and rewrite the file. Returns the new entry count.
    pub fn append(&self, name: &str, entry: &Value) -> Result<usize> {
        fs::create_dir_all(&self.dir)?;
        let mut entries = self.read_all(name);
        entries.push(entry.clone());
        self.write_all(name, &entries)?;
        Ok(entries.len())
    }

    /// Replace the log for `name` with `entries`.
    pub fn write_all(&self, name: &str, entries: &[Value]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(self.path(name), content)?;
        Ok(())
    }

    /// Most recent `limit` entries, newest first.
    pub fn recent(&self, name: &str, limit: usize) -> Vec<Value> {
        let mut entries = self.read_all(name);
        entries.reverse();
        entries.truncate(limit);
        entries
    }

    /// Convert a JSONL transcript into `chat.json`. Invalid lines are skipped.
    pub fn export_transcript(&self, transcript_path: &Path) -> Result<usize> {
        let content = fs::read_to_string(transcript_path)?;
        let messages = parse_jsonl(&content);
        self.write_all(CHAT_LOG_NAME, &messages)?;
        Ok(messages.len())
    }
}

/// Parse JSON Lines, dropping blank and malformed lines.
pub fn parse_jsonl(content: &str) -> Vec<Value> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}
