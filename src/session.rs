//! Per-session prompt history.
//!
//! `user-prompt-submit --store-last-prompt` appends each prompt to
//! `.claude/data/sessions/{session_id}.json`. Fields written by other tools
//! are carried through untouched.

use crate::error::{HooksError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SESSIONS_DIR: &str = ".claude/data/sessions";

/// Prompt history persisted between hook invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub session_id: String,
    #[serde(default)]
    pub prompts: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionData {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    pub fn last_prompt(&self) -> Option<&str> {
        self.prompts.last().map(String::as_str)
    }
}

/// Session store rooted at a project directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SESSIONS_DIR)
    }
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the session file path for a session ID.
    ///
    /// IDs containing path separators are rejected so a payload cannot
    /// write outside the sessions directory.
    pub fn session_path(&self, session_id: &str) -> Result<PathBuf> {
        if session_id.is_empty()
            || session_id.contains(['/', '\\'])
            || session_id == "."
            || session_id == ".."
        {
            return Err(HooksError::SessionState(format!(
                "Invalid session id: {:?}",
                session_id
            )));
        }
        Ok(self.dir.join(format!("{}.json", session_id)))
    }

    /// Load session data; a missing, empty or invalid file yields a fresh record.
    pub fn load(&self, session_id: &str) -> Result<SessionData> {
        let path = self.session_path(session_id)?;
        Ok(read_session(&path).unwrap_or_else(|| SessionData::new(session_id)))
    }

    pub fn save(&self, data: &SessionData) -> Result<()> {
        let path = self.session_path(&data.session_id)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }

    /// Append `prompt` to the session's history and persist it.
    pub fn record_prompt(&self, session_id: &str, prompt: &str) -> Result<SessionData> {
        let mut data = self.load(session_id)?;
        data.prompts.push(prompt.to_string());
        self.save(&data)?;
        Ok(data)
    }
}

fn read_session(path: &Path) -> Option<SessionData> {
    let content = fs::read_to_string(path).ok()?;
    if content.trim().is_empty() {
        return None;
    }
    serde_json::from_str(&content).ok()
}
