//! Shared debug logging utilities for hooks.
//!
//! Each channel (one per hook, plus `tts` and `llm`) gets its own file under
//! /tmp. Logging is off unless `CLAUDE_HOOKS_DEBUG` holds a value other than
//! empty or `0`, or the config enables it. Write failures are ignored.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Env var that turns debug logging on
pub const DEBUG_ENV: &str = "CLAUDE_HOOKS_DEBUG";

static FORCE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn debug logging on for the rest of the process
pub fn enable() {
    FORCE_ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    FORCE_ENABLED.load(Ordering::Relaxed)
        || env_value_enables(std::env::var(DEBUG_ENV).ok().as_deref())
}

/// `CLAUDE_HOOKS_DEBUG` counts only when non-empty and not `0`
fn env_value_enables(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if !v.is_empty() && v != "0")
}

/// Get log file path for a specific channel
pub fn get_log_path(channel: &str) -> PathBuf {
    PathBuf::from(format!("/tmp/claude-hooks-{}.log", channel))
}

/// Append one timestamped line to `path`
pub fn write_line(path: &Path, channel: &str, msg: &str) {
    let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
    let line = format!("[{}] [{}] {}\n", timestamp, channel, msg);
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Debug logging with channel prefix
pub fn debug(channel: &str, msg: &str) {
    if !is_enabled() {
        return;
    }
    write_line(&get_log_path(channel), channel, msg);
}

/// Format and log to a channel
#[macro_export]
macro_rules! hook_debug {
    ($channel:expr, $($arg:tt)*) => {
        $crate::hooks::debug::debug($channel, &format!($($arg)*))
    };
}
