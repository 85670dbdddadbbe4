//! Session start hook handler.
//!
//! Logs the session start and, on request, injects development context and
//! speaks a greeting.

use chrono::{DateTime, Local};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{HookType, SessionStartFlags};
use crate::hook_debug;
use crate::tts::session_greeting;

use super::{HookContext, HookInput, HookOutcome};

const HOOK_NAME: &str = "session-start";

/// Maximum characters taken from each context file
const CONTEXT_FILE_LIMIT: usize = 1000;

/// Build the context block injected at session start.
///
/// Context files are resolved against `base`; missing or blank files are
/// skipped and each file contributes at most its first 1000 characters.
pub fn load_development_context(
    source: &str,
    context_files: &[PathBuf],
    base: &Path,
    now: DateTime<Local>,
) -> String {
    let mut parts = vec![
        format!("Session started at: {}", now.format("%Y-%m-%d %H:%M:%S")),
        format!("Session source: {}", source),
    ];

    for file in context_files {
        let Ok(content) = fs::read_to_string(base.join(file)) else {
            continue;
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        parts.push(format!("\n--- Content from {} ---", file.display()));
        parts.push(content.chars().take(CONTEXT_FILE_LIMIT).collect());
    }

    parts.join("\n")
}

/// Wrap context in the host's SessionStart output shape
pub fn context_output(context: &str) -> Value {
    json!({
        "hookSpecificOutput": {
            "hookEventName": "SessionStart",
            "additionalContext": context
        }
    })
}

/// Handle the session-start hook.
///
/// 1. Log the payload
/// 2. Speak a greeting when `--announce` is given
/// 3. Print development context when `--load-context` is given
pub async fn handle_session_start(
    ctx: &HookContext,
    input: &HookInput,
    raw: &Value,
    flags: &SessionStartFlags,
) -> HookOutcome {
    let source = input.source.as_deref().unwrap_or("unknown");
    hook_debug!(
        HOOK_NAME,
        "Session {} started ({})",
        input.session_id_or_unknown(),
        source
    );

    ctx.record(&HookType::SessionStart(flags.clone()), raw);

    if flags.announce {
        ctx.tts().speak(session_greeting(source)).await;
    }

    if flags.load_context {
        let base = input.cwd.as_deref().map(PathBuf::from).unwrap_or_default();
        let context = load_development_context(source, &ctx.config.context_files, &base, Local::now());
        return HookOutcome::Output(context_output(&context));
    }

    HookOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HooksConfig;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn files() -> Vec<PathBuf> {
        vec![PathBuf::from("CONTEXT.md"), PathBuf::from("TODO.md")]
    }

    // -------------------------------------------------------------------------
    // load_development_context tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_context_header_only_without_files() {
        let dir = tempdir().unwrap();
        let context = load_development_context("startup", &files(), dir.path(), fixed_now());
        assert_eq!(
            context,
            "Session started at: 2026-03-14 09:26:53\nSession source: startup"
        );
    }

    #[test]
    fn test_context_includes_file_contents() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("TODO.md"), "\n- ship it\n").unwrap();

        let context = load_development_context("resume", &files(), dir.path(), fixed_now());
        assert!(context.ends_with("\n\n--- Content from TODO.md ---\n- ship it"));
        assert!(!context.contains("CONTEXT.md"));
    }

    #[test]
    fn test_context_skips_blank_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("CONTEXT.md"), "   \n").unwrap();

        let context = load_development_context("clear", &files(), dir.path(), fixed_now());
        assert!(!context.contains("--- Content from"));
    }

    #[test]
    fn test_context_truncates_long_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("CONTEXT.md"), "é".repeat(1500)).unwrap();

        let context = load_development_context("startup", &files(), dir.path(), fixed_now());
        let body = context.rsplit('\n').next().unwrap();
        assert_eq!(body.chars().count(), 1000);
    }

    #[test]
    fn test_context_output_shape() {
        let output = context_output("hello");
        assert_eq!(output["hookSpecificOutput"]["hookEventName"], "SessionStart");
        assert_eq!(output["hookSpecificOutput"]["additionalContext"], "hello");
    }

    // -------------------------------------------------------------------------
    // Handler tests
    // -------------------------------------------------------------------------

    fn context(dir: &Path) -> HookContext {
        HookContext::new(HooksConfig {
            log_dir: dir.join("logs"),
            context_files: vec![PathBuf::from("CONTEXT.md")],
            tts_providers: Vec::new(),
            ..HooksConfig::default()
        })
    }

    #[tokio::test]
    async fn test_session_start_logs_and_continues() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let raw = json!({"session_id": "s1", "source": "startup"});
        let input = HookInput::from_value(&raw).unwrap();

        let outcome = handle_session_start(&ctx, &input, &raw, &SessionStartFlags::default()).await;
        assert_eq!(outcome, HookOutcome::Continue);
        assert_eq!(ctx.log.read_all("session_start"), vec![raw]);
    }

    #[tokio::test]
    async fn test_session_start_load_context_uses_cwd() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("CONTEXT.md"), "Project notes").unwrap();
        let ctx = context(dir.path());
        let raw = json!({
            "session_id": "s1",
            "source": "resume",
            "cwd": dir.path().to_string_lossy()
        });
        let input = HookInput::from_value(&raw).unwrap();
        let flags = SessionStartFlags {
            load_context: true,
            announce: true,
        };

        let outcome = handle_session_start(&ctx, &input, &raw, &flags).await;
        let HookOutcome::Output(output) = outcome else {
            panic!("Expected context output, got {:?}", outcome);
        };
        let context = output["hookSpecificOutput"]["additionalContext"]
            .as_str()
            .unwrap();
        assert!(context.contains("Session source: resume"));
        assert!(context.contains("Project notes"));
    }
}
