//! Stop hook handler.
//!
//! Runs when the agent finishes responding. Logs the event and optionally
//! exports the transcript and announces completion.

use serde_json::Value;
use std::path::Path;

use crate::cli::{HookType, StopFlags};
use crate::hook_debug;
use crate::llm::COMPLETION_REQUEST;

use super::{HookContext, HookInput, HookOutcome};

const HOOK_NAME: &str = "stop";

/// Speak an LLM-generated completion line through the first working TTS provider.
///
/// Nothing is generated when no TTS provider is available.
async fn announce_completion(ctx: &HookContext) {
    let tts = ctx.tts();
    if tts.available().is_empty() {
        hook_debug!(HOOK_NAME, "No TTS provider available, skipping announcement");
        return;
    }

    let message = ctx.completions().generate(COMPLETION_REQUEST).await;
    hook_debug!(HOOK_NAME, "Announcing: {}", message);
    tts.speak(&message).await;
}

/// Handle the stop hook.
///
/// 1. Log the payload
/// 2. Export the transcript to chat.json when `--chat` is given
/// 3. Announce completion when `--notify` is given
pub async fn handle_stop(
    ctx: &HookContext,
    input: &HookInput,
    raw: &Value,
    flags: &StopFlags,
) -> HookOutcome {
    hook_debug!(
        HOOK_NAME,
        "Session {} stopped (stop_hook_active={})",
        input.session_id_or_unknown(),
        input.stop_hook_active.unwrap_or(false)
    );

    ctx.record(&HookType::Stop(flags.clone()), raw);

    if flags.chat {
        if let Some(transcript) = input.transcript_path.as_deref() {
            match ctx.log.export_transcript(Path::new(transcript)) {
                Ok(count) => hook_debug!(HOOK_NAME, "Exported {} transcript messages", count),
                Err(e) => hook_debug!(HOOK_NAME, "Transcript export failed: {}", e),
            }
        }
    }

    if flags.notify {
        announce_completion(ctx).await;
    }

    HookOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HooksConfig;
    use crate::logging::CHAT_LOG_NAME;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn context(dir: &Path) -> HookContext {
        HookContext::new(HooksConfig {
            log_dir: dir.join("logs"),
            tts_providers: Vec::new(),
            llm_providers: Vec::new(),
            ..HooksConfig::default()
        })
    }

    async fn run(ctx: &HookContext, raw: Value, flags: StopFlags) -> HookOutcome {
        let input = HookInput::from_value(&raw).unwrap();
        handle_stop(ctx, &input, &raw, &flags).await
    }

    #[tokio::test]
    async fn test_stop_logs_payload() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let raw = json!({"session_id": "s1", "stop_hook_active": false});

        assert_eq!(run(&ctx, raw.clone(), StopFlags::default()).await, HookOutcome::Continue);
        assert_eq!(ctx.log.read_all("stop"), vec![raw]);
        assert!(!ctx.log.path(CHAT_LOG_NAME).exists());
    }

    #[tokio::test]
    async fn test_stop_chat_exports_transcript() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let transcript = dir.path().join("transcript.jsonl");
        fs::write(
            &transcript,
            "{\"role\":\"user\",\"content\":\"hi\"}\nnot json\n\n{\"role\":\"assistant\"}\n",
        )
        .unwrap();
        let raw = json!({"session_id": "s1", "transcript_path": transcript.to_string_lossy()});
        let flags = StopFlags {
            chat: true,
            notify: false,
        };

        assert_eq!(run(&ctx, raw, flags).await, HookOutcome::Continue);
        assert_eq!(
            ctx.log.read_all(CHAT_LOG_NAME),
            vec![
                json!({"role": "user", "content": "hi"}),
                json!({"role": "assistant"})
            ]
        );
    }

    #[tokio::test]
    async fn test_stop_chat_missing_transcript_continues() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let raw = json!({"session_id": "s1", "transcript_path": "/nonexistent/t.jsonl"});
        let flags = StopFlags {
            chat: true,
            notify: false,
        };

        assert_eq!(run(&ctx, raw, flags).await, HookOutcome::Continue);
        assert!(!ctx.log.path(CHAT_LOG_NAME).exists());
    }

    #[tokio::test]
    async fn test_stop_notify_without_providers_is_silent() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let flags = StopFlags {
            chat: false,
            notify: true,
        };

        assert_eq!(run(&ctx, json!({}), flags).await, HookOutcome::Continue);
        assert_eq!(ctx.log.read_all("stop").len(), 1);
    }
}
