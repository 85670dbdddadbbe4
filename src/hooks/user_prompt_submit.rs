//! User prompt submit hook handler.
//!
//! Logs the prompt, optionally appends it to the session history, and with
//! `--validate` refuses prompts containing a configured pattern.

use serde_json::Value;

use crate::cli::{HookType, PromptFlags};
use crate::config::BlockedPromptPattern;
use crate::hook_debug;

use super::{HookContext, HookInput, HookOutcome};

const HOOK_NAME: &str = "user-prompt-submit";

/// Check a prompt against blocked patterns (case-insensitive substring).
///
/// Returns the reason of the first matching pattern. Empty patterns never match.
pub fn validate_prompt<'a>(prompt: &str, patterns: &'a [BlockedPromptPattern]) -> Option<&'a str> {
    let prompt_lower = prompt.to_lowercase();
    patterns
        .iter()
        .filter(|p| !p.pattern.is_empty())
        .find(|p| prompt_lower.contains(&p.pattern.to_lowercase()))
        .map(|p| p.reason.as_str())
}

/// Handle the user-prompt-submit hook.
///
/// 1. Log the payload
/// 2. Store the prompt when `--store-last-prompt` is given
/// 3. Validate unless `--log-only`
pub fn handle_user_prompt_submit(
    ctx: &HookContext,
    input: &HookInput,
    raw: &Value,
    flags: &PromptFlags,
) -> HookOutcome {
    let session_id = input.session_id_or_unknown();
    let prompt = input.prompt.as_deref().unwrap_or("");

    ctx.record(&HookType::UserPromptSubmit(flags.clone()), raw);

    if flags.store_last_prompt {
        if let Err(e) = ctx.sessions.record_prompt(session_id, prompt) {
            hook_debug!(HOOK_NAME, "Failed to store prompt: {}", e);
        }
    }

    if flags.validate && !flags.log_only {
        if let Some(reason) = validate_prompt(prompt, &ctx.config.blocked_prompt_patterns) {
            hook_debug!(HOOK_NAME, "Prompt blocked for session {}", session_id);
            return HookOutcome::block(format!("Prompt blocked: {}", reason));
        }
    }

    HookOutcome::Continue
}
