//! PreToolUse hook handler.
//!
//! Logs every tool call and runs the safety guard over it.
//! Input: JSON with { tool_name, tool_input, ... }
//! Output: exit 2 with `BLOCKED: <reason>` on stderr, otherwise exit 0.

use serde_json::Value;

use crate::cli::HookType;
use crate::guard::{GuardDecision, ToolInvocation};

use super::debug::debug as debug_log;
use super::{HookContext, HookOutcome};

const HOOK_NAME: &str = "pre-tool-use";

/// Debug logging wrapper for this hook
fn debug(msg: &str) {
    debug_log(HOOK_NAME, msg);
}

/// stderr text for a blocked call
pub fn block_message(decision: &GuardDecision) -> Option<String> {
    match decision {
        GuardDecision::Allow => None,
        GuardDecision::Block {
            reason,
            classification,
            ..
        } => {
            let mut message = format!("BLOCKED: {}", reason);
            if let Some(hint) = classification.hint() {
                message.push('\n');
                message.push_str(hint);
            }
            Some(message)
        }
    }
}

/// Handle the PreToolUse hook
pub fn handle_pre_tool_use(ctx: &HookContext, raw: &Value) -> HookOutcome {
    let invocation = ToolInvocation::from(raw.clone());
    debug(&format!("Tool: {}", invocation.tool_name));

    let decision = ctx.guard.evaluate(&invocation);
    ctx.record(&HookType::PreToolUse, raw);

    if let GuardDecision::Block { rule, .. } = &decision {
        debug(&format!("Blocked by rule {}", rule));
    }

    match block_message(&decision) {
        Some(message) => HookOutcome::block(message),
        None => HookOutcome::Continue,
    }
}
