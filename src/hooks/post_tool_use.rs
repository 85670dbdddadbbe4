//! PostToolUse hook handler.
//!
//! Appends the completed tool call to `post_tool_use.json`. Never blocks.

use serde_json::Value;

use crate::cli::HookType;
use crate::hook_debug;

use super::{HookContext, HookOutcome};

/// Handle the PostToolUse hook
pub fn handle_post_tool_use(ctx: &HookContext, raw: &Value) -> HookOutcome {
    let tool = raw.get("tool_name").and_then(Value::as_str).unwrap_or("");
    hook_debug!("post-tool-use", "Tool finished: {}", tool);

    ctx.record(&HookType::PostToolUse, raw);
    HookOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HooksConfig;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_post_tool_use_logs_payload() {
        let dir = tempdir().unwrap();
        let ctx = HookContext::new(HooksConfig {
            log_dir: dir.path().to_path_buf(),
            ..HooksConfig::default()
        });
        let raw = json!({
            "tool_name": "Write",
            "tool_input": {"file_path": "src/main.rs"},
            "tool_response": {"success": true}
        });

        assert_eq!(handle_post_tool_use(&ctx, &raw), HookOutcome::Continue);
        assert_eq!(handle_post_tool_use(&ctx, &json!({})), HookOutcome::Continue);

        let entries = ctx.log.read_all("post_tool_use");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], raw);
    }
}
