//! PreCompact hook handler.

use serde_json::Value;

use crate::cli::HookType;

use super::{HookContext, HookOutcome};

/// Record the compaction request in `pre_compact.json`
pub fn handle_pre_compact(ctx: &HookContext, raw: &Value) -> HookOutcome {
    ctx.record(&HookType::PreCompact, raw);
    HookOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HooksConfig;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_pre_compact_appends_to_existing_log() {
        let dir = tempdir().unwrap();
        let ctx = HookContext::new(HooksConfig {
            log_dir: dir.path().to_path_buf(),
            ..HooksConfig::default()
        });
        ctx.log
            .write_all("pre_compact", &[json!({"trigger": "auto"})])
            .unwrap();

        let raw = json!({"session_id": "s1", "trigger": "manual"});
        assert_eq!(handle_pre_compact(&ctx, &raw), HookOutcome::Continue);

        let entries = ctx.log.read_all("pre_compact");
        assert_eq!(entries, vec![json!({"trigger": "auto"}), raw]);
    }
}
