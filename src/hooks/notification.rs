//! Notification hook handler.
//!
//! Wraps each host notification in a timestamped log entry and optionally
//! speaks it.

use chrono::Utc;
use serde_json::{json, Value};

use crate::cli::{HookType, NotificationFlags};
use crate::hook_debug;
use crate::tts::format_notification;

use super::{HookContext, HookInput, HookOutcome};

const HOOK_NAME: &str = "notification";

/// Env var that enables notification speech without `--tts`
pub const NOTIFICATION_TTS_ENV: &str = "ENABLE_NOTIFICATION_TTS";

/// Log entry written to notification.json
pub fn notification_entry(input: &HookInput, raw: &Value) -> Value {
    json!({
        "timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "session_id": input.session_id,
        "type": "notification",
        "data": raw
    })
}

fn tts_enabled(ctx: &HookContext, flags: &NotificationFlags) -> bool {
    flags.tts
        || ctx.config.notification_tts
        || std::env::var(NOTIFICATION_TTS_ENV).is_ok_and(|v| v == "true")
}

/// Handle the notification hook
pub async fn handle_notification(
    ctx: &HookContext,
    input: &HookInput,
    raw: &Value,
    flags: &NotificationFlags,
) -> HookOutcome {
    ctx.record(
        &HookType::Notification(flags.clone()),
        &notification_entry(input, raw),
    );

    let message = input.message.as_deref().unwrap_or("").trim();
    if tts_enabled(ctx, flags) && !message.is_empty() {
        let text = format_notification(input.notification_type.as_deref(), message);
        if ctx.tts().speak(&text).await.is_none() {
            hook_debug!(HOOK_NAME, "Notification was not spoken");
        }
    }

    HookOutcome::Continue
}
