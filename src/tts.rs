//! Text-to-speech dispatch over configured provider commands.
//!
//! Providers run in priority order with the text appended as the last
//! argument; the first one that exits cleanly wins. Failures are only
//! recorded in the `tts` debug channel.

use std::time::Duration;

use crate::config::{HooksConfig, ProviderCommand};
use crate::fallback::first_success;
use crate::hook_debug;
use crate::process::run_command;

const CHANNEL: &str = "tts";

#[derive(Debug, Clone)]
pub struct TtsDispatcher {
    providers: Vec<ProviderCommand>,
    timeout: Duration,
}

impl TtsDispatcher {
    pub fn new(providers: Vec<ProviderCommand>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn from_config(config: &HooksConfig) -> Self {
        Self::new(config.tts_providers.clone(), config.timeout())
    }

    /// Providers whose prerequisites are present, in priority order
    pub fn available(&self) -> Vec<&ProviderCommand> {
        self.providers.iter().filter(|p| p.is_available()).collect()
    }

    /// Speak `text`; returns the name of the provider that handled it.
    pub async fn speak(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let spoken = first_success(
            self.available(),
            |p| p.name.clone(),
            |p| async move {
                let mut args = p.args.clone();
                args.push(text.to_string());
                run_command(&p.program, &args, self.timeout).await?;
                Ok(p.name.clone())
            },
            |name, err| hook_debug!(CHANNEL, "{} failed: {:#}", name, err),
        )
        .await;

        match &spoken {
            Some(name) => hook_debug!(CHANNEL, "spoke via {}", name),
            None => hook_debug!(CHANNEL, "no provider spoke"),
        }
        spoken
    }
}

/// Spoken prefix for a notification type
pub fn speech_prefix(notification_type: Option<&str>) -> &'static str {
    match notification_type {
        Some("info") => "Information",
        Some("warning") => "Warning",
        Some("error") => "Error",
        Some("success") => "Success",
        _ => "Notification",
    }
}

/// Format a notification for speech, e.g. `Warning: disk almost full`
pub fn format_notification(notification_type: Option<&str>, message: &str) -> String {
    format!("{}: {}", speech_prefix(notification_type), message)
}

/// Greeting spoken by `session-start --announce`
pub fn session_greeting(source: &str) -> &'static str {
    match source {
        "startup" => "Claude Code session started",
        "resume" => "Resuming previous session",
        "clear" => "Starting fresh session",
        _ => "Session started",
    }
}
