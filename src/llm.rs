//! Short text completion over configured provider commands.
//!
//! The prompt is appended as the last argument; a provider succeeds when it
//! exits cleanly with non-empty stdout. When none does, a random canned
//! message is returned so callers always get text.

use anyhow::bail;
use rand::Rng;
use std::time::Duration;

use crate::config::{HooksConfig, ProviderCommand};
use crate::fallback::first_success;
use crate::hook_debug;
use crate::process::run_command;

const CHANNEL: &str = "llm";

/// Argument the provider scripts read as "write a completion message"
pub const COMPLETION_REQUEST: &str = "--completion";

const LAST_RESORT: &str = "Done!";

#[derive(Debug, Clone)]
pub struct CompletionGenerator {
    providers: Vec<ProviderCommand>,
    fallback_messages: Vec<String>,
    timeout: Duration,
}

impl CompletionGenerator {
    pub fn new(
        providers: Vec<ProviderCommand>,
        fallback_messages: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            providers,
            fallback_messages,
            timeout,
        }
    }

    pub fn from_config(config: &HooksConfig) -> Self {
        Self::new(
            config.llm_providers.clone(),
            config.completion_messages.clone(),
            config.timeout(),
        )
    }

    /// Ask providers in order; fall back to a random canned message.
    pub async fn generate(&self, prompt: &str) -> String {
        let available = self.providers.iter().filter(|p| p.is_available());

        let answer = first_success(
            available,
            |p| p.name.clone(),
            |p| async move {
                let mut args = p.args.clone();
                args.push(prompt.to_string());
                let text = run_command(&p.program, &args, self.timeout).await?;
                if text.is_empty() {
                    bail!("{} returned no text", p.name);
                }
                Ok(text)
            },
            |name, err| hook_debug!(CHANNEL, "{} failed: {:#}", name, err),
        )
        .await;

        answer.unwrap_or_else(|| {
            hook_debug!(CHANNEL, "no provider answered, using fallback");
            self.random_fallback()
        })
    }

    pub fn random_fallback(&self) -> String {
        if self.fallback_messages.is_empty() {
            return LAST_RESORT.to_string();
        }
        let idx = rand::rng().random_range(0..self.fallback_messages.len());
        self.fallback_messages[idx].clone()
    }
}
