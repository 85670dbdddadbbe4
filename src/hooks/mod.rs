//! Hook handlers for Claude Code settings.json integration.
//!
//! Each hook reads one JSON payload from stdin and reports through its exit
//! code: 0 lets the host continue, 2 blocks and surfaces stderr to the agent.
//! Every other failure resolves to 0 so a broken hook never wedges the host.

pub mod debug;
pub mod notification;
pub mod pre_compact;
pub mod pre_tool_use;
pub mod post_tool_use;
pub mod session_start;
pub mod stop;
pub mod user_prompt_submit;

pub use notification::handle_notification;
pub use pre_compact::handle_pre_compact;
pub use pre_tool_use::handle_pre_tool_use;
pub use post_tool_use::handle_post_tool_use;
pub use session_start::handle_session_start;
pub use stop::handle_stop;
pub use user_prompt_submit::handle_user_prompt_submit;

use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

use crate::cli::HookType;
use crate::config::HooksConfig;
use crate::error::{HooksError, Result};
use crate::guard::ToolUseGuard;
use crate::llm::CompletionGenerator;
use crate::logging::JsonLog;
use crate::session::SessionStore;
use crate::tts::TtsDispatcher;

/// Exit code that lets the host proceed
pub const EXIT_CONTINUE: i32 = 0;

/// Exit code that blocks the action and shows stderr to the agent
pub const EXIT_BLOCK: i32 = 2;

/// Common fields of hook payloads (all optional; unknown fields ignored)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    /// Claude's session identifier
    #[serde(alias = "sessionId")]
    pub session_id: Option<String>,
    /// User's prompt (for UserPromptSubmit)
    pub prompt: Option<String>,
    /// Path to transcript file
    pub transcript_path: Option<String>,
    /// Current working directory
    pub cwd: Option<String>,
    /// Hook event name
    pub hook_event_name: Option<String>,
    /// Session start source: startup, resume, clear
    pub source: Option<String>,
    /// Notification text
    pub message: Option<String>,
    /// Notification type: info, warning, error, success
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    /// Whether a stop hook is already driving continuation
    pub stop_hook_active: Option<bool>,
}

impl HookInput {
    pub fn from_value(raw: &Value) -> Result<Self> {
        Ok(serde_json::from_value(raw.clone())?)
    }

    pub fn session_id_or_unknown(&self) -> &str {
        self.session_id.as_deref().unwrap_or("unknown")
    }
}

/// What a hook tells the host
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// Proceed silently
    Continue,
    /// Proceed, printing JSON for the host to consume
    Output(Value),
    /// Block, printing `message` to stderr
    Block { message: String },
}

impl HookOutcome {
    pub fn block(message: impl Into<String>) -> Self {
        HookOutcome::Block {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            HookOutcome::Continue | HookOutcome::Output(_) => EXIT_CONTINUE,
            HookOutcome::Block { .. } => EXIT_BLOCK,
        }
    }

    /// Write the outcome to stdout/stderr and return the exit code
    pub fn emit(&self) -> i32 {
        match self {
            HookOutcome::Continue => {}
            HookOutcome::Output(json) => println!("{}", json),
            HookOutcome::Block { message } => eprintln!("{}", message),
        }
        self.exit_code()
    }
}

/// Everything a handler needs, built once per process
#[derive(Debug, Clone)]
pub struct HookContext {
    pub config: HooksConfig,
    pub log: JsonLog,
    pub sessions: SessionStore,
    pub guard: ToolUseGuard,
}

impl HookContext {
    pub fn new(config: HooksConfig) -> Self {
        let log = JsonLog::new(config.log_dir.clone());
        Self {
            config,
            log,
            sessions: SessionStore::default(),
            guard: ToolUseGuard::new(),
        }
    }

    pub fn tts(&self) -> TtsDispatcher {
        TtsDispatcher::from_config(&self.config)
    }

    pub fn completions(&self) -> CompletionGenerator {
        CompletionGenerator::from_config(&self.config)
    }

    /// Append to a hook log, recording but swallowing failures
    pub fn record(&self, hook: &HookType, entry: &Value) {
        if let Err(e) = self.log.append(hook.log_name(), entry) {
            debug::debug(hook.name(), &format!("Failed to append log: {}", e));
        }
    }
}

/// Parse a hook payload. Empty input is an error so callers fail open.
pub fn parse_payload(content: &str) -> Result<Value> {
    if content.trim().is_empty() {
        return Err(HooksError::EmptyInput);
    }
    Ok(serde_json::from_str(content)?)
}

/// Read and parse the payload from stdin
pub fn read_payload() -> Result<Value> {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    parse_payload(&content)
}

/// Route a payload to its handler
pub async fn dispatch(ctx: &HookContext, hook: &HookType, raw: &Value) -> Result<HookOutcome> {
    match hook {
        HookType::PreToolUse => Ok(handle_pre_tool_use(ctx, raw)),
        HookType::PostToolUse => Ok(handle_post_tool_use(ctx, raw)),
        HookType::PreCompact => Ok(handle_pre_compact(ctx, raw)),
        HookType::UserPromptSubmit(flags) => {
            let input = HookInput::from_value(raw)?;
            Ok(handle_user_prompt_submit(ctx, &input, raw, flags))
        }
        HookType::SessionStart(flags) => {
            let input = HookInput::from_value(raw)?;
            Ok(handle_session_start(ctx, &input, raw, flags).await)
        }
        HookType::Stop(flags) => {
            let input = HookInput::from_value(raw)?;
            Ok(handle_stop(ctx, &input, raw, flags).await)
        }
        HookType::Notification(flags) => {
            let input = HookInput::from_value(raw)?;
            Ok(handle_notification(ctx, &input, raw, flags).await)
        }
    }
}

/// Run a hook end to end and return the process exit code.
///
/// Only an explicit block yields a non-zero code.
pub async fn run(hook: &HookType, config: HooksConfig, payload: Result<Value>) -> i32 {
    let channel = hook.name();
    let raw = match payload {
        Ok(raw) => raw,
        Err(e) => {
            debug::debug(channel, &format!("Unreadable payload, allowing: {}", e));
            return EXIT_CONTINUE;
        }
    };

    let ctx = HookContext::new(config);
    match dispatch(&ctx, hook, &raw).await {
        Ok(outcome) => outcome.emit(),
        Err(e) => {
            debug::debug(channel, &format!("Hook failed, allowing: {}", e));
            EXIT_CONTINUE
        }
    }
}
