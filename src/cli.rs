// CLI Parser - Clap derive definitions
// One subcommand per host lifecycle event, plus guard/log inspection helpers.

use clap::{Args, CommandFactory, Parser, Subcommand};

/// Claude Hooks: lifecycle hooks with a pre-tool-use safety guard
#[derive(Parser, Debug)]
#[command(name = "claude-hooks")]
#[command(version)]
#[command(about = "Lifecycle hooks for Claude Code with a pre-tool-use safety guard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Hook(HookType),

    /// Evaluate a tool invocation from stdin and print the decision as JSON
    Check,

    /// Show recent entries from a hook's JSON log
    Logs {
        /// Log name, e.g. pre_tool_use or pre-tool-use
        hook: String,
        /// Number of entries
        #[arg(default_value = "20")]
        n: usize,
    },
}

/// Hook subcommands invoked by the host; each reads one JSON payload on stdin.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum HookType {
    /// Guard a tool call before it runs (exit 2 blocks it)
    PreToolUse,
    /// Record a completed tool call
    PostToolUse,
    /// Record (and optionally validate) a submitted prompt
    UserPromptSubmit(PromptFlags),
    /// Record session start, optionally injecting context
    SessionStart(SessionStartFlags),
    /// Record the end of a response
    Stop(StopFlags),
    /// Record (and optionally speak) a host notification
    Notification(NotificationFlags),
    /// Record a context compaction
    PreCompact,
}

impl HookType {
    /// Kebab-case name, also used as the debug log channel
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreToolUse => "pre-tool-use",
            HookType::PostToolUse => "post-tool-use",
            HookType::UserPromptSubmit(_) => "user-prompt-submit",
            HookType::SessionStart(_) => "session-start",
            HookType::Stop(_) => "stop",
            HookType::Notification(_) => "notification",
            HookType::PreCompact => "pre-compact",
        }
    }

    /// Base name of the hook's JSON log file
    pub fn log_name(&self) -> &'static str {
        match self {
            HookType::PreToolUse => "pre_tool_use",
            HookType::PostToolUse => "post_tool_use",
            HookType::UserPromptSubmit(_) => "user_prompt_submit",
            HookType::SessionStart(_) => "session_start",
            HookType::Stop(_) => "stop",
            HookType::Notification(_) => "notification",
            HookType::PreCompact => "pre_compact",
        }
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct PromptFlags {
    /// Block prompts matching configured patterns
    #[arg(long)]
    pub validate: bool,
    /// Only log; disables --validate
    #[arg(long)]
    pub log_only: bool,
    /// Append the prompt to the session's history file
    #[arg(long)]
    pub store_last_prompt: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SessionStartFlags {
    /// Print development context for the host to inject
    #[arg(long)]
    pub load_context: bool,
    /// Speak a greeting
    #[arg(long)]
    pub announce: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct StopFlags {
    /// Export the transcript to chat.json
    #[arg(long)]
    pub chat: bool,
    /// Speak a completion message
    #[arg(long)]
    pub notify: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct NotificationFlags {
    /// Speak the notification
    #[arg(long)]
    pub tts: bool,
}

/// Normalize a user-supplied log name (`pre-tool-use` → `pre_tool_use`).
///
/// Returns `None` for names that would resolve outside the log directory.
pub fn normalize_log_name(name: &str) -> Option<String> {
    let name = name.trim().trim_end_matches(".json");
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return None;
    }
    Some(name.replace('-', "_"))
}

/// Whether `args` (program name first) invoke a hook subcommand
pub fn is_hook_invocation(args: &[String]) -> bool {
    args.get(1).is_some_and(|name| HookType::has_subcommand(name))
}

/// Long flags (with `--`) defined by the hook subcommand `name`
fn hook_flags(name: &str) -> Vec<String> {
    Cli::command()
        .find_subcommand(name)
        .map(|sub| {
            sub.get_arguments()
                .filter_map(|arg| arg.get_long())
                .map(|long| format!("--{}", long))
                .collect()
        })
        .unwrap_or_default()
}

/// Drop arguments a hook subcommand does not define.
///
/// Hooks take only boolean flags, so anything else the host passes is
/// ignored. Non-hook commands are returned unchanged.
pub fn retain_known_hook_args(args: Vec<String>) -> Vec<String> {
    if !is_hook_invocation(&args) {
        return args;
    }
    let mut known = hook_flags(&args[1]);
    known.extend(["-h".to_string(), "--help".to_string()]);

    args.into_iter()
        .enumerate()
        .filter(|(i, arg)| *i < 2 || known.contains(arg))
        .map(|(_, arg)| arg)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
