pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod guard;
pub mod hooks;
pub mod llm;
pub mod logging;
pub mod process;
pub mod response;
pub mod session;
pub mod tts;

pub use cli::{normalize_log_name, Cli, Command, HookType};
pub use config::HooksConfig;
pub use error::{HooksError, Result};
pub use guard::{evaluate, Classification, GuardDecision, ToolInvocation, ToolUseGuard};
pub use hooks::{dispatch, HookContext, HookInput, HookOutcome};
pub use logging::JsonLog;
pub use response::ErrorResponse;
pub use session::{SessionData, SessionStore};
