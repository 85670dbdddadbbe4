//! Claude Hooks: lifecycle hooks CLI
//!
//! Main entry point. Hook subcommands exit 0 or 2 for the host; the
//! inspection commands print JSON.

use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;

use claude_hooks::cli::{is_hook_invocation, retain_known_hook_args};
use claude_hooks::hooks::{self, debug, EXIT_CONTINUE};
use claude_hooks::{
    evaluate, hook_debug, normalize_log_name, Cli, Command, ErrorResponse, HookType, HooksConfig,
    JsonLog, ToolInvocation,
};

#[tokio::main]
async fn main() {
    // Provider API keys may live in the project's .env
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let args = retain_known_hook_args(args);

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => exit_on_parse_error(&args, e),
    };

    let code = match cli.command {
        Command::Hook(hook) => run_hook(&hook).await,
        Command::Check => run_check(),
        Command::Logs { hook, n } => run_logs(&hook, n),
    };
    std::process::exit(code);
}

/// Help and version print as usual; a hook never fails on its arguments.
fn exit_on_parse_error(args: &[String], e: clap::Error) -> ! {
    let informational = matches!(
        e.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if !informational && is_hook_invocation(args) {
        hook_debug!(&args[1], "Ignoring argument error: {}", e);
        std::process::exit(EXIT_CONTINUE);
    }
    e.exit()
}

/// Load config, falling back to defaults so the guard always runs
fn load_config(channel: &str) -> HooksConfig {
    match HooksConfig::load() {
        Ok(config) => config,
        Err(e) => {
            hook_debug!(channel, "Config error, using defaults: {}", e);
            HooksConfig::default()
        }
    }
}

async fn run_hook(hook: &HookType) -> i32 {
    let config = load_config(hook.name());
    if config.debug {
        debug::enable();
    }
    let payload = hooks::read_payload();
    hooks::run(hook, config, payload).await
}

fn run_check() -> i32 {
    match hooks::read_payload() {
        Ok(raw) => print_json(&evaluate(&ToolInvocation::from(raw))),
        Err(e) => {
            print_json(&ErrorResponse::new(format!("Invalid tool invocation: {}", e)));
            1
        }
    }
}

fn run_logs(hook: &str, n: usize) -> i32 {
    let Some(name) = normalize_log_name(hook) else {
        print_json(&ErrorResponse::new(format!("Invalid log name: {}", hook)));
        return 1;
    };
    let config = load_config("logs");
    let log = JsonLog::new(config.log_dir);
    print_json(&log.recent(&name, n))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            1
        }
    }
}
