//! Static pattern table for the tool-use guard.
//!
//! Rules are evaluated top-to-bottom and the first match wins, so every
//! sensitive-file rule sits above every destructive-command rule.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Tools that carry a `file_path` parameter.
pub const FILE_TOOLS: &[&str] = &["Read", "Edit", "MultiEdit", "Write"];

/// The shell tool.
pub const BASH_TOOL: &[&str] = &["Bash"];

/// Suffix that marks a committed template rather than real secrets.
pub const ENV_SAMPLE_SUFFIX: &str = ".env.sample";

/// What a matching rule says about the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    SensitiveFile,
    DestructiveCommand,
}

impl Classification {
    /// Reason surfaced to the agent when a call is blocked.
    pub fn reason(self) -> &'static str {
        match self {
            Classification::SensitiveFile => {
                "Access to .env files containing sensitive data is prohibited"
            }
            Classification::DestructiveCommand => "Dangerous rm command detected and prevented",
        }
    }

    /// Optional follow-up line printed after the reason.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Classification::SensitiveFile => Some("Use .env.sample for template files instead"),
            Classification::DestructiveCommand => None,
        }
    }
}

/// How a rule inspects its field.
#[derive(Debug)]
pub enum Predicate {
    /// Raw value contains `needle` and does not end with `exempt_suffix`.
    ContainsUnlessSuffix {
        needle: &'static str,
        exempt_suffix: &'static str,
    },
    /// Regex over the raw value.
    Raw(Regex),
    /// Regex over the normalized command.
    Normalized(Regex),
    /// `gate` matches the normalized command and so does any of `targets`.
    NormalizedGated { gate: Regex, targets: Vec<Regex> },
}

impl Predicate {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Predicate::ContainsUnlessSuffix {
                needle,
                exempt_suffix,
            } => value.contains(needle) && !value.ends_with(exempt_suffix),
            Predicate::Raw(re) => re.is_match(value),
            Predicate::Normalized(re) => re.is_match(&normalize_command(value)),
            Predicate::NormalizedGated { gate, targets } => {
                let normalized = normalize_command(value);
                gate.is_match(&normalized) && targets.iter().any(|t| t.is_match(&normalized))
            }
        }
    }
}

/// One row of the guard table.
#[derive(Debug)]
pub struct PatternRule {
    pub id: &'static str,
    pub tools: &'static [&'static str],
    pub field: &'static str,
    pub predicate: Predicate,
    pub classification: Classification,
}

impl PatternRule {
    pub fn applies_to(&self, tool_name: &str) -> bool {
        self.tools.contains(&tool_name)
    }

    pub fn matches(&self, value: &str) -> bool {
        self.predicate.is_match(value)
    }
}

/// The guard table, compiled once per process.
pub static RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(build_rules);

/// Lowercase and collapse whitespace runs to a single space.
pub fn normalize_command(command: &str) -> String {
    command
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Regex fragment equivalent to the look-ahead `(?!literal)`.
///
/// Accepts end of text or the first character that departs from `literal`.
/// Consuming that character is harmless because it always ends the pattern.
pub fn not_followed_by(literal: &str) -> String {
    let chars: Vec<char> = literal.chars().collect();
    divergence(&chars)
}

fn divergence(chars: &[char]) -> String {
    match chars {
        [] => String::new(),
        [last] => {
            let c = regex::escape(&last.to_string());
            format!("(?:$|[^{c}])")
        }
        [first, rest @ ..] => {
            let c = regex::escape(&first.to_string());
            format!("(?:$|[^{c}]|{c}{})", divergence(rest))
        }
    }
}

/// Word boundary over ASCII word characters only, so `.envé` still ends at `v`.
const ASCII_BOUNDARY: &str = r"(?-u:\b)";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("guard pattern must compile")
}

fn env_rule(id: &'static str, prefix: &str) -> PatternRule {
    let pattern = format!(
        r"(?i){prefix}\.env{ASCII_BOUNDARY}{}",
        not_followed_by(".sample")
    );
    PatternRule {
        id,
        tools: BASH_TOOL,
        field: "command",
        predicate: Predicate::Raw(compile(&pattern)),
        classification: Classification::SensitiveFile,
    }
}

fn rm_rule(id: &'static str, pattern: &str) -> PatternRule {
    PatternRule {
        id,
        tools: BASH_TOOL,
        field: "command",
        predicate: Predicate::Normalized(compile(pattern)),
        classification: Classification::DestructiveCommand,
    }
}

/// Targets that make a recursive rm dangerous even without force.
const DANGEROUS_TARGETS: &[&str] = &[
    r"/",       // root
    r"/\*",     // root wildcard
    r"~",       // home
    r"~/",      // home path
    r"\$home",  // $HOME after lowercasing
    r"\.\.",    // parent directory
    r"\*",      // any wildcard
    r"\.",      // current directory
    r"\.\s*$",  // trailing bare dot
];

fn build_rules() -> Vec<PatternRule> {
    vec![
        PatternRule {
            id: "env-file-path",
            tools: FILE_TOOLS,
            field: "file_path",
            predicate: Predicate::ContainsUnlessSuffix {
                needle: ".env",
                exempt_suffix: ENV_SAMPLE_SUFFIX,
            },
            classification: Classification::SensitiveFile,
        },
        env_rule("env-bare-token", ASCII_BOUNDARY),
        env_rule("env-cat", r"cat\s+.*"),
        env_rule("env-echo-redirect", r"echo\s+.*>\s*"),
        env_rule("env-touch", r"touch\s+.*"),
        env_rule("env-cp", r"cp\s+.*"),
        env_rule("env-mv", r"mv\s+.*"),
        rm_rule("rm-recursive-force", r"(?-u:\b)rm\s+.*-[a-z]*r[a-z]*f"),
        rm_rule("rm-force-recursive", r"(?-u:\b)rm\s+.*-[a-z]*f[a-z]*r"),
        rm_rule("rm-long-recursive-force", r"(?-u:\b)rm\s+--recursive\s+--force"),
        rm_rule("rm-long-force-recursive", r"(?-u:\b)rm\s+--force\s+--recursive"),
        rm_rule("rm-split-recursive-force", r"(?-u:\b)rm\s+-r\s+.*-f"),
        rm_rule("rm-split-force-recursive", r"(?-u:\b)rm\s+-f\s+.*-r"),
        PatternRule {
            id: "rm-recursive-dangerous-target",
            tools: BASH_TOOL,
            field: "command",
            predicate: Predicate::NormalizedGated {
                gate: compile(r"(?-u:\b)rm\s+.*-[a-z]*r"),
                targets: DANGEROUS_TARGETS.iter().map(|p| compile(p)).collect(),
            },
            classification: Classification::DestructiveCommand,
        },
    ]
}
