//! Pre-tool-use safety guard.
//!
//! Classifies a tool invocation as allowed or blocked using the static rule
//! table in [`rules`]. Evaluation is pure: no I/O, no shared state, and every
//! input yields a decision.

pub mod rules;

pub use rules::{normalize_command, Classification, PatternRule, Predicate, RULES};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool call as described by the host.
///
/// Deserialization never fails on shape: a missing or non-string `tool_name`
/// becomes `""` and a missing or non-object `tool_input` becomes `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ToolInvocation {
    pub tool_name: String,
    pub tool_input: Map<String, Value>,
}

impl ToolInvocation {
    pub fn new(tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input: match tool_input {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    /// String parameter from `tool_input`, or `""` when absent or not a string.
    pub fn str_field(&self, key: &str) -> &str {
        self.tool_input
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl From<Value> for ToolInvocation {
    fn from(value: Value) -> Self {
        let tool_name = value
            .get("tool_name")
            .or_else(|| value.get("toolName"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let tool_input = value
            .get("tool_input")
            .or_else(|| value.get("toolInput"))
            .cloned()
            .unwrap_or(Value::Null);
        Self::new(tool_name, tool_input)
    }
}

/// Outcome of evaluating a [`ToolInvocation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum GuardDecision {
    Allow,
    Block {
        reason: String,
        classification: Classification,
        rule: &'static str,
    },
}

impl GuardDecision {
    fn blocked_by(rule: &'static PatternRule) -> Self {
        GuardDecision::Block {
            reason: rule.classification.reason().to_string(),
            classification: rule.classification,
            rule: rule.id,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, GuardDecision::Block { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Block { reason, .. } => Some(reason),
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Block { classification, .. } => Some(*classification),
        }
    }
}

/// Ordered first-match-wins evaluator over a rule table.
#[derive(Debug, Clone, Copy)]
pub struct ToolUseGuard {
    rules: &'static [PatternRule],
}

impl Default for ToolUseGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolUseGuard {
    pub fn new() -> Self {
        Self {
            rules: RULES.as_slice(),
        }
    }

    pub fn evaluate(&self, invocation: &ToolInvocation) -> GuardDecision {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(&invocation.tool_name))
            .find(|rule| rule.matches(invocation.str_field(rule.field)))
            .map(GuardDecision::blocked_by)
            .unwrap_or(GuardDecision::Allow)
    }
}

/// Evaluate with the built-in rule table.
pub fn evaluate(invocation: &ToolInvocation) -> GuardDecision {
    ToolUseGuard::new().evaluate(invocation)
}

/// True when `command` trips any destructive-command rule.
pub fn is_dangerous_rm_command(command: &str) -> bool {
    RULES
        .iter()
        .filter(|rule| rule.classification == Classification::DestructiveCommand)
        .any(|rule| rule.matches(command))
}

/// True when the invocation trips any sensitive-file rule.
pub fn is_env_file_access(invocation: &ToolInvocation) -> bool {
    RULES
        .iter()
        .filter(|rule| rule.classification == Classification::SensitiveFile)
        .filter(|rule| rule.applies_to(&invocation.tool_name))
        .any(|rule| rule.matches(invocation.str_field(rule.field)))
}
