use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HooksError, Result};

/// Env var that points at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "CLAUDE_HOOKS_CONFIG";

/// An external command tried as one step of a provider chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderCommand {
    pub name: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Provider is skipped unless this env var is set and non-empty
    #[serde(default)]
    pub requires_env: Option<String>,
    /// Provider is skipped unless this file exists
    #[serde(default)]
    pub requires_file: Option<PathBuf>,
}

impl ProviderCommand {
    fn node_script(name: &str, script: &str, requires_env: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            program: "node".to_string(),
            args: vec![script.to_string()],
            requires_env: requires_env.map(str::to_string),
            requires_file: Some(PathBuf::from(script)),
        }
    }

    /// Whether the provider's prerequisites are present.
    pub fn is_available(&self) -> bool {
        let env_ok = self.requires_env.as_deref().map_or(true, |key| {
            std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
        });
        let file_ok = self.requires_file.as_deref().map_or(true, Path::exists);
        env_ok && file_ok
    }
}

/// A prompt substring that `user-prompt-submit --validate` refuses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockedPromptPattern {
    pub pattern: String,
    pub reason: String,
}

/// Hook configuration loaded from ~/.claude/config/hooks.json
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Directory for the per-hook JSON logs, relative to the working directory
    pub log_dir: PathBuf,
    /// Upper bound for any single provider subprocess
    pub timeout_secs: u64,
    /// Write per-hook debug logs even without CLAUDE_HOOKS_DEBUG
    pub debug: bool,
    /// Speak notifications even without --tts
    pub notification_tts: bool,
    /// Files whose heads are injected by `session-start --load-context`
    pub context_files: Vec<PathBuf>,
    pub blocked_prompt_patterns: Vec<BlockedPromptPattern>,
    pub tts_providers: Vec<ProviderCommand>,
    pub llm_providers: Vec<ProviderCommand>,
    /// Canned lines used when no LLM provider answers
    pub completion_messages: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            timeout_secs: 10,
            debug: false,
            notification_tts: false,
            context_files: [
                ".claude/CONTEXT.md",
                ".claude/TODO.md",
                "TODO.md",
                ".github/ISSUE_TEMPLATE.md",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            blocked_prompt_patterns: Vec::new(),
            tts_providers: vec![
                ProviderCommand::node_script(
                    "elevenlabs",
                    ".claude/hooks/utils/tts/elevenlabs_tts.ts",
                    Some("ELEVENLABS_API_KEY"),
                ),
                ProviderCommand::node_script(
                    "openai",
                    ".claude/hooks/utils/tts/openai_tts.ts",
                    Some("OPENAI_API_KEY"),
                ),
                ProviderCommand::node_script(
                    "pyttsx3",
                    ".claude/hooks/utils/tts/pyttsx3_tts.ts",
                    None,
                ),
            ],
            llm_providers: vec![
                ProviderCommand::node_script(
                    "openai",
                    ".claude/hooks/utils/llm/oai.ts",
                    Some("OPENAI_API_KEY"),
                ),
                ProviderCommand::node_script(
                    "anthropic",
                    ".claude/hooks/utils/llm/anth.ts",
                    Some("ANTHROPIC_API_KEY"),
                ),
                ProviderCommand::node_script("ollama", ".claude/hooks/utils/llm/ollama.ts", None),
            ],
            completion_messages: [
                "Work complete!",
                "All done!",
                "Task finished!",
                "Job complete!",
                "Ready for next task!",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl HooksConfig {
    /// Load config from CLAUDE_HOOKS_CONFIG or the standard location
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                HooksError::Config(format!("Failed to read config file: {}", e))
            })?;
            let config: HooksConfig = serde_json::from_str(&content).map_err(|e| {
                HooksError::Config(format!("Failed to parse config JSON: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the standard config file path
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".claude")
            .join("config")
            .join("hooks.json")
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = HooksConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.debug);
        assert_eq!(config.completion_messages.len(), 5);
    }

    #[test]
    fn test_default_provider_priority() {
        let config = HooksConfig::default();
        let tts: Vec<_> = config.tts_providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(tts, ["elevenlabs", "openai", "pyttsx3"]);
        let llm: Vec<_> = config.llm_providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(llm, ["openai", "anthropic", "ollama"]);
    }

    #[test]
    fn test_load_from_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{
                "log_dir": "/var/log/hooks",
                "timeout_secs": 3,
                "blocked_prompt_patterns": [
                    {{"pattern": "drop database", "reason": "No schema drops"}}
                ],
                "tts_providers": [
                    {{"name": "say", "program": "say"}}
                ]
            }}"#
        )
        .unwrap();

        let config = HooksConfig::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/var/log/hooks"));
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.blocked_prompt_patterns[0].reason, "No schema drops");
        assert_eq!(config.tts_providers.len(), 1);
        assert!(config.tts_providers[0].args.is_empty());
        assert!(config.tts_providers[0].requires_env.is_none());
        // Unspecified fields keep their defaults
        assert_eq!(config.llm_providers.len(), 3);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = PathBuf::from("/nonexistent/path/hooks.json");
        let config = HooksConfig::load_from_path(&path).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_json_returns_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not valid json").unwrap();

        let result = HooksConfig::load_from_path(temp_file.path());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn test_config_path_contains_expected_components() {
        let path = HooksConfig::config_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.contains(".claude"));
        assert!(path_str.contains("config"));
        assert!(path_str.ends_with("hooks.json"));
    }

    #[test]
    fn test_provider_without_requirements_is_available() {
        let provider = ProviderCommand {
            name: "echo".to_string(),
            program: "echo".to_string(),
            args: Vec::new(),
            requires_env: None,
            requires_file: None,
        };
        assert!(provider.is_available());
    }

    #[test]
    fn test_provider_missing_env_unavailable() {
        let provider = ProviderCommand {
            name: "cloud".to_string(),
            program: "true".to_string(),
            args: Vec::new(),
            requires_env: Some("CLAUDE_HOOKS_TEST_UNSET_KEY_9F2A".to_string()),
            requires_file: None,
        };
        assert!(!provider.is_available());
    }

    #[test]
    fn test_provider_missing_file_unavailable() {
        let provider = ProviderCommand {
            name: "script".to_string(),
            program: "node".to_string(),
            args: Vec::new(),
            requires_env: None,
            requires_file: Some(PathBuf::from("/nonexistent/tts.ts")),
        };
        assert!(!provider.is_available());
    }
}
