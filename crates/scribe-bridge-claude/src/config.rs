use std::path::PathBuf;

/// Runtime settings for an export, resolved once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Claude Code config root that holds `projects/<name>/sessions-index.json`.
    pub claude_home: PathBuf,
    /// Directory name under the session's cwd that receives documents.
    pub output_dir_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            claude_home: scribe_store::default_claude_home(),
            output_dir_name: scribe_store::DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl ExportConfig {
    /// Resolve from `SCRIBE_CLAUDE_HOME` and `SCRIBE_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve with a custom variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            claude_home: get("SCRIBE_CLAUDE_HOME")
                .map(PathBuf::from)
                .unwrap_or(defaults.claude_home),
            output_dir_name: get("SCRIBE_OUTPUT_DIR").unwrap_or(defaults.output_dir_name),
        }
    }
}
