use std::io::Read;
use std::path::Path;

use scribe_bridge_claude::{ExportConfig, ExportOutcome};

/// `scribe bridge claude install`
pub fn install(repo_root: &Path) -> anyhow::Result<()> {
    scribe_bridge_claude::install(repo_root)
}

/// `scribe bridge claude uninstall`
pub fn uninstall(repo_root: &Path) -> anyhow::Result<()> {
    scribe_bridge_claude::uninstall(repo_root)
}

/// `scribe hook claude`: read stdin, save the session document
pub fn hook_claude(config: &ExportConfig) -> anyhow::Result<()> {
    let mut stdin_buf = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut stdin_buf) {
        tracing::debug!(error = %e, "stdin read error");
        return Ok(());
    }

    tracing::debug!(
        bytes = stdin_buf.len(),
        head = %stdin_buf.chars().take(200).collect::<String>(),
        "hook stdin"
    );

    match scribe_bridge_claude::hook_entrypoint_from_stdin(&stdin_buf, config) {
        Ok(ExportOutcome::Written { path, .. }) => {
            tracing::debug!(path = %path.display(), "hook ok");
        }
        Ok(ExportOutcome::Skipped(reason)) => {
            tracing::debug!(?reason, "hook ok (nothing written)");
        }
        Err(e) => {
            // Exit 0 regardless; the host agent must not be blocked
            tracing::error!(error = %e, "hook failed to save session");
        }
    }
    Ok(())
}

/// `scribe doctor claude`
pub fn doctor(repo_root: &Path, config: &ExportConfig) -> anyhow::Result<()> {
    scribe_bridge_claude::doctor(repo_root, config)
}
