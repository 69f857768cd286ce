use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;

// ── Install / Uninstall ──

const SCRIBE_HOOK_COMMAND: &str = "scribe hook claude";

/// Hook events that trigger a save. `Stop` keeps the document current after
/// every response; `SessionEnd` catches sessions closed mid-turn.
const HOOK_EVENTS: &[&str] = &["Stop", "SessionEnd"];

/// Check if a matcher group (Claude Code hook format) contains a scribe hook.
fn matcher_group_contains_scribe(group: &serde_json::Value) -> bool {
    // { "matcher": "", "hooks": [{ "type": "command", "command": "scribe hook claude" }] }
    if let Some(hooks_arr) = group.get("hooks").and_then(|h| h.as_array()) {
        return hooks_arr.iter().any(|hook| {
            hook.get("command")
                .and_then(|c| c.as_str())
                .is_some_and(|cmd| cmd.contains("scribe hook"))
        });
    }
    // Legacy format: plain string command
    group.as_str().is_some_and(|s| s.contains("scribe hook"))
}

fn settings_path(repo_root: &Path) -> PathBuf {
    repo_root.join(".claude").join("settings.local.json")
}

fn backup_path(settings: &Path) -> PathBuf {
    settings.with_extension("json.scribe.bak")
}

/// Install scribe hooks into `.claude/settings.local.json`.
pub fn install(repo_root: &Path) -> anyhow::Result<()> {
    let path = settings_path(repo_root);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut settings: serde_json::Value = if path.exists() {
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).unwrap_or_else(|_| serde_json::json!({}))
    } else {
        serde_json::json!({})
    };

    // Keep the first backup: later installs would only copy already-patched settings.
    let backup = backup_path(&path);
    if path.exists() && !backup.exists() {
        fs::copy(&path, &backup)?;
    }

    let hooks = settings
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("settings is not an object"))?
        .entry("hooks")
        .or_insert_with(|| serde_json::json!({}));

    let hooks_obj = hooks
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("hooks is not an object"))?;

    for event_name in HOOK_EVENTS {
        let key = event_name.to_string();

        let scribe_group = serde_json::json!({
            "matcher": "",
            "hooks": [
                {
                    "type": "command",
                    "command": SCRIBE_HOOK_COMMAND
                }
            ]
        });

        // Preserve existing non-scribe matcher groups
        let existing = hooks_obj.get(&key).and_then(|v| v.as_array()).cloned();
        let mut groups: Vec<serde_json::Value> = existing
            .unwrap_or_default()
            .into_iter()
            .filter(|group| !matcher_group_contains_scribe(group))
            .collect();
        groups.push(scribe_group);

        hooks_obj.insert(key, serde_json::Value::Array(groups));
    }

    let output = serde_json::to_string_pretty(&settings)?;
    fs::write(&path, output.as_bytes())?;

    println!("Installed scribe hooks into {}", path.display());
    Ok(())
}

/// Uninstall scribe hooks from `.claude/settings.local.json`.
pub fn uninstall(repo_root: &Path) -> anyhow::Result<()> {
    let path = settings_path(repo_root);

    if !path.exists() {
        println!("No settings file found at {}", path.display());
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let mut settings: serde_json::Value = serde_json::from_str(&content)?;

    if let Some(hooks) = settings
        .as_object_mut()
        .and_then(|obj| obj.get_mut("hooks"))
        .and_then(|h| h.as_object_mut())
    {
        for event_name in HOOK_EVENTS {
            let key = event_name.to_string();
            if let Some(arr) = hooks.get(&key).and_then(|v| v.as_array()).cloned() {
                let filtered: Vec<serde_json::Value> = arr
                    .into_iter()
                    .filter(|v| !matcher_group_contains_scribe(v))
                    .collect();
                if filtered.is_empty() {
                    hooks.remove(&key);
                } else {
                    hooks.insert(key, serde_json::Value::Array(filtered));
                }
            }
        }
    }

    let output = serde_json::to_string_pretty(&settings)?;
    fs::write(&path, output.as_bytes())?;

    println!("Uninstalled scribe hooks from {}", path.display());
    Ok(())
}

// ── Doctor ──

/// Check scribe bridge health.
pub fn doctor(repo_root: &Path, config: &ExportConfig) -> anyhow::Result<()> {
    let scribe_in_path = which_scribe();
    println!(
        "[{}] scribe in PATH: {}",
        if scribe_in_path.is_some() { "OK" } else { "WARN" },
        scribe_in_path.unwrap_or_else(|| "not found".into())
    );

    let path = settings_path(repo_root);
    let has_hooks = fs::read_to_string(&path)
        .map(|content| content.contains(SCRIBE_HOOK_COMMAND))
        .unwrap_or(false);
    println!(
        "[{}] hooks in {}",
        if has_hooks { "OK" } else { "WARN" },
        path.display()
    );

    let root = &config.claude_home;
    println!(
        "[{}] claude home: {}",
        if root.exists() { "OK" } else { "WARN" },
        root.display()
    );

    let cwd = repo_root.to_string_lossy();
    let index = scribe_store::sessions_index_path(root, &cwd);
    println!(
        "[{}] session index: {}",
        if index.is_file() { "OK" } else { "WARN" },
        index.display()
    );

    println!(
        "[OK] output dir: {}",
        scribe_store::output_dir(&cwd, &config.output_dir_name).display()
    );

    Ok(())
}

fn which_scribe() -> Option<String> {
    let path_var = std::env::var_os("PATH")?;
    let exe_name = if cfg!(windows) { "scribe.exe" } else { "scribe" };
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(exe_name))
        .find(|candidate| candidate.is_file())
        .map(|candidate| candidate.to_string_lossy().to_string())
}
