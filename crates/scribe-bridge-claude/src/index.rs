//! Session summary lookup in Claude Code's per-project `sessions-index.json`.
//!
//! The index belongs to Claude Code and is only read here. Every failure
//! degrades to [`SessionLookup::Missing`]; nothing in this module returns an
//! error, so the export never stops because a label is unavailable.

use std::path::Path;

/// One entry of `sessions-index.json` (`{"entries": [{"sessionId": ..., "summary": ...}]}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIndexEntry {
    pub session_id: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    /// No index file for the project.
    NoIndex,
    /// The index exists but could not be read.
    Unreadable,
    /// The index is not JSON, or `entries` is not an array.
    Malformed,
    /// No entry carries the session id.
    NoEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Found(SessionIndexEntry),
    Missing(LookupMiss),
}

impl SessionLookup {
    /// Summary to display; empty for a miss or an entry without one.
    pub fn summary(&self) -> &str {
        match self {
            SessionLookup::Found(entry) => entry.summary.as_deref().unwrap_or(""),
            SessionLookup::Missing(_) => "",
        }
    }
}

/// Find the index entry for `session_id` in the project rooted at `cwd`.
pub fn find_session(claude_home: &Path, cwd: &str, session_id: &str) -> SessionLookup {
    let index_path = scribe_store::sessions_index_path(claude_home, cwd);
    let lookup = lookup_in_file(&index_path, session_id);
    match &lookup {
        SessionLookup::Missing(miss @ (LookupMiss::Unreadable | LookupMiss::Malformed)) => {
            tracing::warn!(path = %index_path.display(), ?miss, "session index unusable");
        }
        SessionLookup::Missing(miss) => {
            tracing::debug!(path = %index_path.display(), ?miss, "no session summary");
        }
        SessionLookup::Found(_) => {}
    }
    lookup
}

fn lookup_in_file(index_path: &Path, session_id: &str) -> SessionLookup {
    if !index_path.is_file() {
        return SessionLookup::Missing(LookupMiss::NoIndex);
    }
    let content = match std::fs::read_to_string(index_path) {
        Ok(c) => c,
        Err(_) => return SessionLookup::Missing(LookupMiss::Unreadable),
    };
    let data: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(_) => return SessionLookup::Missing(LookupMiss::Malformed),
    };
    lookup_in_value(&data, session_id)
}

fn lookup_in_value(data: &serde_json::Value, session_id: &str) -> SessionLookup {
    let entries = match data.get("entries") {
        None => return SessionLookup::Missing(LookupMiss::NoEntry),
        Some(v) => match v.as_array() {
            Some(arr) => arr,
            None => return SessionLookup::Missing(LookupMiss::Malformed),
        },
    };

    entries
        .iter()
        .find(|e| e.get("sessionId").and_then(|s| s.as_str()) == Some(session_id))
        .map(|e| {
            SessionLookup::Found(SessionIndexEntry {
                session_id: session_id.to_string(),
                summary: e
                    .get("summary")
                    .and_then(|s| s.as_str())
                    .map(str::to_string),
            })
        })
        .unwrap_or(SessionLookup::Missing(LookupMiss::NoEntry))
}
