// ── Hook stdin parsing ──

/// Session id used when the hook payload carries none.
pub const UNKNOWN_SESSION: &str = "unknown";

/// The fields of a Claude Code hook payload this bridge consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInput {
    pub session_id: String,
    pub transcript_path: String,
    pub cwd: String,
}

/// Parse the stdin JSON from a Claude Code hook.
///
/// Returns `None` when stdin is blank or not JSON. A JSON value that is not an
/// object parses to empty fields, which later reads as a missing transcript.
pub fn parse_hook_stdin(stdin: &str) -> Option<HookInput> {
    if stdin.trim().is_empty() {
        return None;
    }
    let raw: serde_json::Value = serde_json::from_str(stdin).ok()?;

    let mut session_id = get_str(&raw, "session_id");
    if session_id.is_empty() {
        session_id = UNKNOWN_SESSION.to_string();
    }

    Some(HookInput {
        session_id,
        transcript_path: get_str(&raw, "transcript_path"),
        cwd: get_str(&raw, "cwd"),
    })
}

/// Get a string field from JSON, trying snake_case first then camelCase.
/// Claude Code documents snake_case keys, but some launchers forward
/// camelCase (e.g. `transcriptPath`).
pub(crate) fn get_str(v: &serde_json::Value, snake_key: &str) -> String {
    if let Some(s) = v.get(snake_key).and_then(|x| x.as_str()) {
        return s.to_string();
    }
    let camel = snake_to_camel(snake_key);
    v.get(&camel)
        .and_then(|x| x.as_str())
        .unwrap_or("")
        .to_string()
}

pub(crate) fn snake_to_camel(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for ch in s.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}
