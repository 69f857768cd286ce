use crate::record::{Role, TranscriptRecord, Turn};
use serde_json::Value;

/// Prefixes of synthetic user records that echo slash commands or local
/// command output rather than text the user typed.
pub const COMMAND_MARKERS: [&str; 2] = ["<command-name>", "<local-command-"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Keep(Turn),
    Drop(DropReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// `type` is neither `user` nor `assistant`.
    NotATurn,
    /// Carries a truthy `isMeta`.
    Meta,
    /// User string content starting with a command marker.
    CommandEcho,
    /// Display text is blank after trimming.
    EmptyText,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::NotATurn => "not_a_turn",
            DropReason::Meta => "meta",
            DropReason::CommandEcho => "command_echo",
            DropReason::EmptyText => "empty_text",
        }
    }
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Decide whether a transcript record is a human-facing turn.
///
/// Checks run in order: record kind, meta flag, command echo, then blank text.
pub fn classify_record(record: &TranscriptRecord) -> FilterAction {
    let Some(role) = Role::from_kind(&record.kind) else {
        return FilterAction::Drop(DropReason::NotATurn);
    };

    if is_truthy(&record.is_meta) {
        return FilterAction::Drop(DropReason::Meta);
    }

    let content = &record.message.content;
    if role == Role::User {
        if let Some(text) = content.as_plain_text() {
            if COMMAND_MARKERS.iter().any(|m| text.starts_with(m)) {
                return FilterAction::Drop(DropReason::CommandEcho);
            }
        }
    }

    let text = content.display_text();
    if text.trim().is_empty() {
        return FilterAction::Drop(DropReason::EmptyText);
    }

    let model = match role {
        Role::User => None,
        // An empty-string model also reads as "unknown" rather than "()".
        Role::Assistant if record.message.model.is_empty() => Some("unknown".to_string()),
        Role::Assistant => Some(record.message.model.clone()),
    };

    FilterAction::Keep(Turn {
        role,
        model,
        timestamp: record.timestamp.clone(),
        text,
    })
}
