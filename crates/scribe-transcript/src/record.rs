//! Typed view of one Claude Code transcript JSONL line.
//!
//! Deserialization is deliberately forgiving: any JSON object becomes a
//! `TranscriptRecord`. Fields with an unexpected shape fall back to their
//! defaults so that classification, not parsing, decides what is kept.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One parsed transcript line.
///
/// Expected format:
/// ```json
/// {"type":"assistant","isMeta":false,"timestamp":"...","message":{"model":"...","content":[{"type":"text","text":"..."}]}}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(rename = "isMeta", default)]
    pub is_meta: Value,
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: Message,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,
}

/// The nested `message` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: MessageContent,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: String,
}

/// `message.content` is either a plain string or an array of items.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Items(Vec<ContentItem>),
    #[default]
    Missing,
    Other(Value),
}

/// One element of an array-shaped `message.content`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Plain(String),
    Tagged(TaggedItem),
    Other(Value),
}

/// An object item discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TaggedItem {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map a record `type` to a conversational role.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A record that survived filtering, reduced to what rendering needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    /// Model identifier; only set for assistant turns.
    pub model: Option<String>,
    pub timestamp: String,
    pub text: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn lenient_message<'de, D>(deserializer: D) -> Result<Message, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(Message::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> TranscriptRecord {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn parses_string_content() {
        let r = parse(r#"{"type":"user","message":{"content":"Hello"},"timestamp":"T1"}"#);
        assert_eq!(r.kind, "user");
        assert_eq!(r.timestamp, "T1");
        assert!(matches!(r.message.content, MessageContent::Text(ref s) if s == "Hello"));
    }

    #[test]
    fn parses_item_content() {
        let r = parse(
            r#"{"type":"assistant","message":{"model":"m1","content":[{"type":"text","text":"a"},"b",{"type":"tool_use","id":"t1"},42]}}"#,
        );
        assert_eq!(r.message.model, "m1");
        let MessageContent::Items(items) = r.message.content else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[0], ContentItem::Tagged(TaggedItem::Text { text }) if text == "a"));
        assert!(matches!(&items[1], ContentItem::Plain(s) if s == "b"));
        assert!(matches!(&items[2], ContentItem::Tagged(TaggedItem::Other)));
        assert!(matches!(&items[3], ContentItem::Other(_)));
    }

    #[test]
    fn text_item_without_text_defaults_to_empty() {
        let r = parse(r#"{"type":"user","message":{"content":[{"type":"text"}]}}"#);
        let MessageContent::Items(items) = r.message.content else {
            panic!("expected items");
        };
        assert!(matches!(&items[0], ContentItem::Tagged(TaggedItem::Text { text }) if text.is_empty()));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let r = parse(r#"{"uuid":"x"}"#);
        assert_eq!(r.kind, "");
        assert!(r.is_meta.is_null());
        assert!(matches!(r.message.content, MessageContent::Missing));
        assert_eq!(r.timestamp, "");
    }

    #[test]
    fn odd_field_shapes_do_not_fail_the_record() {
        let r = parse(r#"{"type":7,"message":"hello","timestamp":123}"#);
        assert_eq!(r.kind, "");
        assert_eq!(r.timestamp, "");
        assert!(matches!(r.message.content, MessageContent::Missing));

        let r = parse(r#"{"type":"user","message":{"content":{"a":1},"model":null}}"#);
        assert!(matches!(r.message.content, MessageContent::Other(_)));
        assert_eq!(r.message.model, "");
    }

    #[test]
    fn non_object_line_is_rejected() {
        assert!(serde_json::from_str::<TranscriptRecord>("42").is_err());
        assert!(serde_json::from_str::<TranscriptRecord>(r#""text""#).is_err());
    }

    #[test]
    fn role_from_kind() {
        assert_eq!(Role::from_kind("user"), Some(Role::User));
        assert_eq!(Role::from_kind("assistant"), Some(Role::Assistant));
        assert_eq!(Role::from_kind("system"), None);
        assert_eq!(Role::from_kind("User"), None);
    }
}
