use crate::record::{ContentItem, MessageContent, TaggedItem};

impl MessageContent {
    /// Display text of a message.
    ///
    /// A plain string is returned verbatim. For an item array, `text` items and
    /// bare strings are kept in order and joined with `\n`; every other item
    /// (tool calls, images, thinking blocks, ...) contributes nothing.
    pub fn display_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Items(items) => items
                .iter()
                .filter_map(ContentItem::fragment)
                .collect::<Vec<_>>()
                .join("\n"),
            MessageContent::Missing | MessageContent::Other(_) => String::new(),
        }
    }

    /// The string body when content is a plain string.
    pub fn as_plain_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl ContentItem {
    /// Text this item contributes to the display text, if any.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            ContentItem::Plain(text) => Some(text),
            ContentItem::Tagged(TaggedItem::Text { text }) => Some(text),
            ContentItem::Tagged(TaggedItem::Other) | ContentItem::Other(_) => None,
        }
    }
}
