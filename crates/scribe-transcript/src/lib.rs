mod extract;
mod filter;
mod read;
mod record;

pub use filter::{classify_record, is_truthy, DropReason, FilterAction, COMMAND_MARKERS};
pub use read::{parse_transcript, read_transcript, ReadStats, TranscriptRead};
pub use record::{ContentItem, Message, MessageContent, Role, TaggedItem, TranscriptRecord, Turn};
