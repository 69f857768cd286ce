use crate::filter::{classify_record, FilterAction};
use crate::record::{Role, Turn, TranscriptRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Default, Serialize, Clone, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    pub blank: usize,
    pub malformed: usize,
    pub kept: usize,
    pub dropped_by_reason: HashMap<String, usize>,
}

/// Turns that survived filtering, in transcript order.
#[derive(Debug, Default, Clone)]
pub struct TranscriptRead {
    pub turns: Vec<Turn>,
    pub stats: ReadStats,
}

impl TranscriptRead {
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }
}

/// Read a Claude transcript JSONL file and keep the human-facing turns.
///
/// Only failing to open or read the file is an error. Blank lines, lines that
/// are not a JSON object, and records rejected by [`classify_record`] are
/// counted in [`ReadStats`] and skipped.
pub fn read_transcript(path: &Path) -> std::io::Result<TranscriptRead> {
    let file = std::fs::File::open(path)?;
    parse_transcript(BufReader::new(file))
}

/// Same as [`read_transcript`] over any buffered reader.
pub fn parse_transcript<R: BufRead>(reader: R) -> std::io::Result<TranscriptRead> {
    let mut out = TranscriptRead::default();

    for raw_line in reader.split(b'\n') {
        let raw_line = raw_line?;
        out.stats.lines += 1;

        let Ok(line) = std::str::from_utf8(&raw_line) else {
            out.stats.malformed += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            out.stats.blank += 1;
            continue;
        }

        let record: TranscriptRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(_) => {
                out.stats.malformed += 1;
                continue;
            }
        };

        match classify_record(&record) {
            FilterAction::Keep(turn) => {
                out.stats.kept += 1;
                out.turns.push(turn);
            }
            FilterAction::Drop(reason) => {
                *out
                    .stats
                    .dropped_by_reason
                    .entry(reason.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    tracing::debug!(
        lines = out.stats.lines,
        blank = out.stats.blank,
        malformed = out.stats.malformed,
        kept = out.stats.kept,
        dropped = ?out.stats.dropped_by_reason,
        "transcript read"
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_transcript(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join("transcript.jsonl");
        let mut f = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn read_keeps_turns_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_transcript(
            tmp.path(),
            &[
                r#"{"type":"user","message":{"content":"Hello"},"timestamp":"T1"}"#,
                r#"{"type":"progress","toolUseID":"t1","data":{"output":"running"}}"#,
                r#"{"type":"assistant","message":{"content":"Hi there","model":"m1"},"timestamp":"T2"}"#,
                r#"{"type":"system","subtype":"turn_duration","duration_ms":100}"#,
            ],
        );

        let read = read_transcript(&path).unwrap();
        assert_eq!(read.turns.len(), 2);
        assert_eq!(read.turns[0].text, "Hello");
        assert_eq!(read.turns[1].text, "Hi there");
        assert_eq!(read.count(Role::User), 1);
        assert_eq!(read.count(Role::Assistant), 1);
        assert_eq!(read.stats.kept, 2);
        assert_eq!(read.stats.dropped_by_reason["not_a_turn"], 2);
    }

    #[test]
    fn read_skips_blank_and_malformed_lines() {
        let input = concat!(
            "\n",
            "   \n",
            "{\"type\":\"user\",\"message\":{\"content\":\"ok\"}}\n",
            "{not json\n",
            "42\n",
            "{\"type\":\"assistant\",\"message\":{\"content\":\"trunc",
        );
        let read = parse_transcript(input.as_bytes()).unwrap();
        assert_eq!(read.turns.len(), 1);
        assert_eq!(read.stats.lines, 6);
        assert_eq!(read.stats.blank, 2);
        assert_eq!(read.stats.malformed, 3);
    }

    #[test]
    fn read_tolerates_invalid_utf8_line() {
        let mut input: Vec<u8> = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(br#"{"type":"user","message":{"content":"after"}}"#);
        let read = parse_transcript(&input[..]).unwrap();
        assert_eq!(read.stats.malformed, 1);
        assert_eq!(read.turns.len(), 1);
        assert_eq!(read.turns[0].text, "after");
    }

    #[test]
    fn read_handles_crlf_line_endings() {
        let input = "{\"type\":\"user\",\"message\":{\"content\":\"a\"}}\r\n{\"type\":\"user\",\"message\":{\"content\":\"b\"}}\r\n";
        let read = parse_transcript(input.as_bytes()).unwrap();
        assert_eq!(read.turns.len(), 2);
        assert_eq!(read.stats.malformed, 0);
    }

    #[test]
    fn read_all_filtered_is_empty() {
        let input = concat!(
            "{\"type\":\"user\",\"isMeta\":true,\"message\":{\"content\":\"caveat\"}}\n",
            "{\"type\":\"user\",\"message\":{\"content\":\"<command-name>/clear</command-name>\"}}\n",
            "{\"type\":\"assistant\",\"message\":{\"content\":[{\"type\":\"tool_use\",\"id\":\"t\"}]}}\n",
        );
        let read = parse_transcript(input.as_bytes()).unwrap();
        assert!(read.is_empty());
        assert_eq!(read.stats.dropped_by_reason["meta"], 1);
        assert_eq!(read.stats.dropped_by_reason["command_echo"], 1);
        assert_eq!(read.stats.dropped_by_reason["empty_text"], 1);
    }

    #[test]
    fn read_missing_file_is_error() {
        assert!(read_transcript(Path::new("/nonexistent/file.jsonl")).is_err());
    }
}
