//! Markdown rendering of a saved session.
//!
//! Layout: a YAML-style front-matter header, then one block per turn:
//!
//! ```text
//! ## 🤖 Assistant (model)
//! *timestamp*
//!
//! text
//!
//! ```

use scribe_transcript::{Role, Turn};

pub const USER_HEADING: &str = "## 👤 User";

/// Front-matter delimiter.
pub const HEADER_FENCE: &str = "---";

/// Heading for an assistant turn.
pub fn assistant_heading(model: &str) -> String {
    format!("## 🤖 Assistant ({model})")
}

/// Escape a value for a double-quoted front-matter scalar.
pub fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Append the lines of one turn block.
pub fn render_turn(turn: &Turn, lines: &mut Vec<String>) {
    match turn.role {
        Role::User => lines.push(USER_HEADING.to_string()),
        Role::Assistant => {
            lines.push(assistant_heading(turn.model.as_deref().unwrap_or("unknown")))
        }
    }
    if !turn.timestamp.is_empty() {
        lines.push(format!("*{}*", turn.timestamp));
    }
    lines.push(String::new());
    lines.push(turn.text.clone());
    lines.push(String::new());
}

/// Everything that goes into one session document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDocument {
    pub session_id: String,
    pub session_name: String,
    pub cwd: String,
    pub turns: Vec<Turn>,
}

impl SessionDocument {
    pub fn user_count(&self) -> usize {
        self.count(Role::User)
    }

    pub fn assistant_count(&self) -> usize {
        self.count(Role::Assistant)
    }

    fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }

    fn header_lines(&self) -> Vec<String> {
        vec![
            HEADER_FENCE.to_string(),
            format!("session_id: {}", self.session_id),
            format!("session_name: \"{}\"", escape_quoted(&self.session_name)),
            format!("cwd: {}", self.cwd),
            format!("user_messages_count: {}", self.user_count()),
            format!("assistant_messages_count: {}", self.assistant_count()),
            HEADER_FENCE.to_string(),
            String::new(),
        ]
    }

    /// Render header and turn blocks joined by `\n`.
    pub fn render(&self) -> String {
        let mut lines = self.header_lines();
        for turn in &self.turns {
            render_turn(turn, &mut lines);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str, ts: &str) -> Turn {
        Turn {
            role: Role::User,
            model: None,
            timestamp: ts.into(),
            text: text.into(),
        }
    }

    fn assistant(text: &str, model: &str, ts: &str) -> Turn {
        Turn {
            role: Role::Assistant,
            model: Some(model.into()),
            timestamp: ts.into(),
            text: text.into(),
        }
    }

    fn doc(turns: Vec<Turn>) -> SessionDocument {
        SessionDocument {
            session_id: "s1".into(),
            session_name: "Fix the build".into(),
            cwd: "/w/proj".into(),
            turns,
        }
    }

    #[test]
    fn renders_exact_document() {
        let d = doc(vec![
            user("Hello", "T1"),
            assistant("Hi there", "m1", "T2"),
        ]);
        let expected = "---\n\
                        session_id: s1\n\
                        session_name: \"Fix the build\"\n\
                        cwd: /w/proj\n\
                        user_messages_count: 1\n\
                        assistant_messages_count: 1\n\
                        ---\n\
                        \n\
                        ## 👤 User\n\
                        *T1*\n\
                        \n\
                        Hello\n\
                        \n\
                        ## 🤖 Assistant (m1)\n\
                        *T2*\n\
                        \n\
                        Hi there\n";
        assert_eq!(d.render(), expected);
    }

    #[test]
    fn empty_timestamp_has_no_caption_line() {
        let mut lines = Vec::new();
        render_turn(&user("Hello", ""), &mut lines);
        assert_eq!(lines, vec!["## 👤 User", "", "Hello", ""]);
    }

    #[test]
    fn assistant_without_model_renders_unknown() {
        let mut lines = Vec::new();
        let turn = Turn {
            role: Role::Assistant,
            model: None,
            timestamp: String::new(),
            text: "x".into(),
        };
        render_turn(&turn, &mut lines);
        assert_eq!(lines[0], "## 🤖 Assistant (unknown)");
    }

    #[test]
    fn text_is_emitted_verbatim() {
        let mut lines = Vec::new();
        let text = "line one\n\n```rust\nfn main() {}\n```\n<tag> & \"quotes\"";
        render_turn(&user(text, ""), &mut lines);
        assert_eq!(lines[2], text);
    }

    #[test]
    fn counts_match_rendered_headings() {
        let d = doc(vec![
            user("a", ""),
            user("b", ""),
            assistant("c", "m", ""),
            user("d", ""),
        ]);
        let out = d.render();
        assert_eq!(d.user_count(), out.matches(USER_HEADING).count());
        assert_eq!(d.assistant_count(), out.matches("## 🤖 Assistant").count());
        assert!(out.contains("user_messages_count: 3\n"));
        assert!(out.contains("assistant_messages_count: 1\n"));
    }

    #[test]
    fn summary_is_escaped() {
        let mut d = doc(vec![user("a", "")]);
        d.session_name = "say \"hi\" \\ bye\nnow".into();
        assert!(d
            .render()
            .contains("session_name: \"say \\\"hi\\\" \\\\ bye\\nnow\"\n"));
    }

    #[test]
    fn empty_summary_renders_empty_quotes() {
        let mut d = doc(vec![user("a", "")]);
        d.session_name = String::new();
        assert!(d.render().contains("session_name: \"\"\n"));
    }
}
