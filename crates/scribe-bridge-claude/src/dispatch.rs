use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::index::find_session;
use crate::parse::{parse_hook_stdin, HookInput};
use crate::render::SessionDocument;

// ── Outcome ──

/// Why an export finished without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Stdin was blank or not JSON.
    MalformedPayload,
    /// `transcript_path` is empty, not a file, or unreadable.
    MissingTranscript,
    /// No turn survived filtering.
    EmptyTranscript,
}

/// Result of a completed export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written {
        path: PathBuf,
        user_turns: usize,
        assistant_turns: usize,
    },
    Skipped(SkipReason),
}

/// Output-side failures. Input problems never produce an error.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write session document {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Pipeline ──

/// Hook entrypoint: parse stdin, then export the session it names.
pub fn hook_entrypoint_from_stdin(
    stdin: &str,
    config: &ExportConfig,
) -> Result<ExportOutcome, ExportError> {
    let Some(input) = parse_hook_stdin(stdin) else {
        tracing::debug!("hook payload is not JSON, nothing to do");
        return Ok(ExportOutcome::Skipped(SkipReason::MalformedPayload));
    };
    export_session(&input, config)
}

/// Render the session's transcript and write `<cwd>/<output dir>/<session_id>.md`.
pub fn export_session(
    input: &HookInput,
    config: &ExportConfig,
) -> Result<ExportOutcome, ExportError> {
    let doc = match build_document(input, config) {
        Ok(doc) => doc,
        Err(reason) => {
            tracing::debug!(session_id = %input.session_id, ?reason, "export skipped");
            return Ok(ExportOutcome::Skipped(reason));
        }
    };
    let path = write_document(&doc, config)?;
    tracing::debug!(
        session_id = %doc.session_id,
        path = %path.display(),
        user_turns = doc.user_count(),
        assistant_turns = doc.assistant_count(),
        "session document written"
    );
    Ok(ExportOutcome::Written {
        path,
        user_turns: doc.user_count(),
        assistant_turns: doc.assistant_count(),
    })
}

/// Resolve metadata and filter the transcript into a document, without
/// touching the output directory.
pub fn build_document(
    input: &HookInput,
    config: &ExportConfig,
) -> Result<SessionDocument, SkipReason> {
    let transcript = Path::new(&input.transcript_path);
    if input.transcript_path.is_empty() || !transcript.is_file() {
        return Err(SkipReason::MissingTranscript);
    }

    let lookup = find_session(&config.claude_home, &input.cwd, &input.session_id);

    let read = match scribe_transcript::read_transcript(transcript) {
        Ok(read) => read,
        Err(e) => {
            tracing::debug!(path = %transcript.display(), error = %e, "transcript unreadable");
            return Err(SkipReason::MissingTranscript);
        }
    };
    if read.is_empty() {
        return Err(SkipReason::EmptyTranscript);
    }

    Ok(SessionDocument {
        session_id: input.session_id.clone(),
        session_name: lookup.summary().to_string(),
        cwd: input.cwd.clone(),
        turns: read.turns,
    })
}

/// Write a rendered document, replacing any earlier version for the session.
pub fn write_document(doc: &SessionDocument, config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let dir = scribe_store::output_dir(&doc.cwd, &config.output_dir_name);
    std::fs::create_dir_all(&dir).map_err(|source| ExportError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(scribe_store::session_file_name(&doc.session_id));
    scribe_store::write_atomic(&path, doc.render().as_bytes()).map_err(|source| {
        ExportError::Write {
            path: path.clone(),
            source,
        }
    })?;
    Ok(path)
}
