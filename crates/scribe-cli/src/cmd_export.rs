use std::path::Path;

use scribe_bridge_claude::{ExportConfig, ExportOutcome, HookInput, SkipReason};

pub struct ExportParams<'a> {
    pub transcript: &'a Path,
    pub session: Option<&'a str>,
    pub cwd: &'a Path,
    pub print: bool,
}

/// `scribe export --transcript <path>`
pub fn execute(params: ExportParams<'_>, config: &ExportConfig) -> anyhow::Result<()> {
    let input = hook_input(&params);

    if params.print {
        match scribe_bridge_claude::build_document(&input, config) {
            Ok(doc) => print!("{}", doc.render()),
            Err(reason) => eprintln!("Nothing to print: {}", describe(reason)),
        }
        return Ok(());
    }

    match scribe_bridge_claude::export_session(&input, config)? {
        ExportOutcome::Written {
            path,
            user_turns,
            assistant_turns,
        } => {
            println!(
                "Saved {} ({user_turns} user, {assistant_turns} assistant messages)",
                path.display()
            );
        }
        ExportOutcome::Skipped(reason) => println!("Nothing saved: {}", describe(reason)),
    }
    Ok(())
}

fn hook_input(params: &ExportParams<'_>) -> HookInput {
    let session_id = params
        .session
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| {
            params
                .transcript
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    HookInput {
        session_id,
        transcript_path: params.transcript.to_string_lossy().to_string(),
        cwd: params.cwd.to_string_lossy().to_string(),
    }
}

fn describe(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::MalformedPayload => "input is not valid JSON",
        SkipReason::MissingTranscript => "transcript file not found or unreadable",
        SkipReason::EmptyTranscript => "no user or assistant messages to save",
    }
}
