mod cmd_bridge;
mod cmd_export;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scribe",
    version,
    about = "Save Claude Code session transcripts as Markdown"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a transcript file to `<cwd>/ai-sessions/<session>.md`
    Export {
        /// Path to the transcript JSONL file
        #[arg(long)]
        transcript: PathBuf,
        /// Session id (defaults to the transcript file stem)
        #[arg(long)]
        session: Option<String>,
        /// Project directory that receives the document (defaults to the current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Print the document to stdout instead of writing it
        #[arg(long)]
        print: bool,
    },
    /// Bridge operations
    Bridge {
        #[command(subcommand)]
        cmd: BridgeCmd,
    },
    /// Hook entrypoint (called by Claude Code hooks)
    Hook {
        #[command(subcommand)]
        cmd: HookCmd,
    },
    /// Check bridge health
    Doctor {
        #[command(subcommand)]
        cmd: DoctorCmd,
    },
}

#[derive(Subcommand)]
enum BridgeCmd {
    /// Claude Code bridge operations
    Claude {
        #[command(subcommand)]
        cmd: BridgeClaudeCmd,
    },
}

#[derive(Subcommand)]
enum BridgeClaudeCmd {
    /// Install scribe hooks into .claude/settings.local.json
    Install,
    /// Remove scribe hooks from .claude/settings.local.json
    Uninstall,
}

#[derive(Subcommand)]
enum HookCmd {
    /// Claude Code hook entrypoint (reads stdin JSON)
    Claude,
}

#[derive(Subcommand)]
enum DoctorCmd {
    /// Check Claude Code bridge health
    Claude,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let config = scribe_bridge_claude::ExportConfig::from_env();
    tracing::debug!(?config, "resolved config");

    match cli.cmd {
        Command::Export {
            transcript,
            session,
            cwd,
            print,
        } => {
            let cwd = match cwd {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            cmd_export::execute(
                cmd_export::ExportParams {
                    transcript: &transcript,
                    session: session.as_deref(),
                    cwd: &cwd,
                    print,
                },
                &config,
            )
        }
        Command::Bridge { cmd } => {
            let repo_root = std::env::current_dir()?;
            match cmd {
                BridgeCmd::Claude { cmd } => match cmd {
                    BridgeClaudeCmd::Install => cmd_bridge::install(&repo_root),
                    BridgeClaudeCmd::Uninstall => cmd_bridge::uninstall(&repo_root),
                },
            }
        }
        Command::Hook { cmd } => match cmd {
            HookCmd::Claude => cmd_bridge::hook_claude(&config),
        },
        Command::Doctor { cmd } => {
            let repo_root = std::env::current_dir()?;
            match cmd {
                DoctorCmd::Claude => cmd_bridge::doctor(&repo_root, &config),
            }
        }
    }
}
