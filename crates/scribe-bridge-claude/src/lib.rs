pub mod render;

mod admin;
mod config;
mod dispatch;
mod index;
mod parse;

// Re-export public API (CLI consumers)
pub use admin::{doctor, install, uninstall};
pub use config::ExportConfig;
pub use dispatch::{
    build_document, export_session, hook_entrypoint_from_stdin, write_document, ExportError,
    ExportOutcome, SkipReason,
};
pub use index::{find_session, LookupMiss, SessionIndexEntry, SessionLookup};
pub use parse::{parse_hook_stdin, HookInput};
pub use render::SessionDocument;
