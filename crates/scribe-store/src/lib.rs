use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory name for session documents under a working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "ai-sessions";

/// File name of the per-project session index kept by Claude Code.
pub const SESSIONS_INDEX_FILE: &str = "sessions-index.json";

/// Map a working-directory path to Claude Code's flat project directory name.
///
/// Every `/`, `\` and `_` becomes `-`, then the result is forced to start with
/// exactly one leading `-`: `/home/me/my_app` → `-home-me-my-app`.
pub fn project_dir_name(cwd: &str) -> String {
    let mapped: String = cwd
        .chars()
        .map(|c| match c {
            '/' | '\\' | '_' => '-',
            other => other,
        })
        .collect();
    let body = mapped.strip_prefix('-').unwrap_or(&mapped);
    format!("-{body}")
}

/// Return the per-user Claude Code config root: `~/.claude/`
pub fn default_claude_home() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".claude"),
        None => PathBuf::from(".claude"),
    }
}

/// Return the project directory: `claude_home/projects/<project_dir_name>/`
pub fn project_dir(claude_home: &Path, cwd: &str) -> PathBuf {
    claude_home.join("projects").join(project_dir_name(cwd))
}

/// Return the session index path for the project rooted at `cwd`.
pub fn sessions_index_path(claude_home: &Path, cwd: &str) -> PathBuf {
    project_dir(claude_home, cwd).join(SESSIONS_INDEX_FILE)
}

/// Return the output directory: `<cwd>/<dir_name>/`
pub fn output_dir(cwd: &str, dir_name: &str) -> PathBuf {
    Path::new(cwd).join(dir_name)
}

/// Markdown file name for a session. Path separators are flattened so the
/// file always lands directly inside the output directory.
pub fn session_file_name(session_id: &str) -> String {
    let stem: String = session_id
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{stem}.md")
}

/// Atomic write: write to temp file in same dir, then rename.
///
/// The result keeps the permissions of the file it replaces. A new file gets
/// the mode a plain create would give it (0666 minus umask).
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let permissions = target_permissions(path)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Permissions the written file should end up with. Temp files are created
/// owner-only, so these are applied before the rename.
fn target_permissions(path: &Path) -> io::Result<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Let the OS apply the umask, then reuse the resulting mode.
            match fs::OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(file) => file.metadata().map(|m| m.permissions()),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    fs::metadata(path).map(|m| m.permissions())
                }
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}
