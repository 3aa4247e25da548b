use std::path::{Path, PathBuf};

/// Expand `~` and environment variables in a configured path
///
/// Undefined variables are kept as written.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full_with_context_no_errors(path, || dirs::home_dir().map(|h| h.to_string_lossy().into_owned()), |var| {
        std::env::var(var).ok()
    });
    PathBuf::from(expanded.into_owned())
}

/// Directory holding the running executable
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
