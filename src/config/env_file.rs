//! `.env` file discovery and loading

use crate::utils::paths::executable_dir;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = ".env";

/// Per-user directory holding a `.env` file
const USER_ENV_DIR: &str = ".cli-helper";

/// Candidate `.env` files, in search order
///
/// The working directory first, then next to the executable, then
/// `~/.cli-helper/.env`.
pub fn env_file_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(ENV_FILE_NAME)];

    if let Some(exe_dir) = executable_dir() {
        paths.push(exe_dir.join(ENV_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(USER_ENV_DIR).join(ENV_FILE_NAME));
    }

    paths
}

/// First candidate that exists; later files are never read
pub fn find_env_file(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .find(|p| p.exists())
        .map(PathBuf::as_path)
}

/// Load the first existing `.env` file into the process environment
///
/// Variables already set in the environment keep their values.
pub fn load_env_file(candidates: &[PathBuf]) -> Result<PathBuf> {
    let path = find_env_file(candidates).with_context(|| {
        format!(
            "{} file not found in any of: {}",
            ENV_FILE_NAME,
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    dotenvy::from_path(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_search_order() {
        let paths = env_file_search_paths();
        assert_eq!(paths[0], PathBuf::from(".env"));
        assert!(paths
            .last()
            .unwrap()
            .ends_with(Path::new(".cli-helper").join(".env")));
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local").join(".env");
        let beside_exe = dir.path().join("bin").join(".env");
        let user = dir.path().join("home").join(".env");
        for path in [&beside_exe, &user] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "A=1\n").unwrap();
        }

        let candidates = vec![local, beside_exe.clone(), user];
        assert_eq!(find_env_file(&candidates), Some(beside_exe.as_path()));
    }

    #[test]
    fn test_missing_files_is_error() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![dir.path().join(".env")];
        assert!(find_env_file(&candidates).is_none());

        let err = load_env_file(&candidates).unwrap_err();
        assert!(err.to_string().contains(".env file not found"));
    }

    #[test]
    fn test_loads_variables_without_overriding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "CLI_HELPER_ENV_FILE_TEST_NEW=from-file\nCLI_HELPER_ENV_FILE_TEST_SET=from-file\n",
        )
        .unwrap();
        std::env::set_var("CLI_HELPER_ENV_FILE_TEST_SET", "from-env");

        let loaded = load_env_file(&[path.clone()]).unwrap();
        assert_eq!(loaded, path);
        assert_eq!(
            std::env::var("CLI_HELPER_ENV_FILE_TEST_NEW").unwrap(),
            "from-file"
        );
        assert_eq!(
            std::env::var("CLI_HELPER_ENV_FILE_TEST_SET").unwrap(),
            "from-env"
        );
    }

    #[test]
    fn test_unparseable_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "NOT A VALID LINE\n").unwrap();

        let err = load_env_file(&[path.clone()]).unwrap_err();
        assert!(format!("{:#}", err).contains(&path.display().to_string()));
    }
}
