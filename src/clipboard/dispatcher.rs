//! Deliver text to the clipboard through an external helper process

use crate::error::ClipboardError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use super::backend::{ClipboardBackend, ClipboardTool};

/// Finds helper programs on the execution path
pub trait ToolResolver {
    fn resolve(&self, program: &str) -> Option<PathBuf>;
}

/// Runs a helper with `input` on its stdin
pub trait Spawner {
    /// Returns the exit code, or `None` if the process was killed by a signal
    fn run(&self, program: &Path, args: &[&str], input: &[u8]) -> io::Result<Option<i32>>;
}

impl<T: ToolResolver + ?Sized> ToolResolver for &T {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        (**self).resolve(program)
    }
}

impl<T: Spawner + ?Sized> Spawner for &T {
    fn run(&self, program: &Path, args: &[&str], input: &[u8]) -> io::Result<Option<i32>> {
        (**self).run(program, args, input)
    }
}

/// Resolves programs through `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl ToolResolver for PathResolver {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn run(&self, program: &Path, args: &[&str], input: &[u8]) -> io::Result<Option<i32>> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // stdin must be closed before waiting or the helper never sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(input),
            None => Ok(()),
        };

        let status = child.wait()?;
        written?;
        Ok(status.code())
    }
}

/// Selects a clipboard backend for the platform on each call and runs it
#[derive(Debug, Clone)]
pub struct ClipboardDispatcher<R = PathResolver, S = ProcessSpawner> {
    platform: String,
    resolver: R,
    spawner: S,
}

impl ClipboardDispatcher {
    /// Dispatcher for the host platform
    pub fn system() -> Self {
        Self::new(std::env::consts::OS, PathResolver, ProcessSpawner)
    }
}

impl<R: ToolResolver, S: Spawner> ClipboardDispatcher<R, S> {
    pub fn new(platform: impl Into<String>, resolver: R, spawner: S) -> Self {
        Self {
            platform: platform.into(),
            resolver,
            spawner,
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Pick the tool to run, probing `PATH` where the backend needs it
    pub fn select(&self) -> Result<(ClipboardTool, PathBuf), ClipboardError> {
        let backend = ClipboardBackend::for_platform(&self.platform);
        debug!(platform = %self.platform, ?backend, "selected clipboard backend");

        match &backend {
            ClipboardBackend::Unsupported { platform } => {
                Err(ClipboardError::UnsupportedPlatform {
                    platform: platform.clone(),
                })
            }
            ClipboardBackend::Fixed(tool) => Ok((*tool, PathBuf::from(tool.program))),
            ClipboardBackend::Probing(tools) => tools
                .iter()
                .find_map(|tool| self.resolver.resolve(tool.program).map(|path| (*tool, path)))
                .ok_or_else(|| ClipboardError::ToolNotFound {
                    candidates: tools.iter().map(|t| t.program.to_string()).collect(),
                }),
        }
    }

    /// Copy `text` to the clipboard
    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let (tool, path) = self.select()?;
        debug!(tool = tool.program, path = %path.display(), "copying to clipboard");

        let failed = |reason: String| ClipboardError::ExecutionFailed {
            tool: tool.program.to_string(),
            reason,
        };

        match self.spawner.run(&path, tool.args, text.as_bytes()) {
            Ok(Some(0)) => Ok(()),
            Ok(Some(code)) => Err(failed(format!("exit status {}", code))),
            Ok(None) => Err(failed("terminated by signal".to_string())),
            Err(e) => Err(failed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeResolver(&'static [&'static str]);

    impl ToolResolver for FakeResolver {
        fn resolve(&self, program: &str) -> Option<PathBuf> {
            self.0
                .iter()
                .any(|p| *p == program)
                .then(|| PathBuf::from("/usr/bin").join(program))
        }
    }

    #[derive(Default)]
    struct RecordingSpawner {
        exit_code: Option<i32>,
        calls: Cell<usize>,
        last: RefCell<Option<(PathBuf, Vec<String>, Vec<u8>)>>,
    }

    impl Spawner for RecordingSpawner {
        fn run(&self, program: &Path, args: &[&str], input: &[u8]) -> io::Result<Option<i32>> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some((
                program.to_path_buf(),
                args.iter().map(|a| a.to_string()).collect(),
                input.to_vec(),
            ));
            Ok(self.exit_code)
        }
    }

    fn succeeding() -> RecordingSpawner {
        RecordingSpawner {
            exit_code: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn test_linux_without_tools_never_spawns() {
        let dispatcher = ClipboardDispatcher::new("linux", FakeResolver(&[]), succeeding());
        let err = dispatcher.copy("ls -la").unwrap_err();
        assert!(matches!(err, ClipboardError::ToolNotFound { .. }));
        assert_eq!(dispatcher.spawner.calls.get(), 0);
    }

    #[test]
    fn test_linux_prefers_xclip() {
        let dispatcher =
            ClipboardDispatcher::new("linux", FakeResolver(&["xsel", "xclip"]), succeeding());
        dispatcher.copy("ls -la").unwrap();

        let (program, args, input) = dispatcher.spawner.last.borrow().clone().unwrap();
        assert_eq!(program, PathBuf::from("/usr/bin/xclip"));
        assert_eq!(args, vec!["-selection", "clipboard"]);
        assert_eq!(input, b"ls -la");
    }

    #[test]
    fn test_linux_falls_back_to_xsel() {
        let dispatcher = ClipboardDispatcher::new("linux", FakeResolver(&["xsel"]), succeeding());
        dispatcher.copy("pwd").unwrap();

        let (program, args, _) = dispatcher.spawner.last.borrow().clone().unwrap();
        assert_eq!(program, PathBuf::from("/usr/bin/xsel"));
        assert_eq!(args, vec!["--clipboard", "--input"]);
    }

    #[test]
    fn test_macos_uses_pbcopy_without_probing() {
        let dispatcher = ClipboardDispatcher::new("macos", FakeResolver(&[]), succeeding());
        dispatcher.copy("pwd").unwrap();

        let (program, args, _) = dispatcher.spawner.last.borrow().clone().unwrap();
        assert_eq!(program, PathBuf::from("pbcopy"));
        assert!(args.is_empty());
    }

    #[test]
    fn test_unsupported_platform_names_platform() {
        let dispatcher = ClipboardDispatcher::new("windows", FakeResolver(&[]), succeeding());
        match dispatcher.copy("dir") {
            Err(ClipboardError::UnsupportedPlatform { platform }) => assert_eq!(platform, "windows"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(dispatcher.spawner.calls.get(), 0);
    }

    #[test]
    fn test_non_zero_exit_is_execution_failure() {
        let spawner = RecordingSpawner {
            exit_code: Some(1),
            ..Default::default()
        };
        let dispatcher = ClipboardDispatcher::new("macos", FakeResolver(&[]), spawner);
        assert!(matches!(
            dispatcher.copy("pwd"),
            Err(ClipboardError::ExecutionFailed { .. })
        ));
    }

    #[test]
    fn test_spawn_error_is_execution_failure() {
        struct FailingSpawner;
        impl Spawner for FailingSpawner {
            fn run(&self, _: &Path, _: &[&str], _: &[u8]) -> io::Result<Option<i32>> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            }
        }

        let dispatcher = ClipboardDispatcher::new("macos", FakeResolver(&[]), FailingSpawner);
        match dispatcher.copy("pwd") {
            Err(ClipboardError::ExecutionFailed { tool, reason }) => {
                assert_eq!(tool, "pbcopy");
                assert!(reason.contains("no such file"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_selection_is_not_cached() {
        struct ToggleResolver(Cell<bool>);
        impl ToolResolver for ToggleResolver {
            fn resolve(&self, program: &str) -> Option<PathBuf> {
                (self.0.get() && program == "xsel").then(|| PathBuf::from("/bin/xsel"))
            }
        }

        let dispatcher =
            ClipboardDispatcher::new("linux", ToggleResolver(Cell::new(false)), succeeding());
        assert!(dispatcher.copy("pwd").is_err());

        dispatcher.resolver.0.set(true);
        assert!(dispatcher.copy("pwd").is_ok());
        assert_eq!(dispatcher.spawner.calls.get(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_process_spawner_feeds_stdin() {
        let code = ProcessSpawner
            .run(Path::new("sh"), &["-c", "test \"$(cat)\" = hello"], b"hello")
            .unwrap();
        assert_eq!(code, Some(0));
    }
}
