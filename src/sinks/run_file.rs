//! Per-run log file location
//!
//! Each process start gets its own file:
//! `<root>/<program>/<program>.log.<YYYYMMDD>-<HHMMSS>.<pid>`.

use crate::core::{LoggerError, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fs::DirBuilder;
use std::path::{Path, PathBuf};

/// Root directory under which every program gets its own log directory
pub const DEFAULT_LOG_ROOT: &str = "/var/log/kslog";

/// Permission bits for created log directories (Unix only)
pub const LOG_DIR_MODE: u32 = 0o770;

/// Basename of the running executable
///
/// Backslashes count as separators too. Falls back to `"unknown"` when the
/// process was started without an argv[0].
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|arg0| program_from_path(&arg0.to_string_lossy()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn program_from_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized
        .rsplit('/')
        .find(|part| !part.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// `<root>/<program>`
pub fn log_directory(root: impl AsRef<Path>, program: &str) -> PathBuf {
    root.as_ref().join(program)
}

/// `<program>.log.<YYYY><MM><DD>-<HH><MM><SS>.<pid>`
pub fn log_file_name<Tz: TimeZone>(program: &str, time: &DateTime<Tz>, pid: u32) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.log.{}.{}", program, time.format("%Y%m%d-%H%M%S"), pid)
}

/// Create `path` and any missing parents
pub fn create_log_directory(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(LOG_DIR_MODE);
    }
    builder.create(path).map_err(|e| {
        LoggerError::io_operation(
            "creating log directory",
            format!("cannot create {}", path.display()),
            e,
        )
    })
}

/// Full path of this process's log file under `root`
///
/// Only computes the path; see [`create_log_directory`].
pub fn per_run_log_path(root: impl AsRef<Path>) -> PathBuf {
    let program = program_name();
    log_directory(root, &program).join(log_file_name(
        &program,
        &Local::now(),
        std::process::id(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_program_from_path() {
        assert_eq!(program_from_path("/usr/local/bin/authd"), "authd");
        assert_eq!(program_from_path("C:\\svc\\authd.exe"), "authd.exe");
        assert_eq!(program_from_path("authd"), "authd");
        assert_eq!(program_from_path(""), "");
    }

    #[test]
    fn test_program_name_not_empty() {
        assert!(!program_name().is_empty());
    }

    #[test]
    fn test_log_file_name() {
        let time = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(
            log_file_name("authd", &time, 4242),
            "authd.log.20240305-070809.4242"
        );
    }

    #[test]
    fn test_log_directory() {
        assert_eq!(
            log_directory("/var/log/kslog", "authd"),
            PathBuf::from("/var/log/kslog/authd")
        );
    }

    #[test]
    fn test_per_run_log_path_shape() {
        let path = per_run_log_path("/tmp/kslog-root");
        let program = program_name();
        assert_eq!(path.parent(), Some(log_directory("/tmp/kslog-root", &program).as_path()));

        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file.starts_with(&format!("{}.log.", program)));
        assert!(file.ends_with(&format!(".{}", std::process::id())));
    }

    #[test]
    fn test_create_log_directory_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        create_log_directory(&nested).unwrap();
        assert!(nested.is_dir());
        // already existing is fine
        create_log_directory(&nested).unwrap();
    }
}
