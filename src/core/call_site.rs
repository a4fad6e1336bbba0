//! Call-site capture for log records
//!
//! Every public entry point and every wrapper between it and
//! [`CallSite::caller`] carries `#[track_caller]`, so the captured location
//! is the code that called into the logger no matter how many wrapper
//! layers sit in between. Removing the attribute from any layer moves the
//! reported location into this crate.

use std::panic::Location;

/// File name reported when no location is available
pub const UNKNOWN_FILE: &str = "???";

/// Source location (file basename and line) of a log call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: String,
    line: u32,
}

impl CallSite {
    /// Build a call site from a raw path, keeping only the basename
    ///
    /// Falls back to [`CallSite::unknown`] for an empty path or line 0.
    pub fn new(path: &str, line: u32) -> Self {
        let file = basename(path);
        if file.is_empty() || line == 0 {
            return Self::unknown();
        }
        Self {
            file: file.to_string(),
            line,
        }
    }

    /// Placeholder used when the location cannot be resolved
    pub fn unknown() -> Self {
        Self {
            file: UNKNOWN_FILE.to_string(),
            line: 1,
        }
    }

    /// Location of the caller of the outermost `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl std::fmt::Display for CallSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
