//! Sink implementations

pub mod console;
pub mod file;
pub mod run_file;

pub use console::{ConsoleSink, DEFAULT_PREFIX_WIDTH};
pub use file::FileSink;
pub use run_file::{
    create_log_directory, log_directory, log_file_name, per_run_log_path, program_name,
    DEFAULT_LOG_ROOT,
};

pub use crate::core::Sink;
