//! Platform logging initialization for the dispatcher.
//!
//! The terminal belongs to the UI while the app runs, so log output goes to a
//! file (`./dispatcher.log` unless configured otherwise).

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Initialize the file logger. Failing to create the file only disables logging.
pub fn initialize(log_file: &Path, level: LevelFilter) {
    let loggers: Vec<Box<dyn SharedLogger>> = match create_file_logger(log_file, level) {
        Some(file_logger) => vec![file_logger],
        None => return,
    };

    let _ = CombinedLogger::init(loggers);
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(log_path: &Path, level: LevelFilter) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, build_config(), file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_switches_to_debug() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[test]
    fn unwritable_log_path_is_tolerated() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let missing = dir.path().join("no_such_dir").join("dispatcher.log");
        assert!(create_file_logger(&missing, LevelFilter::Info).is_none());
    }
}
