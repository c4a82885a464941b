//! File logger. The terminal belongs to the board, so log output can only go to a file.

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{}.{:03} {:<5} {}: {}",
                stamp.as_secs(),
                stamp.subsec_millis(),
                record.level(),
                record.target(),
                record.args(),
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Appends log records at or above `level` to the file at `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("couldn't open log file {}", path.display()))?;
    log::set_boxed_logger(Box::new(FileLogger { level, file: Mutex::new(file) }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_enabled_records() {
        let path = std::env::temp_dir().join(format!("msweeper-log-test-{}.log", std::process::id()));
        init(&path, LevelFilter::Info).unwrap();
        log::info!("opened a safe cell");
        log::trace!("not interesting");
        log::logger().flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(contents.lines().any(|l| l.contains("INFO") && l.ends_with("opened a safe cell")));
        assert!(!contents.contains("not interesting"));
    }
}
