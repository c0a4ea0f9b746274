use crate::settings::{AppSettings, DEFAULT_LOG_FILE_NAME};
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, RwLock};

const ROTATE_AFTER_BYTES: u64 = 100 * 1024;
const CRATE_TARGET: &str = "recipe_book";

#[derive(Debug, Clone, PartialEq, Eq)]
struct SinkConfig {
    enabled: bool,
    level: LevelFilter,
    path: PathBuf,
}

/// Append-only log file that moves itself to `<name>.1` once it grows too large.
struct RotatingFile {
    path: PathBuf,
    file: File,
    written: u64,
}

impl RotatingFile {
    fn open(path: PathBuf) -> io::Result<Self> {
        let (file, written) = open_append(&path)?;
        Ok(Self { path, file, written })
    }

    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        if self.written + line.len() as u64 > ROTATE_AFTER_BYTES {
            self.rotate()?;
        }
        self.file.write_all(line)?;
        self.written = self.written.saturating_add(line.len() as u64);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        let rotated = rotated_log_path(&self.path);
        if rotated.exists() {
            let _ = fs::remove_file(&rotated);
        }
        fs::rename(&self.path, &rotated)?;
        let (file, _) = open_append(&self.path)?;
        self.file = file;
        self.written = 0;
        Ok(())
    }
}

struct AppLogger {
    config: RwLock<SinkConfig>,
    sink: Mutex<Option<RotatingFile>>,
}

impl AppLogger {
    fn new(config: SinkConfig) -> Self {
        Self { config: RwLock::new(config), sink: Mutex::new(None) }
    }

    fn reconfigure(&self, config: SinkConfig) {
        let mut current = self.config.write().expect("logger config lock poisoned");
        if current.path != config.path || current.enabled != config.enabled {
            *self.sink.lock().expect("logger sink lock poisoned") = None;
        }
        *current = config;
    }

    fn max_level(&self) -> LevelFilter {
        let config = self.config.read().expect("logger config lock poisoned");
        if config.enabled { config.level } else { LevelFilter::Off }
    }

    fn accepts(config: &SinkConfig, level: Level, target: &str) -> bool {
        config.enabled && level <= config.level && is_crate_target(target)
    }

    fn emit(&self, line: &str, path: &Path) {
        let _ = io::stderr().write_all(line.as_bytes());

        let mut sink = self.sink.lock().expect("logger sink lock poisoned");
        if sink.as_ref().is_none_or(|file| file.path != path) {
            *sink = RotatingFile::open(path.to_path_buf()).ok();
        }
        if let Some(file) = sink.as_mut() {
            if file.write_line(line.as_bytes()).is_err() {
                *sink = None;
            }
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let config = self.config.read().expect("logger config lock poisoned");
        Self::accepts(&config, metadata.level(), metadata.target())
    }

    fn log(&self, record: &Record) {
        let path = {
            let config = self.config.read().expect("logger config lock poisoned");
            if !Self::accepts(&config, record.level(), record.target()) {
                return;
            }
            config.path.clone()
        };

        let line = format_line(
            &Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            record.level(),
            &record.args().to_string(),
        );
        self.emit(&line, &path);
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            if let Some(file) = sink.as_mut() {
                let _ = file.file.flush();
            }
        }
    }
}

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

/// Installs the process-wide logger on first use and reconfigures it afterwards.
pub fn apply_settings(settings: &AppSettings) {
    let config = SinkConfig {
        enabled: settings.logging_enabled,
        level: settings.logging_level.to_level_filter(),
        path: log_file_path(&settings.logging_path),
    };

    let logger = LOGGER.get_or_init(|| AppLogger::new(config.clone()));
    logger.reconfigure(config);
    let _ = log::set_logger(logger);
    log::set_max_level(logger.max_level());
}

fn is_crate_target(target: &str) -> bool {
    target == CRATE_TARGET
        || target.strip_prefix(CRATE_TARGET).is_some_and(|rest| rest.starts_with("::"))
}

fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("{timestamp} [{level}] {message}\n")
}

fn log_file_path(configured: &str) -> PathBuf {
    match configured.trim() {
        "" => PathBuf::from(DEFAULT_LOG_FILE_NAME),
        trimmed => PathBuf::from(trimmed),
    }
}

fn open_append(path: &Path) -> io::Result<(File, u64)> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let size = file.metadata().map(|meta| meta.len()).unwrap_or(0);
    Ok((file, size))
}

fn rotated_log_path(path: &Path) -> PathBuf {
    let file_name =
        path.file_name().and_then(|name| name.to_str()).unwrap_or(DEFAULT_LOG_FILE_NAME);
    path.with_file_name(format!("{file_name}.1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn only_crate_targets_are_accepted() {
        assert!(is_crate_target("recipe_book"));
        assert!(is_crate_target("recipe_book::store::mongo"));
        assert!(!is_crate_target("recipe_bookkeeper"));
        assert!(!is_crate_target("mongodb::cmap"));
        assert!(!is_crate_target("wgpu_core"));
    }

    #[test]
    fn disabled_config_rejects_everything() {
        let config =
            SinkConfig { enabled: false, level: LevelFilter::Trace, path: PathBuf::from("x.log") };
        assert!(!AppLogger::accepts(&config, Level::Error, CRATE_TARGET));
    }

    #[test]
    fn level_threshold_is_respected() {
        let config =
            SinkConfig { enabled: true, level: LevelFilter::Info, path: PathBuf::from("x.log") };
        assert!(AppLogger::accepts(&config, Level::Warn, CRATE_TARGET));
        assert!(!AppLogger::accepts(&config, Level::Debug, CRATE_TARGET));
    }

    #[test]
    fn line_format_has_timestamp_and_level() {
        let line = format_line("2024-05-01 12:30:00.123", Level::Warn, "Delete failed");
        assert_eq!(line, "2024-05-01 12:30:00.123 [WARN] Delete failed\n");
    }

    #[test]
    fn rotated_path_appends_suffix() {
        assert_eq!(
            rotated_log_path(Path::new("logs/recipe_book.log")),
            PathBuf::from("logs/recipe_book.log.1")
        );
    }

    #[test]
    fn blank_path_uses_default_file() {
        assert_eq!(log_file_path("  "), PathBuf::from(DEFAULT_LOG_FILE_NAME));
        assert_eq!(log_file_path(" app.log "), PathBuf::from("app.log"));
    }

    #[test]
    fn file_rotates_past_threshold() {
        let dir = env::temp_dir().join(format!("recipe_book_log_{}", std::process::id()));
        let path = dir.join("rotate.log");
        let _ = fs::remove_dir_all(&dir);

        let mut file = RotatingFile::open(path.clone()).expect("open log file");
        let chunk = vec![b'x'; 60 * 1024];
        file.write_line(&chunk).expect("first write");
        file.write_line(&chunk).expect("second write rotates");

        assert_eq!(fs::metadata(&path).expect("current log").len(), chunk.len() as u64);
        assert_eq!(
            fs::metadata(rotated_log_path(&path)).expect("rotated log").len(),
            chunk.len() as u64
        );
        let _ = fs::remove_dir_all(&dir);
    }
}
