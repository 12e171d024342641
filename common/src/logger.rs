use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static MISSING_LOGGER_REPORTED: AtomicBool = AtomicBool::new(false);

/// Where log lines go. The game screen owns stdout, so there is no stdout
/// option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    File(PathBuf),
    Disabled,
}

enum Sink {
    Stderr,
    File(Mutex<File>),
    Disabled,
}

pub struct Logger {
    prefix: Option<String>,
    sink: Sink,
}

impl Logger {
    fn new(prefix: Option<String>, output: LogOutput) -> Result<Self, String> {
        let sink = match output {
            LogOutput::Stderr => Sink::Stderr,
            LogOutput::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
                Sink::File(Mutex::new(file))
            }
            LogOutput::Disabled => Sink::Disabled,
        };
        Ok(Self { prefix, sink })
    }

    fn format(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        match &self.sink {
            Sink::Disabled => {}
            Sink::Stderr => eprintln!("{}", self.format(file, line, message)),
            Sink::File(file_sink) => {
                let formatted = self.format(file, line, message);
                if let Ok(mut handle) = file_sink.lock() {
                    let _ = writeln!(handle, "{}", formatted);
                }
            }
        }
    }
}

/// First call wins; later calls keep the existing logger.
pub fn init_logger(prefix: Option<String>, output: LogOutput) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = Logger::new(prefix, output)?;
    let _ = LOGGER.set(logger);
    Ok(())
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else if !MISSING_LOGGER_REPORTED.swap(true, Ordering::Relaxed) {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
