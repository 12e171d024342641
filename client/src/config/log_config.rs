use common::config::Validate;
use common::logger::LogOutput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutputKind {
    Stderr,
    File,
    Disabled,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub output: LogOutputKind,
    pub file: String,
}

impl LogConfig {
    pub fn to_output(&self) -> LogOutput {
        match self.output {
            LogOutputKind::Stderr => LogOutput::Stderr,
            LogOutputKind::File => LogOutput::File(self.file.clone().into()),
            LogOutputKind::Disabled => LogOutput::Disabled,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output == LogOutputKind::File && self.file.trim().is_empty() {
            return Err("log file must not be empty when output is 'file'".to_string());
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: LogOutputKind::File,
            file: "tictactoe.log".to_string(),
        }
    }
}
