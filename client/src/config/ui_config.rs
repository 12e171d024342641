use common::config::Validate;
use serde::{Deserialize, Serialize};

pub const MAX_EVENT_LOG_SIZE: usize = 64;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub event_log_size: usize,
    pub clear_screen: bool,
    pub color: bool,
}

impl Validate for UiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.event_log_size == 0 || self.event_log_size > MAX_EVENT_LOG_SIZE {
            return Err(format!(
                "event_log_size must be between 1 and {}",
                MAX_EVENT_LOG_SIZE
            ));
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            event_log_size: 8,
            clear_screen: true,
            color: true,
        }
    }
}
