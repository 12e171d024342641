use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

use super::{GameConfig, LogConfig, UiConfig};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>
{
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Applies command-line values on top of the file config and validates the
    /// result, so a flag is held to the same limits as the file.
    pub fn with_overrides(mut self, seed: Option<u64>, bot_delay_ms: Option<u64>) -> Result<Self, String> {
        if let Some(seed) = seed {
            self.game.seed = Some(seed);
        }
        if let Some(bot_delay_ms) = bot_delay_ms {
            self.game.bot_delay_ms = bot_delay_ms;
        }
        self.validate()?;
        Ok(self)
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.log.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}
