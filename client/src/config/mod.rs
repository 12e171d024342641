mod main_config;
mod game_config;
mod log_config;
mod ui_config;

pub use main_config::get_config_manager;
pub use game_config::GameConfig;
pub use log_config::LogConfig;
pub use ui_config::UiConfig;
