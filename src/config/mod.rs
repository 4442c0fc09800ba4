mod app_config;
mod play_config;

pub use app_config::{AppConfig, CONFIG_FILE, TimingConfig, WindowConfig};
pub use play_config::{MismatchPolicy, PlayConfig};
