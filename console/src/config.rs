use serde::{Deserialize, Serialize};
use std::io::ErrorKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_address: String,
    pub move_topic: String,
    pub notice_topic: String,
    pub menu_return_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:5021".to_string(),
            move_topic: "tictactoe/moves".to_string(),
            notice_topic: "tictactoe/events".to_string(),
            menu_return_delay_ms: 3000,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_address.is_empty() {
            return Err("listen_address must not be empty".to_string());
        }
        if self.move_topic.is_empty() || self.move_topic.contains(char::is_whitespace) {
            return Err("move_topic must be a non-empty word".to_string());
        }
        if self.notice_topic.is_empty() || self.notice_topic.contains(char::is_whitespace) {
            return Err("notice_topic must be a non-empty word".to_string());
        }
        if self.move_topic == self.notice_topic {
            return Err("move_topic and notice_topic must differ".to_string());
        }
        if self.menu_return_delay_ms == 0 {
            return Err("menu_return_delay_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Missing file falls back to defaults; a present but invalid file is an error.
pub fn load_config(path: &str) -> Result<Config, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => return Err(format!("Failed to read config file: {}", err)),
    };

    let config: Config = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to parse config file: {}", e))?;
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;
    Ok(config)
}
