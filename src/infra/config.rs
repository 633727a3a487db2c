use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::domain::table::TableConfig;

/// Ошибки загрузки конфига стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl TableConfig {
    /// Разобрать и проверить конфиг из JSON. Отсутствующие поля берутся по умолчанию.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        parse_config(json)
    }
}

pub fn parse_config(json: &str) -> Result<TableConfig, ConfigError> {
    let config: TableConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Прочитать конфиг из JSON-файла.
pub fn load_config(path: impl AsRef<Path>) -> Result<TableConfig, ConfigError> {
    let json = fs::read_to_string(path)?;
    parse_config(&json)
}

/// Жёсткая валидация конфига стола.
pub fn validate_config(config: &TableConfig) -> Result<(), ConfigError> {
    let stakes = &config.stakes;

    if stakes.small_blind.is_zero() {
        return Err(ConfigError::Invalid("TableConfig: small_blind = 0".into()));
    }

    if stakes.big_blind < stakes.small_blind {
        return Err(ConfigError::Invalid(
            "TableConfig: big_blind < small_blind".into(),
        ));
    }

    if config.starting_stack.is_zero() {
        return Err(ConfigError::Invalid("TableConfig: starting_stack = 0".into()));
    }

    if config.opponent.bluff_one_in == 0 {
        return Err(ConfigError::Invalid("TableConfig: bluff_one_in = 0".into()));
    }

    let steps = &config.pacing.runout_steps_ms;
    if steps.windows(2).any(|w| w[0] > w[1]) {
        return Err(ConfigError::Invalid(
            "TableConfig: runout_steps_ms must be non-decreasing".into(),
        ));
    }

    Ok(())
}
