//! Ошибки конфигурации
//!
//! Per-tick pipeline (detect → motion) не возвращает ошибок: отсутствие цели
//! или моторики это нормальные состояния данных. Ошибки возможны только при
//! загрузке/валидации конфига, один раз на старте сессии.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Имя категории отсутствует в статической таблице
    #[error("unknown category name `{0}`")]
    UnknownCategory(String),

    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Проверка `min <= value <= max` (NaN не проходит)
pub(crate) fn ensure_in_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<f32, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Проверка `value > 0` (NaN не проходит)
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
