//! Конфигурация для rdb-sql
//!
//! Настройки командной строки: логирование, формат вывода и строгий режим.
//! Порядок применения: файл TOML, переменные окружения, аргументы командной строки.

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Имя файла конфигурации по умолчанию
pub const DEFAULT_CONFIG_FILE: &str = "rdb-sql.toml";

/// Основная конфигурация
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Настройки логирования
    pub logging: LoggingConfig,
    /// Настройки вывода
    pub output: OutputConfig,
    /// Завершаться с ошибкой, если есть хотя бы одна диагностика
    pub strict: bool,
}

/// Конфигурация логирования
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень логирования (директива `EnvFilter`)
    pub level: String,
    /// Цветной вывод в терминал
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            ansi: true,
        }
    }
}

/// Конфигурация вывода
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Формат вывода результатов
    pub format: OutputFormat,
    /// Показывать позиции в выводе токенов
    pub show_positions: bool,
}

/// Формат вывода результатов разбора
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Канонический SQL и текст диагностик
    #[default]
    Text,
    /// JSON отчет на каждый источник
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::configuration(format!(
                "unknown output format '{}', expected text or json",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FrontendConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Сохраняет конфигурацию в TOML файл
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Загружает конфигурацию: явный файл, иначе файл по умолчанию, если он есть
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Применяет переменные окружения
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Применяет переопределения из произвольного источника переменных
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(level) = lookup("RDB_SQL_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("RDB_SQL_FORMAT") {
            self.output.format = format.parse()?;
        }

        if let Some(strict) = lookup("RDB_SQL_STRICT") {
            self.strict = parse_flag(&strict).ok_or_else(|| {
                Error::configuration(format!("RDB_SQL_STRICT: invalid boolean '{}'", strict))
            })?;
        }

        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
