//! Обработка ошибок для rdb-sql
//!
//! `Error` описывает сбои внешнего окружения (файлы, конфигурация, сериализация),
//! а `SyntaxError` - нарушения грамматики, которые парсер превращает в диагностики.

use crate::parser::token::TokenType;
use thiserror::Error;

/// Основной тип ошибки для rdb-sql
#[derive(Error, Debug)]
pub enum Error {
    /// Ошибка I/O операций
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Ошибка разбора файла конфигурации
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Ошибка записи конфигурации
    #[error("Configuration serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Ошибка парсинга SQL
    #[error("SQL parsing error: {message}")]
    SqlParsing { message: String },

    /// Ошибка конфигурации
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Тип результата для rdb-sql
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Создает ошибку SQL парсинга
    pub fn sql_parsing(message: impl Into<String>) -> Self {
        Self::SqlParsing {
            message: message.into(),
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Синтаксическая ошибка внутри SQL выражения
///
/// Текст каждого варианта является публичным форматом диагностик.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// Токен не совпал с ожидаемым
    #[error("Expected {expected}, got {found}")]
    UnexpectedToken {
        expected: TokenType,
        found: TokenType,
    },

    /// Первый токен не начинает ни одно из поддерживаемых выражений
    #[error("Expected statement type")]
    StatementType,

    /// Ожидалось значение для INSERT
    #[error("Expected Int, Real or String")]
    Value,

    /// Ожидался операнд условия WHERE
    #[error("Expected Int, Real, String or Id")]
    Operand,

    /// Ожидался оператор сравнения
    #[error("Expected OperationType, got {found}")]
    Operation { found: TokenType },

    /// Ожидался тип колонки
    #[error("Expected INT, REAL or TEXT, got {found}")]
    ColumnType { found: TokenType },
}

impl SyntaxError {
    /// Можно ли продолжить разбор скрипта после этой ошибки
    ///
    /// Нераспознанное начало выражения не имеет точки синхронизации.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SyntaxError::StatementType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_messages() {
        let error = SyntaxError::UnexpectedToken {
            expected: TokenType::Table,
            found: TokenType::Identifier,
        };
        assert_eq!(error.to_string(), "Expected KwTable, got Id");

        let error = SyntaxError::Operation {
            found: TokenType::Semicolon,
        };
        assert_eq!(error.to_string(), "Expected OperationType, got Semicolon");

        let error = SyntaxError::ColumnType {
            found: TokenType::Identifier,
        };
        assert_eq!(error.to_string(), "Expected INT, REAL or TEXT, got Id");

        assert_eq!(SyntaxError::StatementType.to_string(), "Expected statement type");
        assert_eq!(SyntaxError::Value.to_string(), "Expected Int, Real or String");
        assert_eq!(
            SyntaxError::Operand.to_string(),
            "Expected Int, Real, String or Id"
        );
    }

    #[test]
    fn test_only_statement_type_is_fatal() {
        assert!(!SyntaxError::StatementType.is_recoverable());
        assert!(SyntaxError::Value.is_recoverable());
        assert!(SyntaxError::Operand.is_recoverable());
    }

    #[test]
    fn test_error_constructors() {
        let error = Error::sql_parsing("Expected statement type");
        assert_eq!(error.to_string(), "SQL parsing error: Expected statement type");

        let error = Error::configuration("unknown format");
        assert_eq!(error.to_string(), "Configuration error: unknown format");
    }
}
