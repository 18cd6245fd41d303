//! rdb-sql - текстовый фронтенд реляционной базы данных
//!
//! Превращает исходный текст с одним или несколькими SQL выражениями в типизированное
//! дерево разбора и список диагностик. Ошибка в одном выражении не прерывает разбор
//! остальных. Выполнение запросов, хранение и проверка схемы сюда не входят:
//! они получают готовый `Script` и список ошибок.
//!
//! ```
//! use rdb_sql::parse_sql;
//!
//! let result = parse_sql("DROP TABLE Users; DROP Users;");
//! assert_eq!(result.script.to_string(), "DROP TABLE Users;\n");
//! assert_eq!(result.errors, vec!["Expected KwTable, got Id"]);
//! ```

pub mod cli;
pub mod common;
pub mod parser;

pub use common::error::{Error, Result, SyntaxError};
pub use parser::{
    parse_sql, Lexer, ParseResult, Position, Script, SqlParser, SqlStatement, Token, TokenType,
};

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
