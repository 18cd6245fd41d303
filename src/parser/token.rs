//! Токены для SQL лексера rdb-sql
//!
//! Определяет все типы токенов, которые может распознать лексический анализатор:
//! ключевые слова, идентификаторы, литералы, операторы сравнения и пунктуацию.
//! Текст токена не копируется, а ссылается на исходный буфер.

use serde::Serialize;
use std::fmt;

/// Текст токена конца ввода
pub const EOF_TEXT: &str = "<EOF>";

/// Позиция в исходном тексте
///
/// Строка и колонка считаются от нуля, смещение задаётся в байтах.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    pub fn start() -> Self {
        Self::new(0, 0, 0)
    }

    /// Сдвигает позицию на один прочитанный байт
    pub(crate) fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.offset += 1;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Токен с позицией и текстом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub token_type: TokenType,
    pub text: &'a str,
    pub position: Position,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType, text: &'a str, position: Position) -> Self {
        Self {
            token_type,
            text,
            position,
        }
    }

    /// Токен конца ввода в заданной позиции
    pub fn eof(position: Position) -> Self {
        Self::new(TokenType::Eof, EOF_TEXT, position)
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' Loc={}:{}",
            self.token_type, self.text, self.position.column, self.position.line
        )
    }
}

/// Типы токенов SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    // === Литералы и идентификаторы ===
    Identifier,
    IntegerLiteral,
    RealLiteral,
    StringLiteral,

    // === Служебные ===
    /// Нераспознанная лексема
    Unknown,
    Eof,

    // === Пунктуация ===
    Semicolon,
    Comma,
    LeftParen,
    RightParen,

    // === Операторы сравнения ===
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,

    // === Ключевые слова SQL ===
    Select,
    From,
    Create,
    Table,
    Where,
    Insert,
    Into,
    Values,
    Delete,
    Drop,
    Int,
    Real,
    Text,
}

impl TokenType {
    /// Имя типа токена, используемое в диагностиках парсера
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Identifier => "Id",
            TokenType::IntegerLiteral => "Int",
            TokenType::RealLiteral => "Real",
            TokenType::StringLiteral => "String",
            TokenType::Unknown => "Unknown",
            TokenType::Eof => "Eof",
            TokenType::Semicolon => "Semicolon",
            TokenType::Comma => "Comma",
            TokenType::LeftParen => "LBracket",
            TokenType::RightParen => "RBracket",
            TokenType::Less => "Less",
            TokenType::Greater => "Greater",
            TokenType::LessEqual => "Less or equal",
            TokenType::GreaterEqual => "Greater or equal",
            TokenType::Equal => "Equal",
            TokenType::NotEqual => "Not equal",
            TokenType::Select => "KwSelect",
            TokenType::From => "KwFrom",
            TokenType::Create => "KwCreate",
            TokenType::Table => "KwTable",
            TokenType::Where => "KwWhere",
            TokenType::Insert => "KwInsert",
            TokenType::Into => "KwInto",
            TokenType::Values => "KwValues",
            TokenType::Delete => "KwDelete",
            TokenType::Drop => "KwDrop",
            TokenType::Int => "KwInt",
            TokenType::Real => "KwReal",
            TokenType::Text => "KwText",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ищет ключевое слово по точному (регистрозависимому) совпадению
pub fn keyword(text: &str) -> Option<TokenType> {
    let token_type = match text {
        "SELECT" => TokenType::Select,
        "FROM" => TokenType::From,
        "CREATE" => TokenType::Create,
        "TABLE" => TokenType::Table,
        "WHERE" => TokenType::Where,
        "INSERT" => TokenType::Insert,
        "INTO" => TokenType::Into,
        "VALUES" => TokenType::Values,
        "DELETE" => TokenType::Delete,
        "DROP" => TokenType::Drop,
        "INT" => TokenType::Int,
        "REAL" => TokenType::Real,
        "TEXT" => TokenType::Text,
        _ => return None,
    };
    Some(token_type)
}
