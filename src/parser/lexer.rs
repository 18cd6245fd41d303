//! Лексический анализатор SQL для rdb-sql
//!
//! Преобразует входной SQL текст в последовательность токенов для дальнейшего парсинга.
//! Лексер никогда не возвращает ошибок: некорректные лексемы превращаются в токены
//! `Unknown`, а их классификация откладывается до парсера.
//!
//! Все токены ссылаются на исходный буфер и не могут его пережить.

use crate::parser::token::{keyword, Position, Token, TokenType};

/// Лексический анализатор SQL
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// Исходный текст
    input: &'a str,
    /// Текущая позиция в тексте
    current_position: Position,
    /// Заглянутый вперёд токен (ровно один)
    lookahead: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Создает новый лексический анализатор
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            current_position: Position::start(),
            lookahead: None,
        }
    }
}

// Подключаем методы из отдельных файлов
include!("lexer_methods.rs");
include!("lexer_readers.rs");
