// Методы чтения отдельных видов лексем

impl<'a> Lexer<'a> {
    /// Читает идентификатор или ключевое слово
    ///
    /// Ключевые слова распознаются только при точном совпадении регистра.
    pub(crate) fn read_identifier_or_keyword(&mut self) -> Token<'a> {
        let start = self.current_position;
        self.advance_while(|byte| byte.is_ascii_alphanumeric());

        let token = self.make_token(TokenType::Identifier, start);
        match keyword(token.text) {
            Some(token_type) => Token::new(token_type, token.text, start),
            None => token,
        }
    }

    /// Читает числовой литерал со знаком
    ///
    /// Ведущий ноль перед другой цифрой образует отдельный токен: `01` -> `0`, `1`.
    /// Точка без дробной части превращает весь прочитанный текст в `Unknown`.
    pub(crate) fn read_number(&mut self) -> Token<'a> {
        let start = self.current_position;

        if matches!(self.peek_char(), Some(b'+' | b'-')) {
            self.advance();
            if !self.peek_digit() {
                return self.make_token(TokenType::Unknown, start);
            }
        }

        if self.peek_char() == Some(b'0') {
            self.advance();
            if self.peek_digit() {
                return self.make_token(TokenType::IntegerLiteral, start);
            }
        }

        self.advance_while(|byte| byte.is_ascii_digit());

        if self.peek_char() != Some(b'.') {
            return self.make_token(TokenType::IntegerLiteral, start);
        }

        self.advance();
        if !self.peek_digit() {
            return self.make_token(TokenType::Unknown, start);
        }
        self.advance_while(|byte| byte.is_ascii_digit());

        self.make_token(TokenType::RealLiteral, start)
    }

    /// Читает строковый литерал в двойных кавычках
    ///
    /// Строка без закрывающей кавычки до перевода строки или конца ввода
    /// становится токеном `Unknown` (сам перевод строки не включается).
    pub(crate) fn read_string_literal(&mut self) -> Token<'a> {
        let start = self.current_position;
        self.advance();
        self.advance_while(|byte| byte != b'"' && byte != b'\n');

        if self.peek_char() == Some(b'"') {
            self.advance();
            self.make_token(TokenType::StringLiteral, start)
        } else {
            self.make_token(TokenType::Unknown, start)
        }
    }

    /// Читает оператор сравнения
    pub(crate) fn read_operator(&mut self) -> Token<'a> {
        let start = self.current_position;
        let first = self.advance();
        let followed_by_equal = self.peek_char() == Some(b'=');

        let token_type = match (first, followed_by_equal) {
            (Some(b'!'), true) => TokenType::NotEqual,
            (Some(b'!'), false) => TokenType::Unknown,
            (Some(b'<'), true) => TokenType::LessEqual,
            (Some(b'>'), true) => TokenType::GreaterEqual,
            (Some(b'<'), false) => TokenType::Less,
            (Some(b'>'), false) => TokenType::Greater,
            (Some(b'='), _) => TokenType::Equal,
            _ => TokenType::Unknown,
        };

        // `==` читается как один токен `Equal`
        if followed_by_equal && token_type != TokenType::Unknown {
            self.advance();
        }

        self.make_token(token_type, start)
    }

    /// Читает неизвестный символ
    ///
    /// Для символов вне ASCII поглощаются все байты UTF-8 последовательности,
    /// чтобы текст токена оставался корректной строкой.
    pub(crate) fn read_unknown_char(&mut self) -> Token<'a> {
        let start = self.current_position;
        if let Some(byte) = self.advance() {
            if !byte.is_ascii() {
                self.advance_while(|next| next & 0xC0 == 0x80);
            }
        }
        self.make_token(TokenType::Unknown, start)
    }

    /// Проверяет, что следующий байт является цифрой
    fn peek_digit(&self) -> bool {
        self.peek_char().is_some_and(|byte| byte.is_ascii_digit())
    }
}
