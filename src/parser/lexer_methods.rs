// Методы лексического анализатора

impl<'a> Lexer<'a> {
    /// Возвращает следующий токен и продвигает позицию
    ///
    /// После конца ввода каждый вызов возвращает новый токен `Eof`
    /// в финальной позиции.
    pub fn get(&mut self) -> Token<'a> {
        // Сначала отдаем заглянутый токен, если он есть
        if let Some(token) = self.lookahead.take() {
            return token;
        }
        self.scan()
    }

    /// Возвращает следующий токен без его потребления (lookahead)
    ///
    /// Повторные вызовы без `get()` между ними возвращают один и тот же токен.
    pub fn peek(&mut self) -> Token<'a> {
        match self.lookahead {
            Some(token) => token,
            None => {
                let token = self.scan();
                self.lookahead = Some(token);
                token
            }
        }
    }

    /// Возвращает все оставшиеся токены, включая завершающий `Eof`
    pub fn tokenize(&mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.get();
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Сканирует очередной токен из входного текста
    fn scan(&mut self) -> Token<'a> {
        // Пропускаем пробелы
        self.skip_whitespace();

        // Проверяем конец ввода
        let Some(current_char) = self.peek_char() else {
            return Token::eof(self.current_position);
        };

        // Определяем тип токена по первому символу
        match current_char {
            b'a'..=b'z' | b'A'..=b'Z' => self.read_identifier_or_keyword(),
            b'+' | b'-' | b'0'..=b'9' => self.read_number(),
            b'"' => self.read_string_literal(),
            b'!' | b'<' | b'>' | b'=' => self.read_operator(),
            b';' => self.read_single_char_token(TokenType::Semicolon),
            b',' => self.read_single_char_token(TokenType::Comma),
            b'(' => self.read_single_char_token(TokenType::LeftParen),
            b')' => self.read_single_char_token(TokenType::RightParen),
            _ => self.read_unknown_char(),
        }
    }

    // === Вспомогательные методы ===

    /// Возвращает текущий байт и продвигает позицию
    pub(crate) fn advance(&mut self) -> Option<u8> {
        let byte = self.peek_char()?;
        self.current_position.advance(byte);
        Some(byte)
    }

    /// Возвращает следующий байт без продвижения позиции
    pub(crate) fn peek_char(&self) -> Option<u8> {
        self.input.as_bytes().get(self.current_position.offset).copied()
    }

    /// Продвигает позицию, пока байт удовлетворяет условию
    pub(crate) fn advance_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while let Some(byte) = self.peek_char() {
            if !predicate(byte) {
                break;
            }
            self.advance();
        }
    }

    /// Пропускает пробельные символы
    pub(crate) fn skip_whitespace(&mut self) {
        self.advance_while(is_space);
    }

    /// Собирает токен из текста между `start` и текущей позицией
    pub(crate) fn make_token(&self, token_type: TokenType, start: Position) -> Token<'a> {
        let text = &self.input[start.offset..self.current_position.offset];
        Token::new(token_type, text, start)
    }

    /// Читает токен из одного символа
    pub(crate) fn read_single_char_token(&mut self, token_type: TokenType) -> Token<'a> {
        let start = self.current_position;
        self.advance();
        self.make_token(token_type, start)
    }
}

/// Пробельные символы ASCII, включая вертикальную табуляцию
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
