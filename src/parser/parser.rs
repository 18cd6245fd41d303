//! Парсер SQL для rdb-sql
//!
//! Рекурсивный спуск по потоку токенов лексера. Ошибка внутри выражения
//! записывается в список диагностик, после чего парсер пропускает токены
//! до ближайшей `;` (или конца ввода) и продолжает со следующего выражения.
//! Нераспознанное начало выражения завершает разбор всего скрипта.

use crate::common::SyntaxError;
use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenType};
use tracing::{debug, trace, warn};

/// Результат одного шага разбора
type ParseStep<T> = std::result::Result<T, SyntaxError>;

/// Рекурсивный парсер SQL с восстановлением после ошибок
pub struct SqlParser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> SqlParser<'a> {
    /// Создает парсер поверх готового лексера
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer }
    }

    /// Создает парсер для SQL текста
    pub fn from_sql(input: &'a str) -> Self {
        Self::new(Lexer::new(input))
    }

    /// Разбирает все выражения до конца ввода
    pub fn parse_script(&mut self) -> ParseResult<'a> {
        let mut result = ParseResult::default();

        while !self.lexer.peek().is_eof() {
            match self.parse_statement() {
                Ok(statement) => {
                    trace!(statement = %statement, "statement parsed");
                    result.script.push(statement);
                }
                Err(error) if error.is_recoverable() => {
                    debug!(%error, token = %self.lexer.peek(), "syntax error, skipping statement");
                    result.errors.push(error.to_string());
                    self.recover();
                }
                Err(error) => {
                    warn!(%error, token = %self.lexer.peek(), "cannot resynchronize, parsing stopped");
                    result.errors.push(error.to_string());
                    break;
                }
            }
        }

        debug!(
            statements = result.script.len(),
            errors = result.errors.len(),
            "script parsed"
        );
        result
    }

    /// Парсит одно SQL выражение, выбирая правило по первому токену
    fn parse_statement(&mut self) -> ParseStep<SqlStatement<'a>> {
        match self.lexer.peek().token_type {
            TokenType::Drop => self.parse_drop_table().map(SqlStatement::DropTable),
            TokenType::Insert => self.parse_insert().map(SqlStatement::Insert),
            TokenType::Select => self.parse_select().map(SqlStatement::Select),
            TokenType::Delete => self.parse_delete().map(SqlStatement::Delete),
            TokenType::Create => self.parse_create_table().map(SqlStatement::CreateTable),
            _ => Err(SyntaxError::StatementType),
        }
    }

    /// Пропускает токены до `;` включительно или до конца ввода
    fn recover(&mut self) {
        loop {
            let token = self.lexer.get();
            if matches!(token.token_type, TokenType::Semicolon | TokenType::Eof) {
                break;
            }
        }
    }
}

impl<'a> SqlParser<'a> {
    /// Проверяет, соответствует ли следующий токен ожидаемому типу
    fn match_token(&mut self, token_type: TokenType) -> bool {
        self.lexer.peek().token_type == token_type
    }

    /// Ожидает токен определенного типа и потребляет его
    fn expect_token(&mut self, expected: TokenType) -> ParseStep<Token<'a>> {
        let token = self.lexer.peek();
        if token.token_type != expected {
            return Err(SyntaxError::UnexpectedToken {
                expected,
                found: token.token_type,
            });
        }
        Ok(self.lexer.get())
    }

    /// Парсит идентификатор
    fn parse_identifier(&mut self) -> ParseStep<&'a str> {
        self.expect_token(TokenType::Identifier).map(|token| token.text)
    }

    /// Парсит список идентификаторов через запятую
    fn parse_identifier_list(&mut self) -> ParseStep<Vec<&'a str>> {
        let mut identifiers = vec![self.parse_identifier()?];

        while self.match_token(TokenType::Comma) {
            self.expect_token(TokenType::Comma)?;
            identifiers.push(self.parse_identifier()?);
        }

        Ok(identifiers)
    }

    /// Парсит необязательную клаузулу WHERE
    fn parse_where_clause(&mut self) -> ParseStep<Option<Expression<'a>>> {
        if !self.match_token(TokenType::Where) {
            return Ok(None);
        }
        self.expect_token(TokenType::Where)?;
        self.parse_expression().map(Some)
    }

    // Основные методы парсинга

    fn parse_drop_table(&mut self) -> ParseStep<DropTableStatement<'a>> {
        self.expect_token(TokenType::Drop)?;
        self.expect_token(TokenType::Table)?;
        let table = self.parse_identifier()?;
        self.expect_token(TokenType::Semicolon)?;

        Ok(DropTableStatement { table })
    }

    fn parse_insert(&mut self) -> ParseStep<InsertStatement<'a>> {
        self.expect_token(TokenType::Insert)?;
        self.expect_token(TokenType::Into)?;
        let table = self.parse_identifier()?;

        self.expect_token(TokenType::LeftParen)?;
        let columns = self.parse_identifier_list()?;
        self.expect_token(TokenType::RightParen)?;

        self.expect_token(TokenType::Values)?;
        self.expect_token(TokenType::LeftParen)?;
        let mut values = vec![self.parse_value()?];
        while self.match_token(TokenType::Comma) {
            self.expect_token(TokenType::Comma)?;
            values.push(self.parse_value()?);
        }
        self.expect_token(TokenType::RightParen)?;
        self.expect_token(TokenType::Semicolon)?;

        Ok(InsertStatement {
            table,
            columns,
            values,
        })
    }

    fn parse_select(&mut self) -> ParseStep<SelectStatement<'a>> {
        self.expect_token(TokenType::Select)?;

        // Колонки перечисляются через пробел, а не через запятую
        let mut columns = vec![self.parse_identifier()?];
        while self.match_token(TokenType::Identifier) {
            columns.push(self.parse_identifier()?);
        }

        self.expect_token(TokenType::From)?;
        let table = self.parse_identifier()?;
        let where_clause = self.parse_where_clause()?;
        self.expect_token(TokenType::Semicolon)?;

        Ok(SelectStatement {
            columns,
            table,
            where_clause,
        })
    }

    fn parse_delete(&mut self) -> ParseStep<DeleteStatement<'a>> {
        self.expect_token(TokenType::Delete)?;
        self.expect_token(TokenType::From)?;
        let table = self.parse_identifier()?;
        let where_clause = self.parse_where_clause()?;
        self.expect_token(TokenType::Semicolon)?;

        Ok(DeleteStatement {
            table,
            where_clause,
        })
    }

    fn parse_create_table(&mut self) -> ParseStep<CreateTableStatement<'a>> {
        self.expect_token(TokenType::Create)?;
        self.expect_token(TokenType::Table)?;
        let table = self.parse_identifier()?;

        self.expect_token(TokenType::LeftParen)?;
        let mut columns = vec![self.parse_column_definition()?];
        while self.match_token(TokenType::Comma) {
            self.expect_token(TokenType::Comma)?;
            columns.push(self.parse_column_definition()?);
        }
        self.expect_token(TokenType::RightParen)?;
        self.expect_token(TokenType::Semicolon)?;

        Ok(CreateTableStatement { table, columns })
    }

    fn parse_column_definition(&mut self) -> ParseStep<ColumnDefinition<'a>> {
        let name = self.parse_identifier()?;

        let found = self.lexer.peek().token_type;
        let data_type =
            DataType::from_token_type(found).ok_or(SyntaxError::ColumnType { found })?;
        self.lexer.get();

        Ok(ColumnDefinition { name, data_type })
    }

    /// Парсит значение для INSERT: идентификаторы здесь не допускаются
    fn parse_value(&mut self) -> ParseStep<Value<'a>> {
        let token = self.lexer.peek();
        let value = match token.token_type {
            TokenType::IntegerLiteral => Value::Integer(parse_integer(token.text)),
            TokenType::RealLiteral => Value::Real(parse_real(token.text)),
            TokenType::StringLiteral => Value::Text(token.text),
            _ => return Err(SyntaxError::Value),
        };
        self.lexer.get();
        Ok(value)
    }

    fn parse_operand(&mut self) -> ParseStep<Operand<'a>> {
        let token = self.lexer.peek();
        let operand = match token.token_type {
            TokenType::IntegerLiteral => Operand::Integer(parse_integer(token.text)),
            TokenType::RealLiteral => Operand::Real(parse_real(token.text)),
            TokenType::StringLiteral => Operand::Text(token.text),
            TokenType::Identifier => Operand::Identifier(token.text),
            _ => return Err(SyntaxError::Operand),
        };
        self.lexer.get();
        Ok(operand)
    }

    /// Парсит условие: операнд, оператор сравнения, операнд
    fn parse_expression(&mut self) -> ParseStep<Expression<'a>> {
        let left = self.parse_operand()?;

        let found = self.lexer.peek().token_type;
        let operator =
            ComparisonOperator::from_token_type(found).ok_or(SyntaxError::Operation { found })?;
        self.lexer.get();

        let right = self.parse_operand()?;

        Ok(Expression {
            left,
            operator,
            right,
        })
    }
}

/// Переводит текст целочисленного литерала в число
///
/// Значения за пределами `i32` насыщаются до границы диапазона.
fn parse_integer(text: &str) -> i32 {
    text.parse::<i32>().unwrap_or(if text.starts_with('-') {
        i32::MIN
    } else {
        i32::MAX
    })
}

/// Переводит текст вещественного литерала в число
fn parse_real(text: &str) -> f32 {
    text.parse::<f32>().unwrap_or_default()
}

/// Разбирает SQL скрипт целиком
pub fn parse_sql(input: &str) -> ParseResult<'_> {
    SqlParser::from_sql(input).parse_script()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_saturates() {
        assert_eq!(parse_integer("123"), 123);
        assert_eq!(parse_integer("+7"), 7);
        assert_eq!(parse_integer("-0"), 0);
        assert_eq!(parse_integer("99999999999"), i32::MAX);
        assert_eq!(parse_integer("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_parse_real() {
        assert_eq!(parse_real("4.56"), 4.56_f32);
        assert_eq!(parse_real("-0.6"), -0.6_f32);
        assert_eq!(parse_real("+1.5"), 1.5_f32);
    }
}
