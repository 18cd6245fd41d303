//! Абстрактное синтаксическое дерево SQL для rdb-sql
//!
//! Все текстовые поля ссылаются на исходный буфер скрипта. Каждое выражение
//! умеет выводить себя в каноническом виде: ключевые слова в исходном порядке,
//! элементы списков через пробел, вещественные числа с шестью знаками после точки.

use crate::common::{Error, Result};
use crate::parser::token::TokenType;
use serde::Serialize;
use std::fmt;

/// Основной узел AST для SQL операций
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SqlStatement<'a> {
    /// DROP TABLE операция
    DropTable(DropTableStatement<'a>),
    /// INSERT операция
    Insert(InsertStatement<'a>),
    /// SELECT запрос
    Select(SelectStatement<'a>),
    /// DELETE операция
    Delete(DeleteStatement<'a>),
    /// CREATE TABLE операция
    CreateTable(CreateTableStatement<'a>),
}

impl<'a> SqlStatement<'a> {
    /// Выводит выражение в каноническом виде
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Таблица, к которой обращается выражение
    pub fn table(&self) -> &'a str {
        match self {
            SqlStatement::DropTable(statement) => statement.table,
            SqlStatement::Insert(statement) => statement.table,
            SqlStatement::Select(statement) => statement.table,
            SqlStatement::Delete(statement) => statement.table,
            SqlStatement::CreateTable(statement) => statement.table,
        }
    }
}

impl fmt::Display for SqlStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlStatement::DropTable(statement) => fmt::Display::fmt(statement, f),
            SqlStatement::Insert(statement) => fmt::Display::fmt(statement, f),
            SqlStatement::Select(statement) => fmt::Display::fmt(statement, f),
            SqlStatement::Delete(statement) => fmt::Display::fmt(statement, f),
            SqlStatement::CreateTable(statement) => fmt::Display::fmt(statement, f),
        }
    }
}

/// DROP TABLE операция
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropTableStatement<'a> {
    pub table: &'a str,
}

impl DropTableStatement<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DropTableStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP TABLE {};", self.table)
    }
}

/// INSERT операция
///
/// Количество колонок и значений парсером не сверяется.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStatement<'a> {
    pub table: &'a str,
    pub columns: Vec<&'a str>,
    pub values: Vec<Value<'a>>,
}

impl InsertStatement<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InsertStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} ( ", self.table)?;
        for column in &self.columns {
            write!(f, "{} ", column)?;
        }
        f.write_str(") VALUES ( ")?;
        for value in &self.values {
            write!(f, "{} ", value)?;
        }
        f.write_str(");")
    }
}

/// SELECT запрос
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement<'a> {
    pub columns: Vec<&'a str>,
    pub table: &'a str,
    pub where_clause: Option<Expression<'a>>,
}

impl SelectStatement<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SelectStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        for column in &self.columns {
            write!(f, "{} ", column)?;
        }
        write!(f, "FROM {}", self.table)?;
        if let Some(expression) = &self.where_clause {
            write!(f, " WHERE {}", expression)?;
        }
        f.write_str(";")
    }
}

/// DELETE операция
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteStatement<'a> {
    pub table: &'a str,
    pub where_clause: Option<Expression<'a>>,
}

impl DeleteStatement<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeleteStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(expression) = &self.where_clause {
            write!(f, " WHERE {}", expression)?;
        }
        f.write_str(";")
    }
}

/// CREATE TABLE операция
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTableStatement<'a> {
    pub table: &'a str,
    pub columns: Vec<ColumnDefinition<'a>>,
}

impl CreateTableStatement<'_> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CreateTableStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE {} ( ", self.table)?;
        for column in &self.columns {
            write!(f, "{} ", column)?;
        }
        f.write_str(");")
    }
}

/// Определение колонки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition<'a> {
    pub name: &'a str,
    pub data_type: DataType,
}

impl fmt::Display for ColumnDefinition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

/// Типы данных колонок
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    Int,
    Real,
    Text,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Int => "INT",
            DataType::Real => "REAL",
            DataType::Text => "TEXT",
        }
    }

    /// Тип колонки по ключевому слову
    pub fn from_token_type(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Int => Some(DataType::Int),
            TokenType::Real => Some(DataType::Real),
            TokenType::Text => Some(DataType::Text),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Литеральное значение
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value<'a> {
    Integer(i32),
    Real(f32),
    /// Строка вместе с окружающими кавычками
    Text(&'a str),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{:.6}", value),
            Value::Text(value) => f.write_str(value),
        }
    }
}

/// Вид операнда в условии WHERE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperandKind {
    Int,
    Real,
    Text,
    Id,
}

/// Операнд сравнения
///
/// Идентификатор и строка хранятся одинаково, но различаются по смыслу:
/// строка включает кавычки, идентификатор ссылается на колонку.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Operand<'a> {
    Integer(i32),
    Real(f32),
    Text(&'a str),
    Identifier(&'a str),
}

impl<'a> Operand<'a> {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Integer(_) => OperandKind::Int,
            Operand::Real(_) => OperandKind::Real,
            Operand::Text(_) => OperandKind::Text,
            Operand::Identifier(_) => OperandKind::Id,
        }
    }

    /// Значение операнда; идентификатор представлен своим текстом
    pub fn value(&self) -> Value<'a> {
        match *self {
            Operand::Integer(value) => Value::Integer(value),
            Operand::Real(value) => Value::Real(value),
            Operand::Text(text) | Operand::Identifier(text) => Value::Text(text),
        }
    }
}

impl<'a> From<Value<'a>> for Operand<'a> {
    fn from(value: Value<'a>) -> Self {
        match value {
            Value::Integer(value) => Operand::Integer(value),
            Value::Real(value) => Operand::Real(value),
            Value::Text(text) => Operand::Text(text),
        }
    }
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}

/// Оператор сравнения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOperator {
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl ComparisonOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::Less => "<",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
        }
    }

    pub fn from_token_type(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Less => Some(ComparisonOperator::Less),
            TokenType::Greater => Some(ComparisonOperator::Greater),
            TokenType::LessEqual => Some(ComparisonOperator::LessEqual),
            TokenType::GreaterEqual => Some(ComparisonOperator::GreaterEqual),
            TokenType::Equal => Some(ComparisonOperator::Equal),
            TokenType::NotEqual => Some(ComparisonOperator::NotEqual),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Условие WHERE: ровно одно бинарное сравнение
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Expression<'a> {
    pub left: Operand<'a>,
    pub operator: ComparisonOperator,
    pub right: Operand<'a>,
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// Скрипт: выражения в порядке следования в исходном тексте
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Script<'a> {
    statements: Vec<SqlStatement<'a>>,
}

impl<'a> Script<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: SqlStatement<'a>) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[SqlStatement<'a>] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SqlStatement<'a>> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for Script<'a> {
    type Item = SqlStatement<'a>;
    type IntoIter = std::vec::IntoIter<SqlStatement<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s Script<'a> {
    type Item = &'s SqlStatement<'a>;
    type IntoIter = std::slice::Iter<'s, SqlStatement<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl fmt::Display for Script<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// Результат разбора скрипта: выражения и диагностики в порядке появления
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult<'a> {
    pub script: Script<'a>,
    pub errors: Vec<String>,
}

impl<'a> ParseResult<'a> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Превращает результат в ошибку, если была хотя бы одна диагностика
    pub fn into_result(self) -> Result<Script<'a>> {
        if self.errors.is_empty() {
            Ok(self.script)
        } else {
            Err(Error::sql_parsing(self.errors.join("; ")))
        }
    }
}

impl fmt::Display for ParseResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.script, f)?;
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}
