//! Интеграционные тесты для rdb-sql
//!
//! Проверяют лексер и парсер только через публичный API библиотеки.

use pretty_assertions::assert_eq;
use rdb_sql::parser::{Operand, SqlStatement};
use rdb_sql::{parse_sql, Error, Lexer, SqlParser, TokenType};

fn token_kinds(input: &str) -> Vec<(TokenType, &str)> {
    Lexer::new(input)
        .tokenize()
        .into_iter()
        .map(|token| (token.token_type, token.text))
        .collect()
}

#[test]
fn test_leading_zero_splits_integer() {
    assert_eq!(
        token_kinds("01"),
        vec![
            (TokenType::IntegerLiteral, "0"),
            (TokenType::IntegerLiteral, "1"),
            (TokenType::Eof, "<EOF>"),
        ]
    );
}

#[test]
fn test_dot_without_fraction_is_unknown() {
    assert_eq!(
        token_kinds("+0."),
        vec![(TokenType::Unknown, "+0."), (TokenType::Eof, "<EOF>")]
    );
}

#[test]
fn test_drop_scenario_stops_at_fatal_error() {
    let result = parse_sql("DROP TABLE Table;DROP Table; DROP;TABLE;");

    assert_eq!(result.script.len(), 1);
    match &result.script.statements()[0] {
        SqlStatement::DropTable(statement) => assert_eq!(statement.table, "Table"),
        other => panic!("Ожидался DROP TABLE, получено {:?}", other),
    }
    assert_eq!(
        result.errors,
        vec![
            "Expected KwTable, got Id",
            "Expected KwTable, got Semicolon",
            "Expected statement type",
        ]
    );
}

#[test]
fn test_select_scenario() {
    let result = parse_sql("SELECT Col1 Col2 Col3 FROM Table WHERE Val <= 5;");
    assert!(!result.has_errors());

    let statement = match &result.script.statements()[0] {
        SqlStatement::Select(statement) => statement,
        other => panic!("Ожидался SELECT, получено {:?}", other),
    };
    assert_eq!(statement.columns, vec!["Col1", "Col2", "Col3"]);
    assert_eq!(statement.table, "Table");

    let condition = statement.where_clause.as_ref().expect("WHERE");
    assert_eq!(condition.left, Operand::Identifier("Val"));
    assert_eq!(condition.operator.as_str(), "<=");
    assert_eq!(condition.right, Operand::Integer(5));
    assert_eq!(condition.to_string(), "Val <= 5");
}

#[test]
fn test_insert_scenario_rendering() {
    let result = parse_sql("INSERT INTO Table (Col1,Col2,Col3) VALUES (123, 4.56, \"7B9\");");
    assert!(!result.has_errors());
    assert_eq!(
        result.script.statements()[0].render(),
        "INSERT INTO Table ( Col1 Col2 Col3 ) VALUES ( 123 4.560000 \"7B9\" );"
    );
}

#[test]
fn test_empty_input() {
    let result = parse_sql("");
    assert!(result.script.is_empty());
    assert!(result.errors.is_empty());

    let result = parse_sql(" \n\t ");
    assert!(result.script.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn test_mixed_script_dump() {
    let input = "CREATE TABLE Users (Id INT, Name TEXT, Score REAL);\n\
                 INSERT INTO Users (Id, Name) VALUES (1, \"Bob\");\n\
                 INSERT INTO Users (Id) VALUES (Bob);\n\
                 SELECT Id Name FROM Users WHERE Score >= 2.5;\n\
                 DELETE FROM Users WHERE Id != 1;\n\
                 DROP TABLE Users;\n";
    let expected = "CREATE TABLE Users ( Id INT Name TEXT Score REAL );\n\
                    INSERT INTO Users ( Id Name ) VALUES ( 1 \"Bob\" );\n\
                    SELECT Id Name FROM Users WHERE Score >= 2.500000;\n\
                    DELETE FROM Users WHERE Id != 1;\n\
                    DROP TABLE Users;\n\
                    Expected Int, Real or String\n";
    assert_eq!(parse_sql(input).to_string(), expected);
}

#[test]
fn test_parser_over_custom_lexer() {
    let mut lexer = Lexer::new("DELETE FROM Logs;");
    assert_eq!(lexer.peek().token_type, TokenType::Delete);

    let result = SqlParser::new(lexer).parse_script();
    assert_eq!(result.script.to_string(), "DELETE FROM Logs;\n");
}

#[test]
fn test_into_result() {
    let script = parse_sql("DROP TABLE A; DROP TABLE B;").into_result().unwrap();
    assert_eq!(script.len(), 2);

    let error = parse_sql("DROP A; SELECT;").into_result().unwrap_err();
    match error {
        Error::SqlParsing { message } => {
            assert_eq!(message, "Expected KwTable, got Id; Expected Id, got Semicolon")
        }
        other => panic!("Ожидалась ошибка разбора, получено {:?}", other),
    }
}

#[test]
fn test_independent_parsers_in_parallel() {
    let sources: Vec<String> = (0..8)
        .map(|index| format!("SELECT C{0} FROM T{0}; DROP T{0};", index))
        .collect();

    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| {
            std::thread::spawn(move || {
                let result = parse_sql(&source);
                (result.script.to_string(), result.errors)
            })
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let (rendered, errors) = handle.join().unwrap();
        assert_eq!(rendered, format!("SELECT C{0} FROM T{0};\n", index));
        assert_eq!(errors, vec!["Expected KwTable, got Id"]);
    }
}
