//! CLI интерфейс для rdb-sql
//!
//! Разбирает SQL скрипты из файлов, аргумента командной строки или stdin
//! и печатает канонический SQL, диагностики или поток токенов.

use crate::common::{FrontendConfig, OutputFormat};
use crate::parser::{Lexer, ParseResult, Script, SqlParser};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// rdb-sql - SQL фронтенд реляционной базы данных
#[derive(Parser, Debug)]
#[command(name = "rdb-sql")]
#[command(about = "rdb-sql - tokenizer and error-recovering parser for a small SQL dialect")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Повысить детализацию логов (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Разобрать SQL скрипты и вывести канонический SQL
    Parse {
        /// Файлы со скриптами (по умолчанию stdin)
        files: Vec<PathBuf>,

        /// SQL текст прямо из командной строки
        #[arg(short = 'e', long = "execute", value_name = "SQL", conflicts_with = "files")]
        sql: Option<String>,

        /// Формат вывода (text, json)
        #[arg(long, value_name = "FORMAT")]
        format: Option<OutputFormat>,

        /// Код возврата 1 при наличии диагностик
        #[arg(long)]
        strict: bool,
    },

    /// Вывести поток токенов
    Tokens {
        /// Файл со скриптом (по умолчанию stdin)
        file: Option<PathBuf>,

        /// SQL текст прямо из командной строки
        #[arg(short = 'e', long = "execute", value_name = "SQL", conflicts_with = "file")]
        sql: Option<String>,

        /// Показывать позиции токенов
        #[arg(long)]
        positions: bool,
    },

    /// Показать информацию о поддерживаемом диалекте
    Info,
}

/// Исходный текст с именем для диагностик
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Читает источники: текст аргумента, файлы или stdin
    pub fn collect(files: &[PathBuf], sql: Option<&str>) -> Result<Vec<Self>> {
        if let Some(sql) = sql {
            return Ok(vec![Self::new("<command-line>", sql)]);
        }

        if files.is_empty() {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read SQL from stdin")?;
            return Ok(vec![Self::new("<stdin>", text)]);
        }

        files
            .iter()
            .map(|path| {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok(Self::new(path.display().to_string(), text))
            })
            .collect()
    }
}

/// JSON отчет по одному источнику
#[derive(Serialize)]
struct SourceReport<'r, 'a> {
    source: &'r str,
    statements: Vec<String>,
    ast: &'r Script<'a>,
    errors: &'r [String],
}

impl Cli {
    /// Разбирает аргументы командной строки
    pub fn init() -> Self {
        Self::parse()
    }

    /// Загружает конфигурацию с учетом окружения и аргументов
    pub fn load_config(&self) -> Result<FrontendConfig> {
        let mut config = FrontendConfig::load(self.config.as_deref())
            .context("failed to load configuration")?
            .apply_env()
            .context("invalid environment configuration")?;

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        match &self.command {
            Some(Commands::Parse { format, strict, .. }) => {
                if let Some(format) = format {
                    config.output.format = *format;
                }
                config.strict |= *strict;
            }
            Some(Commands::Tokens { positions, .. }) => {
                config.output.show_positions |= *positions;
            }
            _ => {}
        }

        Ok(config)
    }

    /// Выполняет команду
    pub fn execute(&self) -> Result<ExitCode> {
        let config = self.load_config()?;
        init_tracing(&config, self.verbose);
        debug!(?config, "configuration loaded");

        // Без lock(): рабочие потоки rayon пишут логи в тот же stderr
        let mut out = io::stdout();
        let mut err = io::stderr();

        match &self.command {
            Some(Commands::Parse { files, sql, .. }) => {
                let sources = Source::collect(files, sql.as_deref())?;
                let clean = run_parse(&sources, &config, &mut out, &mut err)?;
                if config.strict && !clean {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Some(Commands::Tokens { file, sql, .. }) => {
                let files: Vec<PathBuf> = file.iter().cloned().collect();
                let sources = Source::collect(&files, sql.as_deref())?;
                for source in &sources {
                    run_tokens(source, &config, &mut out)?;
                }
            }
            Some(Commands::Info) => show_info(&mut out)?,
            None => {
                writeln!(out, "rdb-sql v{}", crate::VERSION)?;
                writeln!(out, "Use --help for usage")?;
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

/// Разбирает источники параллельно и печатает результат
///
/// Возвращает `true`, если ни в одном источнике не было диагностик.
pub fn run_parse(
    sources: &[Source],
    config: &FrontendConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    // У каждого источника свой лексер и парсер, общего состояния нет
    let results: Vec<ParseResult<'_>> = sources
        .par_iter()
        .map(|source| SqlParser::from_sql(&source.text).parse_script())
        .collect();

    let mut clean = true;
    for (source, result) in sources.iter().zip(&results) {
        info!(
            source = %source.name,
            statements = result.script.len(),
            errors = result.errors.len(),
            "source parsed"
        );
        clean &= !result.has_errors();

        match config.output.format {
            OutputFormat::Text => {
                write!(out, "{}", result.script)?;
                for error in &result.errors {
                    writeln!(err, "{}: {}", source.name, error)?;
                }
            }
            OutputFormat::Json => {
                let report = SourceReport {
                    source: &source.name,
                    statements: result.script.iter().map(|s| s.render()).collect(),
                    ast: &result.script,
                    errors: &result.errors,
                };
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            }
        }
    }

    Ok(clean)
}

/// Печатает поток токенов источника
pub fn run_tokens(source: &Source, config: &FrontendConfig, out: &mut impl Write) -> Result<()> {
    for token in Lexer::new(&source.text).tokenize() {
        if config.output.show_positions {
            writeln!(out, "{}", token)?;
        } else {
            writeln!(out, "{} '{}'", token.token_type, token.text)?;
        }
    }
    Ok(())
}

/// Печатает сведения о поддерживаемом диалекте
pub fn show_info(out: &mut impl Write) -> Result<()> {
    writeln!(out, "rdb-sql v{}", crate::VERSION)?;
    writeln!(out, "Supported statements:")?;
    writeln!(out, "  DROP TABLE id;")?;
    writeln!(out, "  INSERT INTO id ( id, ... ) VALUES ( value, ... );")?;
    writeln!(out, "  SELECT id ... FROM id [WHERE operand op operand];")?;
    writeln!(out, "  DELETE FROM id [WHERE operand op operand];")?;
    writeln!(out, "  CREATE TABLE id ( id INT|REAL|TEXT, ... );")?;
    Ok(())
}

/// Директива фильтра логов с учетом флагов -v
fn log_directive(level: &str, verbose: u8) -> String {
    match verbose {
        0 => level.to_string(),
        1 => "rdb_sql=debug".to_string(),
        _ => "rdb_sql=trace".to_string(),
    }
}

/// Устанавливает подписчика tracing, пишущего в stderr
///
/// `RUST_LOG` имеет приоритет над конфигурацией.
fn init_tracing(config: &FrontendConfig, verbose: u8) {
    let directive = log_directive(&config.logging.level, verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_ansi(config.logging.ansi)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sources: &[Source], config: &FrontendConfig) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let clean = run_parse(sources, config, &mut out, &mut err).unwrap();
        (
            clean,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from([
            "rdb-sql", "-vv", "parse", "-e", "DROP TABLE A;", "--format", "json", "--strict",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Parse {
                sql,
                format,
                strict,
                files,
            }) => {
                assert_eq!(sql.as_deref(), Some("DROP TABLE A;"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(strict);
                assert!(files.is_empty());
            }
            other => panic!("Ожидалась команда parse, получено {:?}", other),
        }

        assert!(Cli::try_parse_from(["rdb-sql", "parse", "--format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["rdb-sql", "parse", "a.sql", "-e", "x"]).is_err());
    }

    #[test]
    fn test_run_parse_text() {
        let sources = vec![
            Source::new("first.sql", "DROP TABLE A; DROP A;"),
            Source::new("second.sql", "SELECT X Y FROM T WHERE X > 1.5;"),
        ];
        let (clean, out, err) = run(&sources, &FrontendConfig::default());

        assert!(!clean);
        assert_eq!(
            out,
            "DROP TABLE A;\nSELECT X Y FROM T WHERE X > 1.500000;\n"
        );
        assert_eq!(err, "first.sql: Expected KwTable, got Id\n");
    }

    #[test]
    fn test_run_parse_json() {
        let mut config = FrontendConfig::default();
        config.output.format = OutputFormat::Json;
        let sources = vec![Source::new("q.sql", "DELETE FROM T; FOO;")];
        let (clean, out, err) = run(&sources, &config);

        assert!(!clean);
        assert!(err.is_empty());
        let report: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(report["source"], "q.sql");
        assert_eq!(report["statements"][0], "DELETE FROM T;");
        assert_eq!(report["errors"][0], "Expected statement type");
        assert_eq!(report["ast"]["statements"][0]["Delete"]["table"], "T");
    }

    #[test]
    fn test_run_tokens() {
        let source = Source::new("<test>", "DROP x");
        let mut config = FrontendConfig::default();

        let mut out = Vec::new();
        run_tokens(&source, &config, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "KwDrop 'DROP'\nId 'x'\nEof '<EOF>'\n"
        );

        config.output.show_positions = true;
        let mut out = Vec::new();
        run_tokens(&source, &config, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "KwDrop 'DROP' Loc=0:0\nId 'x' Loc=5:0\nEof '<EOF>' Loc=6:0\n"
        );
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive("warn", 0), "warn");
        assert_eq!(log_directive("warn", 1), "rdb_sql=debug");
        assert_eq!(log_directive("info", 3), "rdb_sql=trace");
    }

    #[test]
    fn test_source_from_command_line() {
        let sources = Source::collect(&[], Some("DROP TABLE A;")).unwrap();
        assert_eq!(sources, vec![Source::new("<command-line>", "DROP TABLE A;")]);
    }
}
