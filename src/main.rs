//! Главный исполняемый файл rdb-sql

use rdb_sql::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::init();

    match cli.execute() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("rdb-sql: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
