//! Общие типы и утилиты для rdb-sql

pub mod config;
pub mod error;

pub use config::*;
pub use error::{Error, Result, SyntaxError};
