//! Тесты SQL парсера
