//! # memcalc
//!
//! Интерактивный консольный калькулятор с текущим значением и ячейкой памяти.
//!
//! Каждая строка ввода — либо число, которое становится текущим значением,
//! либо одна операция с необязательным аргументом:
//! - `+ n`, `- n`, `* n` (`x`), `/ n` (`÷`), `% n`
//! - `inv` (`1/x`), `sq` (`x^2`), `sqrt` (`√`)
//! - `M+`, `M-`, `MR`, `C`, `AC`
//!
//! Числа принимаются с запятой и с точкой: `12,5` и `12.5` равнозначны.
//!
//! # Пример использования
//!
//! ```
//! use memcalc::{Config, Session};
//!
//! let mut session = Session::new(Vec::new(), Config::default());
//! session.execute("12,5").unwrap();
//! session.execute("+ 7.5").unwrap();
//! assert_eq!(session.state().current, 20.0);
//!
//! assert!(session.execute("/ 0").is_err());
//! assert_eq!(session.state().current, 20.0);
//! ```

pub mod command;
pub mod config;
pub mod engine;
pub mod number;
pub mod session;

use std::io;

use thiserror::Error;

pub use config::{Args, Config};
pub use engine::{EvalError, Operation, State};
pub use session::Session;

/// Общий тип ошибки калькулятора.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Аргумент команды не является числом.
    #[error("не удалось разобрать число аргумента: {0}")]
    InvalidArgument(number::ParseNumberError),

    /// Неизвестное ключевое слово.
    #[error("Неизвестная команда '{0}'. Введите 'help' для справки.")]
    UnknownCommand(String),

    /// Ошибка вычисления (деление на ноль, корень, переполнение, нет аргумента).
    #[error("{0}")]
    Eval(#[from] EvalError),
}

/// Запускает интерактивный калькулятор на stdin/stdout.
///
/// Для выхода введите `exit`, `quit` или нажмите Ctrl+D.
///
/// # Ошибки
///
/// Возвращает [`io::Error`] при ошибках чтения/записи.
pub fn run(config: Config) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new(stdout.lock(), config);
    session.run(stdin.lock())
}
