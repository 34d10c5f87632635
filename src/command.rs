//! Разбор строки ввода в команду калькулятора.
//!
//! Строка — это либо число (ввод значения), либо ключевое слово операции с
//! необязательным числовым аргументом через пробел.
//!
//! # Пример
//!
//! ```
//! use memcalc::command::{parse_input, Input};
//! use memcalc::engine::Operation;
//! use memcalc::number::DecimalSeparator;
//!
//! let input = parse_input("+ 7,5", DecimalSeparator::Dot).unwrap();
//! assert_eq!(input, Input::Command { operation: Operation::Add, argument: Some(7.5) });
//!
//! let input = parse_input("-4", DecimalSeparator::Dot).unwrap();
//! assert_eq!(input, Input::Value(-4.0));
//! ```

use crate::engine::Operation;
use crate::number::{parse_number, DecimalSeparator};
use crate::CalcError;

/// Разобранная строка ввода.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Строка целиком оказалась числом.
    Value(f64),
    /// Операция с необязательным аргументом.
    Command {
        /// Операция.
        operation: Operation,
        /// Аргумент, если он был указан.
        argument: Option<f64>,
    },
}

/// Разбирает непустую строку без окружающих пробелов.
///
/// Сначала вся строка пробуется как число: ввод значения имеет приоритет
/// над операциями, поэтому `-5` — это число, а `- 5` — вычитание.
///
/// # Ошибки
///
/// - [`CalcError::InvalidArgument`], если аргумент не является числом.
///   Проверяется до поиска ключевого слова.
/// - [`CalcError::UnknownCommand`] для неизвестного ключевого слова.
pub fn parse_input(line: &str, separator: DecimalSeparator) -> Result<Input, CalcError> {
    if let Ok(value) = parse_number(line, separator) {
        return Ok(Input::Value(value));
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_lowercase();
    let rest = words.collect::<Vec<_>>().join(" ");

    let argument = if rest.is_empty() {
        None
    } else {
        Some(parse_number(&rest, separator).map_err(CalcError::InvalidArgument)?)
    };

    let operation =
        Operation::from_keyword(&keyword).ok_or(CalcError::UnknownCommand(keyword))?;

    if argument.is_some() && !operation.takes_argument() {
        log::debug!("аргумент '{rest}' для '{operation}' игнорируется");
    }

    Ok(Input::Command {
        operation,
        argument,
    })
}
