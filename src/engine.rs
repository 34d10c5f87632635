//! Арифметика над двумя регистрами: текущим значением и памятью.
//!
//! Каждая операция принимает состояние и необязательный аргумент и
//! возвращает новое состояние либо ошибку. При ошибке исходное состояние
//! остаётся нетронутым.
//!
//! # Примеры
//!
//! ```
//! use memcalc::engine::{Operation, State};
//!
//! let state = State::default().enter(12.5);
//! let state = Operation::Add.apply(state, Some(7.5)).unwrap();
//! assert_eq!(state.current, 20.0);
//!
//! let state = Operation::MemoryAdd.apply(state, None).unwrap();
//! assert_eq!(state.memory, 20.0);
//! ```

use std::fmt;

use thiserror::Error;

/// Ошибки при выполнении операции.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// Операции нужен числовой аргумент, а он не передан.
    #[error("для операции '{0}' требуется аргумент (число)")]
    MissingArgument(Operation),
    /// Деление, остаток или обращение с нулевым делителем.
    #[error("{}", zero_divisor_message(.0))]
    DivisionByZero(Operation),
    /// Квадратный корень из отрицательного числа.
    #[error("корень из отрицательного числа не определён в R")]
    NegativeRoot,
    /// Результат не помещается в `f64`.
    #[error("переполнение при вычислении (слишком большое число)")]
    Overflow,
}

fn zero_divisor_message(operation: &Operation) -> &'static str {
    match *operation {
        Operation::Modulo => "остаток по модулю на 0 невозможен",
        Operation::Reciprocal => "1/0 невозможно",
        _ => "деление на ноль",
    }
}

/// Регистры калькулятора.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    /// Текущее значение.
    pub current: f64,
    /// Память.
    pub memory: f64,
}

impl State {
    /// Ввод числа: заменяет текущее значение, память не меняется.
    #[must_use]
    pub const fn enter(self, value: f64) -> Self {
        Self {
            current: value,
            ..self
        }
    }

    const fn with_current(self, current: f64) -> Self {
        Self { current, ..self }
    }

    const fn with_memory(self, memory: f64) -> Self {
        Self { memory, ..self }
    }
}

/// Операции калькулятора.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `+ n`
    Add,
    /// `- n`
    Subtract,
    /// `* n`
    Multiply,
    /// `/ n`
    Divide,
    /// `% n`, остаток со знаком делимого.
    Modulo,
    /// `inv`, 1/x.
    Reciprocal,
    /// `sq`, x².
    Square,
    /// `sqrt`, √x.
    SquareRoot,
    /// `M+`
    MemoryAdd,
    /// `M-`
    MemorySubtract,
    /// `MR`
    MemoryRecall,
    /// `C`
    Clear,
    /// `AC`
    ClearAll,
}

impl Operation {
    /// Все операции в порядке справки.
    pub const ALL: [Self; 13] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Reciprocal,
        Self::Square,
        Self::SquareRoot,
        Self::MemoryAdd,
        Self::MemorySubtract,
        Self::MemoryRecall,
        Self::Clear,
        Self::ClearAll,
    ];

    /// Ищет операцию по ключевому слову (уже в нижнем регистре).
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let operation = match keyword {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" | "x" => Self::Multiply,
            "/" | "÷" => Self::Divide,
            "%" => Self::Modulo,
            "inv" | "1/x" => Self::Reciprocal,
            "sq" | "x^2" => Self::Square,
            "sqrt" | "√" => Self::SquareRoot,
            "m+" | "mplus" => Self::MemoryAdd,
            "m-" | "mminus" => Self::MemorySubtract,
            "mr" | "memory" => Self::MemoryRecall,
            "c" => Self::Clear,
            "ac" => Self::ClearAll,
            _ => return None,
        };
        Some(operation)
    }

    /// Основное ключевое слово операции.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Reciprocal => "inv",
            Self::Square => "sq",
            Self::SquareRoot => "sqrt",
            Self::MemoryAdd => "M+",
            Self::MemorySubtract => "M-",
            Self::MemoryRecall => "MR",
            Self::Clear => "C",
            Self::ClearAll => "AC",
        }
    }

    /// Нужен ли операции числовой аргумент.
    #[must_use]
    pub const fn takes_argument(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo
        )
    }

    /// Применить операцию к состоянию.
    ///
    /// Аргумент операций без аргумента игнорируется.
    ///
    /// # Ошибки
    ///
    /// - [`EvalError::MissingArgument`], если аргумент нужен, но не передан.
    /// - [`EvalError::DivisionByZero`] при делении, остатке или обращении нуля.
    /// - [`EvalError::NegativeRoot`] для корня из отрицательного числа.
    /// - [`EvalError::Overflow`], если результат не конечен.
    pub fn apply(self, state: State, argument: Option<f64>) -> Result<State, EvalError> {
        let State { current, memory } = state;
        let argument = || argument.ok_or(EvalError::MissingArgument(self));

        match self {
            Self::Add => checked(current + argument()?).map(|v| state.with_current(v)),
            Self::Subtract => checked(current - argument()?).map(|v| state.with_current(v)),
            Self::Multiply => checked(current * argument()?).map(|v| state.with_current(v)),
            Self::Divide => {
                let divisor = non_zero(self, argument()?)?;
                checked(current / divisor).map(|v| state.with_current(v))
            }
            // `%` для f64 это fmod: знак результата совпадает со знаком делимого.
            Self::Modulo => {
                let divisor = non_zero(self, argument()?)?;
                Ok(state.with_current(current % divisor))
            }
            Self::Reciprocal => {
                let divisor = non_zero(self, current)?;
                checked(1.0 / divisor).map(|v| state.with_current(v))
            }
            Self::Square => checked(current * current).map(|v| state.with_current(v)),
            Self::SquareRoot => {
                if current < 0.0 {
                    return Err(EvalError::NegativeRoot);
                }
                Ok(state.with_current(current.sqrt()))
            }
            Self::MemoryAdd => checked(memory + current).map(|v| state.with_memory(v)),
            Self::MemorySubtract => checked(memory - current).map(|v| state.with_memory(v)),
            Self::MemoryRecall => Ok(state.with_current(memory)),
            Self::Clear => Ok(state.with_current(0.0)),
            Self::ClearAll => Ok(State::default()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

fn non_zero(operation: Operation, divisor: f64) -> Result<f64, EvalError> {
    if divisor == 0.0 {
        Err(EvalError::DivisionByZero(operation))
    } else {
        Ok(divisor)
    }
}

fn checked(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow)
    }
}
