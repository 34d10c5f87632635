//! Разбор и форматирование чисел.
//!
//! Числа принимаются как с запятой, так и с точкой в качестве десятичного
//! разделителя. Разбор идёт в три этапа: сначала по правилам текущей локали,
//! затем с точкой, затем с заменой всех запятых на точки.
//!
//! # Пример
//!
//! ```
//! use memcalc::number::{parse_number, format_number, DecimalSeparator};
//!
//! let value = parse_number("12,5", DecimalSeparator::Dot).unwrap();
//! assert_eq!(value, 12.5);
//! assert_eq!(format_number(value, DecimalSeparator::Comma), "12,5");
//! ```

use thiserror::Error;

/// Число значащих цифр при выводе.
pub const SIGNIFICANT_DIGITS: usize = 10;

/// Десятичный разделитель локали.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalSeparator {
    /// `12.5`
    #[default]
    Dot,
    /// `12,5`
    Comma,
}

impl DecimalSeparator {
    /// Символ разделителя.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }
}

/// Ошибка разбора числа.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    /// Пустая строка.
    #[error("пустой ввод")]
    Empty,
    /// Строка не является числом.
    #[error("'{0}' не является числом")]
    Invalid(String),
    /// Литерал не помещается в конечное значение (`inf`, `NaN`, `1e400`).
    #[error("'{0}' вне допустимого диапазона")]
    NotFinite(String),
}

/// Разбирает число, допуская запятую и точку в качестве разделителя.
///
/// # Ошибки
///
/// Возвращает [`ParseNumberError`], если ни один из способов разбора не
/// подошёл или результат не является конечным числом.
///
/// # Примеры
///
/// ```
/// use memcalc::number::{parse_number, DecimalSeparator};
///
/// assert_eq!(parse_number("2.5e3", DecimalSeparator::Dot), Ok(2500.0));
/// assert_eq!(parse_number(" -0,5 ", DecimalSeparator::Comma), Ok(-0.5));
/// assert!(parse_number("abc", DecimalSeparator::Dot).is_err());
/// ```
pub fn parse_number(text: &str, separator: DecimalSeparator) -> Result<f64, ParseNumberError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseNumberError::Empty);
    }

    let value = parse_localized(text, separator)
        .or_else(|| parse_invariant(text))
        .or_else(|| parse_invariant(&text.replace(',', ".")))
        .ok_or_else(|| ParseNumberError::Invalid(text.to_owned()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseNumberError::NotFinite(text.to_owned()))
    }
}

fn parse_localized(text: &str, separator: DecimalSeparator) -> Option<f64> {
    match separator {
        DecimalSeparator::Dot => parse_invariant(text),
        DecimalSeparator::Comma => {
            if text.contains('.') {
                return None;
            }
            let value = parse_invariant(&text.replace(separator.as_char(), "."));
            log::trace!("разбор по локали '{text}': {value:?}");
            value
        }
    }
}

fn parse_invariant(text: &str) -> Option<f64> {
    // Только цифры, знак, точка и экспонента: `f64::from_str` знает ещё
    // `inf` и `nan`, которые калькулятору не нужны.
    let is_plain = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_plain || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Форматирует число компактно: до [`SIGNIFICANT_DIGITS`] значащих цифр,
/// без лишних нулей.
///
/// Экспоненциальная запись (`1.5E+12`) используется, если десятичный
/// порядок меньше -4 или не меньше числа значащих цифр.
///
/// # Примеры
///
/// ```
/// use memcalc::number::{format_number, DecimalSeparator};
///
/// assert_eq!(format_number(20.0, DecimalSeparator::Dot), "20");
/// assert_eq!(format_number(1.0 / 3.0, DecimalSeparator::Dot), "0.3333333333");
/// assert_eq!(format_number(1e15, DecimalSeparator::Dot), "1E+15");
/// ```
#[must_use]
pub fn format_number(value: f64, separator: DecimalSeparator) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Порядок берём после округления до нужного числа цифр:
    // 9999999999.7 превращается в 1.000000000e10.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();

    let text = if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}E{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    };

    match separator {
        DecimalSeparator::Dot => text,
        DecimalSeparator::Comma => text.replace('.', ","),
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use DecimalSeparator::{Comma, Dot};

    // ─────────────────────────────────────────────────────────────────────────
    // Разбор
    // ─────────────────────────────────────────────────────────────────────────

    macro_rules! parse_tests {
        ($($name:ident: $input:expr, $sep:expr => $expected:expr),* $(,)?) => {
            $(
                #[test]
                fn $name() {
                    let result = parse_number($input, $sep).unwrap_or_else(|e| {
                        panic!("ошибка разбора для '{}': {:?}", $input, e)
                    });
                    assert_eq!(result, $expected, "ввод: '{}'", $input);
                }
            )*
        };
    }

    parse_tests! {
        parse_integer: "42", Dot => 42.0,
        parse_negative: "-4", Dot => -4.0,
        parse_plus_sign: "+3", Dot => 3.0,
        parse_dot_in_dot_locale: "12.5", Dot => 12.5,
        parse_comma_in_dot_locale: "12,5", Dot => 12.5,
        parse_comma_in_comma_locale: "12,5", Comma => 12.5,
        parse_dot_in_comma_locale: "12.5", Comma => 12.5,
        parse_exponent: "2.5e3", Dot => 2500.0,
        parse_exponent_upper: "1E-3", Dot => 0.001,
        parse_exponent_with_comma: "1,5e2", Comma => 150.0,
        parse_leading_point: ".5", Dot => 0.5,
        parse_trailing_point: "5.", Dot => 5.0,
        parse_surrounding_whitespace: "  7  ", Dot => 7.0,
    }

    #[test]
    fn comma_and_dot_forms_agree() {
        for sep in [Dot, Comma] {
            for text in ["0,1", "12,5", "-3,75", "1000,001", "6,02e23", "9,999999999"] {
                let normalized = text.replace(',', ".");
                assert_eq!(
                    parse_number(text, sep),
                    parse_number(&normalized, sep),
                    "ввод: '{text}', разделитель: {sep:?}"
                );
            }
        }
    }

    #[test]
    fn error_empty() {
        assert_eq!(parse_number("", Dot), Err(ParseNumberError::Empty));
        assert_eq!(parse_number("   ", Comma), Err(ParseNumberError::Empty));
    }

    #[test]
    fn error_not_a_number() {
        for text in ["abc", "1 5", "1,234.5", "--1", "e5", "1.2.3", "+", "x^2"] {
            assert!(
                matches!(parse_number(text, Dot), Err(ParseNumberError::Invalid(_))),
                "ввод: '{text}'"
            );
        }
    }

    #[test]
    fn error_special_values_rejected() {
        for text in ["inf", "-infinity", "NaN"] {
            assert!(parse_number(text, Dot).is_err(), "ввод: '{text}'");
        }
    }

    #[test]
    fn error_out_of_range() {
        assert_eq!(
            parse_number("1e400", Dot),
            Err(ParseNumberError::NotFinite("1e400".to_owned()))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Форматирование
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn format_integers() {
        assert_eq!(format_number(0.0, Dot), "0");
        assert_eq!(format_number(-0.0, Dot), "0");
        assert_eq!(format_number(20.0, Dot), "20");
        assert_eq!(format_number(-4.0, Dot), "-4");
        assert_eq!(format_number(1_234_567_890.0, Dot), "1234567890");
    }

    #[test]
    fn format_fractions() {
        assert_eq!(format_number(12.5, Dot), "12.5");
        assert_eq!(format_number(0.1 + 0.2, Dot), "0.3");
        assert_eq!(format_number(2.0 / 3.0, Dot), "0.6666666667");
        assert_eq!(format_number(0.0001, Dot), "0.0001");
        assert_eq!(format_number(0.00001, Dot), "1E-05");
    }

    #[test]
    fn format_exponent() {
        assert_eq!(format_number(1e10, Dot), "1E+10");
        assert_eq!(format_number(-1.5e300, Dot), "-1.5E+300");
        assert_eq!(format_number(1.25e-7, Dot), "1.25E-07");
        assert_eq!(format_number(9_999_999_999.7, Dot), "1E+10");
    }

    #[test]
    fn format_with_comma() {
        assert_eq!(format_number(12.5, Comma), "12,5");
        assert_eq!(format_number(2.5e-9, Comma), "2,5E-09");
        assert_eq!(format_number(7.0, Comma), "7");
    }
}
