//! Параметры командной строки и настройки сеанса.

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use crate::number::DecimalSeparator;

/// Языки, в которых десятичный разделитель — запятая.
const COMMA_LANGUAGES: &[&str] = &[
    "ru", "uk", "be", "kk", "bg", "sr", "hr", "sl", "mk", "de", "fr", "es", "it", "pt", "pl",
    "cs", "sk", "hu", "ro", "nl", "sv", "fi", "da", "nb", "nn", "no", "is", "et", "lv", "lt",
    "tr", "el", "id", "vi", "az", "ka", "hy",
];

/// Переменные окружения локали в порядке приоритета.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// Интерактивный калькулятор с текущим значением и ячейкой памяти.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Десятичный разделитель для ввода и вывода.
    #[arg(long, value_enum, default_value_t = SeparatorArg::Auto)]
    pub separator: SeparatorArg,

    /// Не печатать приветствие и начальное состояние.
    #[arg(short, long)]
    pub quiet: bool,

    /// Строка приглашения.
    #[arg(long, default_value = "> ")]
    pub prompt: String,

    /// Подробность журнала в stderr (-v, -vv, -vvv, -vvvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Значение флага `--separator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeparatorArg {
    /// Определить по LC_ALL / LC_NUMERIC / LANG.
    Auto,
    /// Запятая: `12,5`.
    Comma,
    /// Точка: `12.5`.
    Dot,
}

impl Args {
    /// Уровень журнала, заданный флагами `-v`. `None` — решает `RUST_LOG`.
    #[must_use]
    pub const fn log_level(&self) -> Option<LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(LevelFilter::Warn),
            2 => Some(LevelFilter::Info),
            3 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }

    /// Собирает настройки сеанса, читая локаль из окружения.
    #[must_use]
    pub fn into_config(self) -> Config {
        let separator = match self.separator {
            SeparatorArg::Comma => DecimalSeparator::Comma,
            SeparatorArg::Dot => DecimalSeparator::Dot,
            SeparatorArg::Auto => separator_from_env(|name| std::env::var(name).ok()),
        };

        Config {
            separator,
            banner: !self.quiet,
            prompt: self.prompt,
        }
    }
}

/// Настройки сеанса.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Десятичный разделитель локали.
    pub separator: DecimalSeparator,
    /// Печатать ли приветствие и начальное состояние.
    pub banner: bool,
    /// Строка приглашения.
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DecimalSeparator::Dot,
            banner: true,
            prompt: "> ".to_owned(),
        }
    }
}

/// Определяет разделитель по первой непустой переменной локали.
pub fn separator_from_env(var: impl Fn(&str) -> Option<String>) -> DecimalSeparator {
    let locale = LOCALE_VARS
        .iter()
        .filter_map(|name| var(*name))
        .find(|value| !value.is_empty());

    let Some(locale) = locale else {
        return DecimalSeparator::Dot;
    };

    // "ru_RU.UTF-8" -> "ru", "de-AT" -> "de"
    let language = locale
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    log::debug!("локаль '{locale}', язык '{language}'");

    if COMMA_LANGUAGES.contains(&language.as_str()) {
        DecimalSeparator::Comma
    } else {
        DecimalSeparator::Dot
    }
}
