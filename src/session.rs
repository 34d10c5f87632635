//! Цикл чтения и выполнения команд.
//!
//! Сеанс владеет регистрами калькулятора и пишет всё в один поток вывода:
//! приглашения, строки состояния и сообщения об ошибках. Ошибки вычислений
//! не прерывают сеанс.

use std::io::{self, BufRead, Write};

use crate::command::{parse_input, Input};
use crate::config::Config;
use crate::engine::State;
use crate::number::format_number;
use crate::CalcError;

const BANNER: &str = "Калькулятор. Команды: число | + n | - n | * n | / n | % n | inv | sq | sqrt | M+ | M- | MR | C | AC | help | exit";
const HINT: &str = "Подсказка: введите число для установки текущего значения, затем операции. Примеры: '+ 5', '* 2', 'sqrt', 'M+', 'MR'.";
const FAREWELL: &str = "Завершено.";

const HELP: &str = "\
Команды:
  <число>      - установить текущее значение (напр. 12,5 или 12.5)
  + n  - n     - сложение / вычитание с n
  * n  / n     - умножение / деление на n (также x и ÷)
  % n          - остаток от деления на n
  inv (1/x)    - обратить текущее значение
  sq (x^2)     - квадрат текущего значения
  sqrt (√)     - квадратный корень
  M+           - прибавить текущее к памяти
  M-           - вычесть текущее из памяти
  MR           - записать из памяти в текущее
  C            - сбросить текущее (0)
  AC           - сбросить текущее и память (0)
  help         - показать помощь
  exit, quit   - выход
Примеры: '25', '+ 5', '* 2', 'sqrt', 'M+', 'MR'.";

/// Что делать после обработки строки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Читать следующую строку.
    Continue,
    /// Завершить сеанс.
    Exit,
}

/// Интерактивный сеанс калькулятора.
pub struct Session<W> {
    state: State,
    config: Config,
    out: W,
}

impl<W: Write> Session<W> {
    /// Создаёт сеанс с нулевыми регистрами.
    pub fn new(out: W, config: Config) -> Self {
        Self {
            state: State::default(),
            config,
            out,
        }
    }

    /// Текущее состояние регистров.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Возвращает поток вывода, завершая сеанс.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Выполняет одну команду или ввод числа, ничего не печатая.
    ///
    /// При ошибке состояние не меняется.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`CalcError`], если аргумент не число, команда неизвестна
    /// или операция не может быть выполнена.
    pub fn execute(&mut self, line: &str) -> Result<State, CalcError> {
        let next = match parse_input(line.trim(), self.config.separator)? {
            Input::Value(value) => self.state.enter(value),
            Input::Command {
                operation,
                argument,
            } => {
                log::debug!("{operation} {argument:?}");
                operation.apply(self.state, argument)?
            }
        };
        self.state = next;
        Ok(next)
    }

    /// Обрабатывает одну строку ввода и печатает результат.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`io::Error`] при ошибке записи.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return Ok(Flow::Exit);
        }
        if line.eq_ignore_ascii_case("help") {
            writeln!(self.out, "{HELP}")?;
            return Ok(Flow::Continue);
        }

        match self.execute(line) {
            Ok(_) => self.print_state()?,
            Err(e @ CalcError::UnknownCommand(_)) => {
                log::debug!("{e:?}");
                writeln!(self.out, "{e}")?;
            }
            Err(e) => {
                log::debug!("команда '{line}' отклонена: {e:?}");
                writeln!(self.out, "Ошибка: {e}")?;
                self.print_state()?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Запускает цикл чтения до `exit`/`quit` или конца ввода.
    ///
    /// # Ошибки
    ///
    /// Возвращает [`io::Error`] при ошибках чтения/записи.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        log::info!("сеанс начат, разделитель {:?}", self.config.separator);

        if self.config.banner {
            writeln!(self.out, "{BANNER}")?;
            writeln!(self.out, "{HINT}")?;
            self.print_state()?;
        }

        // Невалидный UTF-8 заменяется на U+FFFD, строка разбирается как обычно.
        let mut buf = Vec::new();
        loop {
            write!(self.out, "{}", self.config.prompt)?;
            self.out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                log::info!("конец ввода");
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line)? == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "{FAREWELL}")?;
        self.out.flush()
    }

    fn print_state(&mut self) -> io::Result<()> {
        let separator = self.config.separator;
        writeln!(
            self.out,
            "Текущее: {}    Память: {}",
            format_number(self.state.current, separator),
            format_number(self.state.memory, separator)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EvalError, Operation};

    fn session() -> Session<Vec<u8>> {
        Session::new(Vec::new(), Config::default())
    }

    fn output(session: &Session<Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.out).into_owned()
    }

    #[test]
    fn execute_updates_state() {
        let mut s = session();
        assert_eq!(s.execute("12,5").unwrap().current, 12.5);
        assert_eq!(s.execute("+ 7.5").unwrap().current, 20.0);
        assert_eq!(s.execute("M+").unwrap().memory, 20.0);
        assert_eq!(s.execute("AC").unwrap(), State::default());
    }

    #[test]
    fn execute_failure_keeps_state() {
        let mut s = session();
        s.execute("5").unwrap();
        s.execute("m+").unwrap();

        assert_eq!(
            s.execute("/ 0"),
            Err(CalcError::Eval(EvalError::DivisionByZero(Operation::Divide)))
        );
        assert_eq!(
            s.execute("*"),
            Err(CalcError::Eval(EvalError::MissingArgument(Operation::Multiply)))
        );
        assert!(matches!(s.execute("+ abc"), Err(CalcError::InvalidArgument(_))));
        assert!(matches!(s.execute("foo"), Err(CalcError::UnknownCommand(_))));

        assert_eq!(s.state(), State { current: 5.0, memory: 5.0 });
    }

    #[test]
    fn handle_blank_line() {
        let mut s = session();
        assert_eq!(s.handle_line("   \t").unwrap(), Flow::Continue);
        assert_eq!(output(&s), "");
    }

    #[test]
    fn handle_exit_keywords() {
        let mut s = session();
        assert_eq!(s.handle_line("exit").unwrap(), Flow::Exit);
        assert_eq!(s.handle_line("QUIT\n").unwrap(), Flow::Exit);
        assert_eq!(s.handle_line("  Exit  ").unwrap(), Flow::Exit);
    }

    #[test]
    fn handle_help() {
        let mut s = session();
        assert_eq!(s.handle_line("HELP").unwrap(), Flow::Continue);
        assert!(output(&s).starts_with("Команды:"));
        assert_eq!(s.state(), State::default());
    }

    #[test]
    fn handle_success_prints_state() {
        let mut s = session();
        s.handle_line("12,5").unwrap();
        assert_eq!(output(&s), "Текущее: 12.5    Память: 0\n");
    }

    #[test]
    fn handle_failure_prints_error_and_state() {
        let mut s = session();
        s.handle_line("-4").unwrap();
        s.handle_line("sqrt").unwrap();
        assert_eq!(
            output(&s),
            "Текущее: -4    Память: 0\n\
             Ошибка: корень из отрицательного числа не определён в R\n\
             Текущее: -4    Память: 0\n"
        );
    }

    #[test]
    fn handle_unknown_prints_only_error() {
        let mut s = session();
        s.handle_line("foo").unwrap();
        assert_eq!(
            output(&s),
            "Неизвестная команда 'foo'. Введите 'help' для справки.\n"
        );
    }

    #[test]
    fn state_line_uses_separator() {
        let config = Config {
            separator: crate::number::DecimalSeparator::Comma,
            ..Config::default()
        };
        let mut s = Session::new(Vec::new(), config);
        s.handle_line("0.25").unwrap();
        assert_eq!(output(&s), "Текущее: 0,25    Память: 0\n");
    }
}
