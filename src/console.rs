// This file is part of chess-tournament-manager.
//
// chess-tournament-manager is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// chess-tournament-manager is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{
    fmt,
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{Error, chess_match::Outcome};

pub const INVALID_CHOICE: &str = "\nInvalid choice! Please try again.";

/// Line based prompts over any reader and writer.
///
/// Every question is asked again until the answer is one it accepts.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// # Errors
    ///
    /// If writing fails.
    pub fn print(&mut self, text: impl fmt::Display) -> Result<(), Error> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Reads one trimmed line after showing the label.
    ///
    /// A line that is not UTF-8 is asked for again.
    ///
    /// # Errors
    ///
    /// If reading or writing fails, or the input is closed.
    pub fn prompt(&mut self, label: &str) -> Result<String, Error> {
        loop {
            write!(self.output, "{label}")?;
            self.output.flush()?;

            let mut buffer = Vec::new();
            if self.input.read_until(b'\n', &mut buffer)? == 0 {
                return Err(Error::EndOfInput);
            }

            match String::from_utf8(buffer) {
                Ok(line) => return Ok(line.trim().to_string()),
                Err(_) => self.print(INVALID_CHOICE)?,
            }
        }
    }

    /// Asks until the answer is one of the tokens.
    ///
    /// # Errors
    ///
    /// If reading or writing fails, or the input is closed.
    pub fn choose(&mut self, label: &str, tokens: &[&str]) -> Result<String, Error> {
        loop {
            let answer = self.prompt(label)?;
            if tokens.contains(&answer.as_str()) {
                return Ok(answer);
            }
            self.print(INVALID_CHOICE)?;
        }
    }

    /// # Errors
    ///
    /// If reading or writing fails, or the input is closed.
    pub fn confirm(&mut self, label: &str) -> Result<bool, Error> {
        Ok(self.choose(label, &["y", "n"])? == "y")
    }

    /// Asks until the answer parses. A blank answer gives `None`.
    ///
    /// # Errors
    ///
    /// If reading or writing fails, or the input is closed.
    pub fn parse_or_blank<T: FromStr>(&mut self, label: &str) -> Result<Option<T>, Error> {
        loop {
            let answer = self.prompt(label)?;
            if answer.is_empty() {
                return Ok(None);
            }
            if let Ok(value) = answer.parse() {
                return Ok(Some(value));
            }
            self.print(INVALID_CHOICE)?;
        }
    }

    /// # Errors
    ///
    /// If reading or writing fails, or the input is closed.
    pub fn outcome(&mut self) -> Result<Outcome, Error> {
        loop {
            let answer = self.prompt("Enter the result (1: player 1 wins, 2: player 2 wins, 0: draw): ")?;
            match answer.parse() {
                Ok(outcome) => return Ok(outcome),
                Err(_) => self.print(INVALID_CHOICE)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    #[test]
    fn prompts_are_trimmed() {
        let mut console = console("  Magnus \n");
        assert_eq!(console.prompt("Name: ").unwrap(), "Magnus");
        assert_eq!(output(&console), "Name: ");
    }

    #[test]
    fn unknown_tokens_ask_again() {
        let mut console = console("7\nabc\n2\n");
        assert_eq!(console.choose("> ", &["1", "2", "0"]).unwrap(), "2");
        assert_eq!(output(&console).matches("Invalid choice!").count(), 2);
    }

    #[test]
    fn confirmations() {
        let mut console = console("maybe\ny\nn\n");
        assert!(console.confirm("? ").unwrap());
        assert!(!console.confirm("? ").unwrap());
    }

    #[test]
    fn numbers_or_blank() {
        let mut console = console("four\n4\n\n");
        assert_eq!(console.parse_or_blank::<usize>("> ").unwrap(), Some(4));
        assert_eq!(console.parse_or_blank::<usize>("> ").unwrap(), None);
    }

    #[test]
    fn outcomes() {
        let mut console = console("3\n0\n");
        assert_eq!(console.outcome().unwrap(), Outcome::Draw);
    }

    #[test]
    fn lines_that_are_not_utf8_ask_again() {
        let mut console = Console::new(Cursor::new(b"\xff\xfe\n0\n".to_vec()), Vec::new());
        assert_eq!(console.prompt("> ").unwrap(), "0");
        assert_eq!(output(&console), "> \nInvalid choice! Please try again.\n> ");
    }

    #[test]
    fn closed_input() {
        let mut console = console("");
        assert!(matches!(console.prompt("> "), Err(Error::EndOfInput)));
    }
}
