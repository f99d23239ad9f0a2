use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, bail};

/// Line based question/answer loop over any reader and writer, so sessions can
/// be driven from stdin or from a test buffer.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `question` and returns the answer without its line ending.
    pub fn line(&mut self, question: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("failed to read from input")?;
        if read == 0 {
            bail!("input ended while waiting for: {}", question.trim());
        }

        let trimmed = answer.trim_end_matches(['\n', '\r']).len();
        answer.truncate(trimmed);
        Ok(answer)
    }

    pub fn number<T>(&mut self, question: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let answer = self.line(question)?;
        answer
            .trim()
            .parse()
            .with_context(|| format!("expected a number, got '{}'", answer))
    }

    /// Reads exactly one character.
    pub fn symbol(&mut self, question: &str) -> anyhow::Result<char> {
        let answer = self.line(question)?;
        parse_symbol(&answer)?.context("expected a symbol, got nothing")
    }

    /// Reads one character, or nothing for an epsilon move.
    pub fn optional_symbol(&mut self, question: &str) -> anyhow::Result<Option<char>> {
        let answer = self.line(question)?;
        parse_symbol(&answer)
    }
}

fn parse_symbol(answer: &str) -> anyhow::Result<Option<char>> {
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c)),
        _ => bail!("expected a single symbol, got '{}'", answer),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_line_strips_line_endings() {
        let mut p = prompter("ab c\r\nnext\n");

        assert_eq!(p.line("first: ").unwrap(), "ab c");
        assert_eq!(p.line("second: ").unwrap(), "next");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "first: second: ");
    }

    #[test]
    fn test_number() {
        let mut p = prompter(" 3 \nthree\n");

        assert_eq!(p.number::<usize>("n: ").unwrap(), 3);
        assert!(p.number::<usize>("n: ").is_err());
    }

    #[test]
    fn test_symbols() {
        let mut p = prompter("a\n\nab\nλ\n\n");

        assert_eq!(p.symbol("s: ").unwrap(), 'a');
        assert_eq!(p.optional_symbol("s: ").unwrap(), None);
        assert!(p.symbol("s: ").is_err());
        assert_eq!(p.optional_symbol("s: ").unwrap(), Some('λ'));
        assert!(p.symbol("s: ").is_err());
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("");
        assert!(p.line("anything: ").is_err());
    }
}
