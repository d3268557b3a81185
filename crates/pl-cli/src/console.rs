//! Line-based prompting over any reader and writer.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use colored::Colorize;

/// A prompt loop over an input and an output stream.
pub struct Console<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    /// The output stream, for printing between prompts.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Show `prompt` and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt.bold())?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(self.line.trim().to_string()))
    }

    /// Ask until the user enters a number in `range`. `None` at end of input.
    pub fn read_number(
        &mut self,
        prompt: &str,
        range: RangeInclusive<u32>,
    ) -> io::Result<Option<u32>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<u32>() {
                Ok(n) if range.contains(&n) => return Ok(Some(n)),
                _ => writeln!(
                    self.output,
                    "{}",
                    format!(
                        "Invalid choice. Please enter a number from {} to {}.",
                        range.start(),
                        range.end()
                    )
                    .red()
                )?,
            }
        }
    }

    /// Ask a yes/no question until answered. `None` at end of input.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.to_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "{}", "Please answer y or n.".red())?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn output(c: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    #[test]
    fn read_line_trims() {
        let mut c = console("  hello \n");
        assert_eq!(c.read_line("> ").unwrap(), Some("hello".to_string()));
        assert_eq!(c.read_line("> ").unwrap(), None);
    }

    #[test]
    fn read_number_reprompts() {
        let mut c = console("abc\n9\n-1\n3\n");
        assert_eq!(c.read_number("pick: ", 1..=4).unwrap(), Some(3));
        let out = output(c);
        assert_eq!(out.matches("Invalid choice").count(), 3);
        assert!(out.contains("from 1 to 4"));
    }

    #[test]
    fn read_number_eof() {
        let mut c = console("x\n");
        assert_eq!(c.read_number("pick: ", 1..=2).unwrap(), None);
    }

    #[test]
    fn confirm_answers() {
        let mut c = console("maybe\nY\nno\n");
        assert_eq!(c.confirm("? ").unwrap(), Some(true));
        assert_eq!(c.confirm("? ").unwrap(), Some(false));
        assert_eq!(c.confirm("? ").unwrap(), None);
        assert!(output(c).contains("Please answer y or n."));
    }
}
