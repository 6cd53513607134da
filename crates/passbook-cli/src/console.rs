//! Line-oriented prompting over any reader/writer pair

use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Prompting console
///
/// Every prompt returns `Ok(None)` once input is exhausted so callers can
/// unwind cleanly on EOF.
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Read secrets without echo (only meaningful on a terminal)
    hide_secrets: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, hide_secrets: bool) -> Self {
        Self {
            input,
            output,
            hide_secrets,
        }
    }

    /// Write one line of output
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Prompt for a full line, keeping inner and surrounding spaces
    pub fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Prompt for a single value with surrounding whitespace removed
    pub fn prompt_token(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self
            .prompt_line(prompt)?
            .map(|line| line.trim().to_string()))
    }

    /// Prompt for a password, hidden when attached to a terminal
    pub fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.hide_secrets {
            return self.prompt_token(prompt);
        }

        self.output.flush()?;
        match rpassword::prompt_password(prompt) {
            Ok(secret) => Ok(Some(secret.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Consume the console and return the output sink
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    #[test]
    fn test_prompt_line_keeps_spaces() {
        let mut console = console("  Sky Blue \r\nnext\n");

        assert_eq!(console.prompt_line("Answer: ").unwrap().as_deref(), Some("  Sky Blue "));
        assert_eq!(console.prompt_line("Again: ").unwrap().as_deref(), Some("next"));
        assert_eq!(console.prompt_line("Gone: ").unwrap(), None);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Answer: Again: Gone: ");
    }

    #[test]
    fn test_prompt_token_trims() {
        let mut console = console("  example.com \n\n");

        assert_eq!(console.prompt_token("Website: ").unwrap().as_deref(), Some("example.com"));
        assert_eq!(console.prompt_token("Website: ").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_prompt_secret_reads_plain_line_when_not_hidden() {
        let mut console = console("hunter2\n");
        assert_eq!(console.prompt_secret("Password: ").unwrap().as_deref(), Some("hunter2"));
    }
}
