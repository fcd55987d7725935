use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::Result;
use crate::record::SourceFormat;

const PATH_PROMPT: &str = "Enter the path to the address file (leave empty to quit): ";
const RETRY_PROMPT: &str = "Continue searching? (1 - yes, 0 - no): ";

/// Talks to the user over a pair of streams to pick the next file to process.
pub struct Selector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Selector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prints `prompt` and reads one line without its terminator. `None` on EOF.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);

        Ok(Some(answer.to_string()))
    }

    /// Keeps asking until the user names an existing `.csv` or `.xml` file,
    /// or gives up. An empty answer ends the session.
    pub fn select(&mut self) -> Result<Option<PathBuf>> {
        loop {
            let path = match self.ask(PATH_PROMPT)? {
                Some(answer) if !answer.is_empty() => PathBuf::from(answer),
                _ => {
                    writeln!(self.output, "Program finished.")?;
                    return Ok(None);
                }
            };

            if !path.exists() {
                warn!(path = %path.display(), "file not found");
                writeln!(self.output, "Error: file not found.")?;
            } else if SourceFormat::from_path(&path).is_none() {
                warn!(path = %path.display(), "unsupported file type");
                writeln!(self.output, "Error: unsupported file type, use XML or CSV files.")?;
            } else {
                return Ok(Some(path));
            }

            match self.ask(RETRY_PROMPT)?.as_deref() {
                Some("1") => (),
                Some("0") | None => return Ok(None),
                Some(_) => writeln!(self.output, "Invalid input, try again...")?,
            }
        }
    }

    /// Asked after every processed file. EOF counts as "stop".
    pub fn ask_continue(&mut self) -> Result<bool> {
        loop {
            match self.ask(RETRY_PROMPT)?.as_deref() {
                Some("1") => return Ok(true),
                Some("0") | None => return Ok(false),
                Some(_) => writeln!(self.output, "Invalid input... enter '1' or '0'!")?,
            }
        }
    }
}
