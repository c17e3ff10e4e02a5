use crate::parser;
use crate::pipeline::PipelineRunner;
use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

/// A minimal shell: parses a line into a pipeline and runs it.
///
/// Example
/// ```
/// use pipe_shell::Interpreter;
/// let mut sh = Interpreter::default();
/// let out = sh.run_line("echo hello | wc").unwrap();
/// assert_eq!(out, "1 1 6 \n");
/// ```
pub struct Interpreter {
    prompt: String,
}

impl Interpreter {
    /// Create an interpreter that shows `prompt` in the interactive loop.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Run one command line with the process standard input as console.
    ///
    /// Returns the pipeline's output (ending with a newline), or an empty string for a
    /// blank line.
    pub fn run_line(&mut self, line: &str) -> Result<String> {
        self.run_line_with(line, io::stdin().lock())
    }

    /// Same as [`run_line`](Self::run_line), reading console input from `console`.
    pub fn run_line_with<R: BufRead>(&mut self, line: &str, console: R) -> Result<String> {
        let pipeline = parser::parse_line(line).with_context(|| format!("can't parse `{line}`"))?;
        if pipeline.is_empty() {
            return Ok(String::new());
        }
        debug!(stages = pipeline.len(), "running pipeline");
        Ok(PipelineRunner::new(console).run(pipeline)?)
    }

    /// Read-Eval-Print Loop. Errors are reported on stderr and the loop goes on;
    /// Ctrl-C or Ctrl-D ends the session.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(&self.prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str())?;
                    match self.run_line(&line) {
                        Ok(out) => {
                            let mut stdout = io::stdout().lock();
                            stdout.write_all(out.as_bytes())?;
                            stdout.flush()?;
                        }
                        Err(e) => eprintln!("{:#}", e),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("Bye bye");
                    break;
                }
                Err(err) => return Err(err).context("can't read line"),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new("$ ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(line: &str) -> Result<String> {
        Interpreter::default().run_line_with(line, Cursor::new(Vec::new()))
    }

    #[test]
    fn test_blank_line_prints_nothing() {
        assert_eq!(run("   ").unwrap(), "");
    }

    #[test]
    fn test_echo_pipe_wc_output() {
        assert_eq!(run("echo \"22\" | wc").unwrap(), "1 1 3 \n");
    }

    #[test]
    fn test_pipe_into_echo_drops_input() {
        assert_eq!(run("echo 42 | echo").unwrap(), "\n");
        assert_eq!(run("echo 42 | echo 43 44").unwrap(), "43 44\n");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = run("echo 'oops").unwrap_err();
        assert!(format!("{:#}", err).contains("unclosed quote"));
    }

    #[test]
    fn test_execution_error_keeps_its_kind() {
        let err = run("cat foo goo").unwrap_err();
        let err = err.downcast::<crate::ExecuteError>().unwrap();
        assert_eq!(err.to_string(), "cat: cat supports only one file, but given 2");
    }
}
