use crate::command::{CommandDescriptor, CommandExecutor};
use crate::error::ExecuteError;
use crate::stream::Stream;
use std::io::{self, BufRead, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Command that is not a builtin.
///
/// The program is spawned with the whole argument text as its only argument; the text
/// is not split again. Piped input is written to the child's stdin from a helper
/// thread, which closes it when done, while the calling thread collects stdout and
/// stderr; whatever the child prints on stdout becomes this stage's output.
#[derive(Debug)]
pub struct ExternalCommand {
    cmd: CommandDescriptor,
}

impl ExternalCommand {
    pub fn new(cmd: CommandDescriptor) -> Self {
        Self { cmd }
    }

    fn fail(&self, message: impl Into<String>) -> ExecuteError {
        ExecuteError::execution(self.cmd.name(), message)
    }
}

impl CommandExecutor for ExternalCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.cmd
    }

    fn execute(self, input: Stream, _console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        let name = self.cmd.name();
        let mut command = Command::new(name);
        if !self.cmd.arg_string().is_empty() {
            command.arg(self.cmd.arg_string());
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        trace!("spawning command: {:?}", command);
        let mut child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => self.fail(format!("{name}: command not found")),
            _ => self.fail(format!("{name}: {e}")),
        })?;

        // fed from its own thread so a child filling its stdout pipe can't stall us
        let writer = child.stdin.take().map(|mut stdin| {
            let name = name.to_owned();
            thread::spawn(move || match stdin.write_all(input.as_str().as_bytes()) {
                // the child is free to exit without reading its input
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(command = %name, "child closed stdin early");
                    Ok(())
                }
                other => other,
            })
        });

        let output = child
            .wait_with_output()
            .map_err(|e| self.fail(format!("{name}: {e}")))?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(self.fail(format!("{name}: can't write input: {e}"))),
                Err(_) => return Err(self.fail(format!("{name}: input writer panicked"))),
            }
        }
        trace!(command = name, status = %output.status, "child exited");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim_end();
            return Err(if stderr.is_empty() {
                self.fail(format!("{name}: exited with {}", describe(output.status)))
            } else {
                self.fail(stderr)
            });
        }

        Ok(Stream::from(
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }
}

#[cfg(unix)]
fn describe(exit_status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;
    match (exit_status.code(), exit_status.signal()) {
        (Some(code), _) => format!("status {code}"),
        (None, Some(signal)) => format!("signal {signal}"),
        (None, None) => exit_status.to_string(),
    }
}

#[cfg(not(unix))]
fn describe(exit_status: ExitStatus) -> String {
    exit_status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(name: &str, args: &str, input: &str) -> Result<String, ExecuteError> {
        let cmd = ExternalCommand::new(CommandDescriptor::new(name, args));
        cmd.execute(Stream::from(input), &mut Cursor::new(Vec::new()))
            .map(Stream::into_string)
    }

    #[test]
    #[cfg(unix)]
    fn test_feeds_input_to_child() {
        assert_eq!(run("cat", "", "hi\nthere").unwrap(), "hi\nthere");
    }

    #[test]
    #[cfg(unix)]
    fn test_passes_argument_text_as_single_argument() {
        // `echo` prints its single argument untouched, inner spaces included
        assert_eq!(run("echo", "a   b", "").unwrap(), "a   b\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_empty_argument_text_passes_no_argument() {
        assert_eq!(run("echo", "", "").unwrap(), "\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_large_input_through_filter() {
        // far more than a pipe buffer in both directions
        let input = "x".repeat(1 << 20);
        let out = run("cat", "", &input).unwrap();
        assert_eq!(out.len(), 1 << 20);
        assert_eq!(out, input);
    }

    #[test]
    #[cfg(unix)]
    fn test_child_ignoring_input_is_fine() {
        let input = "x".repeat(1 << 20);
        assert_eq!(run("true", "", &input).unwrap(), "");
    }

    #[test]
    fn test_missing_program_is_execution_error() {
        let name = format!("no_such_program_{}", std::process::id());
        let err = run(&name, "", "").unwrap_err();
        assert!(matches!(err, ExecuteError::Execution { .. }));
        assert_eq!(err.to_string(), format!("{}: command not found", name));
        assert_eq!(err.command(), name);
    }

    #[test]
    #[cfg(unix)]
    fn test_non_zero_exit_surfaces_stderr() {
        let path = format!("/nonexistent_dir_for_pipe_shell_{}", std::process::id());
        let err = run("ls", &path, "").unwrap_err();
        assert!(err.to_string().contains(&path), "unexpected error: {}", err);
    }

    #[test]
    #[cfg(unix)]
    fn test_non_zero_exit_without_stderr() {
        let err = run("false", "", "").unwrap_err();
        assert_eq!(err.to_string(), "false: exited with status 1");
    }
}
