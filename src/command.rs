use crate::builtin::{Cat, Echo, Pwd, Wc};
use crate::error::ExecuteError;
use crate::external::ExternalCommand;
use crate::stream::Stream;
use std::io::BufRead;

/// One stage of a pipeline as produced by the parser: a command name and its raw,
/// unsplit argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    name: String,
    arg_string: String,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, arg_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_string: arg_string.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument text exactly as the parser produced it.
    pub fn arg_string(&self) -> &str {
        &self.arg_string
    }
}

/// Anything that can run as a pipeline stage.
///
/// Implemented by every built-in, by [`ExternalCommand`] and by the [`Executor`] enum
/// that wraps them.
pub trait CommandExecutor {
    /// The descriptor this executor was created from.
    fn descriptor(&self) -> &CommandDescriptor;

    /// Runs the command.
    ///
    /// `input` is the previous stage's output (empty for the first stage). `console` is
    /// the process standard input, read by commands that have neither piped input nor a
    /// file argument.
    fn execute(self, input: Stream, console: &mut dyn BufRead) -> Result<Stream, ExecuteError>;
}

/// The closed set of commands the shell knows how to run.
#[derive(Debug)]
pub enum Executor {
    Echo(Echo),
    Pwd(Pwd),
    Cat(Cat),
    Wc(Wc),
    External(ExternalCommand),
}

impl CommandExecutor for Executor {
    fn descriptor(&self) -> &CommandDescriptor {
        match self {
            Executor::Echo(cmd) => cmd.descriptor(),
            Executor::Pwd(cmd) => cmd.descriptor(),
            Executor::Cat(cmd) => cmd.descriptor(),
            Executor::Wc(cmd) => cmd.descriptor(),
            Executor::External(cmd) => cmd.descriptor(),
        }
    }

    fn execute(self, input: Stream, console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        match self {
            Executor::Echo(cmd) => cmd.execute(input, console),
            Executor::Pwd(cmd) => cmd.execute(input, console),
            Executor::Cat(cmd) => cmd.execute(input, console),
            Executor::Wc(cmd) => cmd.execute(input, console),
            Executor::External(cmd) => cmd.execute(input, console),
        }
    }
}

/// Maps a descriptor onto its executor. Names are matched exactly; anything that is
/// not a built-in is run as an external program.
pub fn dispatch(cmd: CommandDescriptor) -> Executor {
    let executor = match cmd.name() {
        "echo" => Executor::Echo(Echo::new(cmd)),
        "pwd" => Executor::Pwd(Pwd::new(cmd)),
        "cat" => Executor::Cat(Cat::new(cmd)),
        "wc" => Executor::Wc(Wc::new(cmd)),
        _ => Executor::External(ExternalCommand::new(cmd)),
    };
    trace!(?executor, "dispatched");
    executor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched(name: &str) -> Executor {
        dispatch(CommandDescriptor::new(name, "x"))
    }

    #[test]
    fn test_dispatch_builtins() {
        assert!(matches!(dispatched("echo"), Executor::Echo(_)));
        assert!(matches!(dispatched("pwd"), Executor::Pwd(_)));
        assert!(matches!(dispatched("cat"), Executor::Cat(_)));
        assert!(matches!(dispatched("wc"), Executor::Wc(_)));
    }

    #[test]
    fn test_dispatch_falls_back_to_external() {
        assert!(matches!(dispatched("ls"), Executor::External(_)));
        assert!(matches!(dispatched("grep"), Executor::External(_)));
        // no case folding
        assert!(matches!(dispatched("ECHO"), Executor::External(_)));
        assert!(matches!(dispatched("Cat"), Executor::External(_)));
    }

    #[test]
    fn test_dispatch_keeps_descriptor() {
        let cmd = CommandDescriptor::new("wc", "file.txt");
        let executor = dispatch(cmd.clone());
        assert_eq!(executor.descriptor(), &cmd);
    }
}
