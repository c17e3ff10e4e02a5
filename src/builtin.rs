use crate::command::{CommandDescriptor, CommandExecutor};
use crate::error::ExecuteError;
use crate::stream::Stream;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, Read};

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process. Each one owns the descriptor it was dispatched from and
/// interprets the raw argument text itself.
pub trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "echo" or "wc".
    fn name() -> &'static str;

    fn cmd(&self) -> &CommandDescriptor;

    /// Executes the command on the previous stage's output.
    fn run(self, input: Stream, console: &mut dyn BufRead) -> Result<Stream, ExecuteError>;
}

impl<T: BuiltinCommand> CommandExecutor for T {
    fn descriptor(&self) -> &CommandDescriptor {
        self.cmd()
    }

    fn execute(self, input: Stream, console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        trace!(
            command = T::name(),
            args = self.cmd().arg_string(),
            piped = !input.is_empty(),
            "running builtin"
        );
        T::run(self, input, console)
    }
}

/// Where `cat` and `wc` take their text from.
enum Source<'a> {
    /// No file argument: piped input, or the console when nothing was piped.
    Input,
    File(&'a str),
}

/// Splits the argument text on whitespace; only zero or one file name is accepted.
fn source<'a>(name: &'static str, cmd: &'a CommandDescriptor) -> Result<Source<'a>, ExecuteError> {
    let files: Vec<&str> = cmd.arg_string().split_whitespace().collect();
    match files.as_slice() {
        [] => Ok(Source::Input),
        [file] => Ok(Source::File(file)),
        _ => Err(ExecuteError::execution(
            name,
            format!("{name}: {name} supports only one file, but given {}", files.len()),
        )),
    }
}

fn read_file(name: &'static str, file: &str) -> Result<String, ExecuteError> {
    let mut f = File::open(file).map_err(|e| {
        debug!(command = name, file, error = %e, "cannot open file");
        ExecuteError::FileNotFound {
            command: name,
            file: file.to_owned(),
        }
    })?;
    let mut content = String::new();
    f.read_to_string(&mut content)
        .map_err(|e| ExecuteError::execution(name, format!("{name}: {file}: {e}")))?;
    Ok(content)
}

fn read_console(name: &'static str, console: &mut dyn BufRead) -> Result<String, ExecuteError> {
    let mut content = String::new();
    console
        .read_to_string(&mut content)
        .map_err(|e| ExecuteError::execution(name, format!("{name}: can't read stdin: {e}")))?;
    Ok(content)
}

/// Write the argument text as-is.
#[derive(Debug)]
pub struct Echo {
    cmd: CommandDescriptor,
}

impl Echo {
    pub fn new(cmd: CommandDescriptor) -> Self {
        Self { cmd }
    }
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn cmd(&self) -> &CommandDescriptor {
        &self.cmd
    }

    fn run(self, _input: Stream, _console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        let mut out = Stream::new();
        write!(out, "{}", self.cmd.arg_string())
            .map_err(|_| ExecuteError::execution(Self::name(), "echo: check your arguments"))?;
        Ok(out)
    }
}

/// Print the current working directory.
#[derive(Debug)]
pub struct Pwd {
    cmd: CommandDescriptor,
}

impl Pwd {
    pub fn new(cmd: CommandDescriptor) -> Self {
        Self { cmd }
    }
}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn cmd(&self) -> &CommandDescriptor {
        &self.cmd
    }

    fn run(self, _input: Stream, _console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        let cwd = std::env::current_dir().map_err(|e| {
            ExecuteError::execution(Self::name(), format!("pwd: can't determine current directory: {e}"))
        })?;
        Ok(Stream::from(cwd.to_string_lossy().into_owned()))
    }
}

/// Print a file, the piped input, or the console.
#[derive(Debug)]
pub struct Cat {
    cmd: CommandDescriptor,
}

impl Cat {
    pub fn new(cmd: CommandDescriptor) -> Self {
        Self { cmd }
    }
}

impl BuiltinCommand for Cat {
    fn name() -> &'static str {
        "cat"
    }

    fn cmd(&self) -> &CommandDescriptor {
        &self.cmd
    }

    fn run(self, input: Stream, console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        match source(Self::name(), &self.cmd)? {
            Source::File(file) => read_file(Self::name(), file).map(Stream::from),
            Source::Input if !input.is_empty() => Ok(input),
            Source::Input => {
                let mut text = read_console(Self::name(), console)?;
                if text.ends_with('\n') {
                    text.pop();
                }
                Ok(Stream::from(text))
            }
        }
    }
}

/// Line, word and character totals over a sequence of lines.
#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    lines: usize,
    words: usize,
    chars: usize,
}

impl Counts {
    fn of<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Self {
        let mut counts = Counts::default();
        for line in lines {
            let line = line.as_ref();
            counts.lines += 1;
            counts.words += line.split_whitespace().count();
            counts.chars += line.chars().count();
        }
        counts
    }
}

/// Splits piped text on `\n`, drops the trailing empty fragment and gives every
/// remaining fragment its newline back.
fn piped_lines(text: &str) -> Vec<String> {
    let mut fragments: Vec<&str> = text.split('\n').collect();
    if fragments.last() == Some(&"") {
        fragments.pop();
    }
    fragments.into_iter().map(|f| format!("{f}\n")).collect()
}

/// Count lines, words and characters.
///
/// The output always ends with the raw argument text, so counting piped input or the
/// console leaves a trailing space where the file name would be.
#[derive(Debug)]
pub struct Wc {
    cmd: CommandDescriptor,
}

impl Wc {
    pub fn new(cmd: CommandDescriptor) -> Self {
        Self { cmd }
    }
}

impl BuiltinCommand for Wc {
    fn name() -> &'static str {
        "wc"
    }

    fn cmd(&self) -> &CommandDescriptor {
        &self.cmd
    }

    fn run(self, input: Stream, console: &mut dyn BufRead) -> Result<Stream, ExecuteError> {
        let counts = match source(Self::name(), &self.cmd)? {
            Source::File(file) => Counts::of(read_file(Self::name(), file)?.split_inclusive('\n')),
            Source::Input if !input.is_empty() => Counts::of(piped_lines(input.as_str())),
            Source::Input => Counts::of(read_console(Self::name(), console)?.split_inclusive('\n')),
        };
        let mut out = Stream::new();
        write!(
            out,
            "{} {} {} {}",
            counts.lines,
            counts.words,
            counts.chars,
            self.cmd.arg_string()
        )
        .map_err(|_| ExecuteError::execution(Self::name(), "wc: can't write counts"))?;
        Ok(out)
    }
}
