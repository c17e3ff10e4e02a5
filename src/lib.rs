//! The execution stage of a tiny shell.
//!
//! A command line is turned into an ordered list of [`CommandDescriptor`]s, each of
//! which is mapped by [`dispatch`] onto one of the built-in commands (`echo`, `pwd`,
//! `cat`, `wc`) or onto an external program. The [`PipelineRunner`] then runs the
//! stages one after another, moving each stage's output [`Stream`] into the next
//! stage as its input.
//!
//! Everything runs synchronously on the calling thread. Each stage's output is fully
//! buffered in memory before the next stage starts.
//!
//! The [`Interpreter`] glues the line parser and the runner together and provides the
//! interactive read-eval-print loop used by the binary.

#[macro_use]
extern crate tracing;

pub mod builtin;
pub mod command;
pub mod error;
pub mod external;
mod interpreter;
mod lexer;
pub mod parser;
pub mod pipeline;
mod stream;

pub use command::{CommandDescriptor, CommandExecutor, Executor, dispatch};
pub use error::{ExecuteError, ParseError};
pub use interpreter::Interpreter;
pub use parser::parse_line;
pub use pipeline::PipelineRunner;
pub use stream::Stream;
