//! Turns a raw command line into the descriptors the pipeline runner consumes.

use crate::command::CommandDescriptor;
use crate::error::ParseError;
use crate::lexer::{self, Token};

/// Parse a line such as `cat 'my file' | wc` into one descriptor per stage.
///
/// The first word of a stage is the command name; the remaining words are joined with
/// single spaces into the argument text. A blank line gives an empty pipeline.
pub fn parse_line(line: &str) -> Result<Vec<CommandDescriptor>, ParseError> {
    let tokens = lexer::split_into_tokens(line)?;
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut pipeline = Vec::new();
    for stage in tokens.split(|t| *t == Token::PipeOp) {
        pipeline.push(construct_command(stage)?);
    }
    trace!(?pipeline, "parsed line");
    Ok(pipeline)
}

fn construct_command(stage: &[Token]) -> Result<CommandDescriptor, ParseError> {
    let mut words = stage.iter().filter_map(|t| match t {
        Token::Word(w) => Some(w.as_str()),
        Token::PipeOp => None,
    });
    let name = words.next().ok_or(ParseError::EmptyCommand)?;
    let args: Vec<&str> = words.collect();
    Ok(CommandDescriptor::new(name, args.join(" ")))
}
