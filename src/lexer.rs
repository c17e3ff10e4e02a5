//! Lexical analysis of a command line: words and pipe operators.

use crate::error::ParseError;

/// Represents a token resulting from lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A word with its quotes already removed.
    Word(String),
    /// The pipe operator, `|`.
    PipeOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingSingleQuote,
    ReadingDoubleQuote,
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
}

impl LexingFSM {
    fn new(line: &str) -> Self {
        LexingFSM {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Start,
            buffer: String::new(),
        }
    }

    /// Walks the input once. Quotes group characters into a single word and are
    /// dropped; a `|` inside quotes is an ordinary character.
    fn make_tokens(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Start => self.handle_start(ch, &mut out),
                LexingState::ReadingWord => self.handle_word(ch, &mut out),
                LexingState::ReadingSingleQuote => self.handle_quoted(ch, '\''),
                LexingState::ReadingDoubleQuote => self.handle_quoted(ch, '"'),
            }
        }

        match self.state {
            LexingState::ReadingSingleQuote => return Err(ParseError::UnclosedQuote('\'')),
            LexingState::ReadingDoubleQuote => return Err(ParseError::UnclosedQuote('"')),
            LexingState::ReadingWord => self.finish_word(&mut out),
            LexingState::Start => {}
        }

        Ok(out)
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn handle_start(&mut self, ch: char, out: &mut Vec<Token>) {
        match ch {
            c if c.is_whitespace() => {}
            '|' => out.push(Token::PipeOp),
            _ => {
                self.state = LexingState::ReadingWord;
                self.handle_word(ch, out);
            }
        }
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<Token>) {
        match ch {
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            '|' => {
                self.finish_word(out);
                out.push(Token::PipeOp);
            }
            c if c.is_whitespace() => self.finish_word(out),
            c => self.buffer.push(c),
        }
    }

    fn handle_quoted(&mut self, ch: char, quote: char) {
        if ch == quote {
            self.state = LexingState::ReadingWord;
        } else {
            self.buffer.push(ch);
        }
    }

    fn finish_word(&mut self, out: &mut Vec<Token>) {
        out.push(Token::Word(std::mem::take(&mut self.buffer)));
        self.state = LexingState::Start;
    }
}

/// Split a line into words and pipe operators.
pub(crate) fn split_into_tokens(line: &str) -> Result<Vec<Token>, ParseError> {
    LexingFSM::new(line).make_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_words_and_pipes() {
        let tokens = split_into_tokens("echo 42|wc  file").unwrap();
        assert_eq!(
            tokens,
            vec![word("echo"), word("42"), Token::PipeOp, word("wc"), word("file")]
        );
    }

    #[test]
    fn test_quotes_are_removed_and_group_words() {
        let tokens = split_into_tokens(r#"echo 'a b' "c|d" x"y"z"#).unwrap();
        assert_eq!(
            tokens,
            vec![word("echo"), word("a b"), word("c|d"), word("xyz")]
        );
    }

    #[test]
    fn test_other_quote_is_literal_inside_quotes() {
        let tokens = split_into_tokens(r#"echo "it's" '"x"'"#).unwrap();
        assert_eq!(tokens, vec![word("echo"), word("it's"), word("\"x\"")]);
    }

    #[test]
    fn test_empty_quotes_make_an_empty_word() {
        let tokens = split_into_tokens("echo ''").unwrap();
        assert_eq!(tokens, vec![word("echo"), word("")]);
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(
            split_into_tokens("echo 'abc"),
            Err(ParseError::UnclosedQuote('\''))
        );
        assert_eq!(
            split_into_tokens("echo \"abc"),
            Err(ParseError::UnclosedQuote('"'))
        );
    }
}
