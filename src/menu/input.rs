use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::str::FromStr;

/// Result of asking for the next whitespace separated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<T> {
    Value(T),
    Invalid(String),
    Eof,
}

/// Splits line based input into whitespace separated tokens, the way a
/// `scanf("%d")` loop sees it: values may share a line or span several.
#[derive(Debug)]
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }

        Ok(self.pending.pop_front())
    }

    pub fn next_parsed<T: FromStr>(&mut self) -> io::Result<Token<T>> {
        Ok(match self.next_token()? {
            None => Token::Eof,
            Some(tok) => match tok.parse() {
                Ok(v) => Token::Value(v),
                Err(_) => Token::Invalid(tok),
            },
        })
    }

    /// Drop whatever is left of the current line.
    pub fn discard_line(&mut self) {
        self.pending.clear();
    }
}
