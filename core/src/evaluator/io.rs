//! Program input.
//!
//! `?` reads one integer from an [`IntInput`]. The usual source is a
//! [`TokenReader`] over standard input; tests use byte slices.

use std::collections::VecDeque;
use std::io::BufRead;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input exhausted")]
    Exhausted,

    #[error("invalid integer '{token}'")]
    Invalid { token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A source of integers for the `?` expression.
pub trait IntInput {
    fn next_int(&mut self) -> Result<i64, InputError>;
}

impl<T: IntInput + ?Sized> IntInput for &mut T {
    fn next_int(&mut self) -> Result<i64, InputError> {
        (**self).next_int()
    }
}

/// Reads whitespace-separated integers, one line at a time, only when the
/// program asks for them.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<String>, InputError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

impl<R: BufRead> IntInput for TokenReader<R> {
    fn next_int(&mut self) -> Result<i64, InputError> {
        let token = self.next_token()?.ok_or(InputError::Exhausted)?;
        token
            .parse::<i64>()
            .map_err(|_| InputError::Invalid { token })
    }
}
