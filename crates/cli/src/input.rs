use std::{collections::VecDeque, io::BufRead};

use tracing::warn;

/// Splits a line-oriented reader into whitespace-delimited tokens.
///
/// Tokens are handed out one at a time regardless of line breaks, so a
/// command and its arguments may be typed on one line or several.
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

    /// Drop whatever is left of the current line.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    fn fill(&mut self) -> bool {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return false,
                Ok(_) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_string)),
                Err(err) => {
                    warn!("Input read failed: {err}");
                    return false;
                }
            }
        }
        true
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.fill() {
            return None;
        }
        self.pending.pop_front()
    }
}
