//! Position bookkeeping for the scanner.

use crate::error::LexError;
use crate::rules::RuleSet;
use crate::token::Token;
use smol_str::SmolStr;

/// Where the scanner is in its source: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Cursor {
    /// Classify and step over matches until a visible token is found.
    ///
    /// Returns `None` once the source is exhausted.
    pub fn next_token(&mut self, rules: &RuleSet, source: &str) -> Option<Result<Token, LexError>> {
        loop {
            let rest = &source[self.offset..];
            if rest.is_empty() {
                return None;
            }

            let Some((index, text)) = rules
                .captures(rest)
                .and_then(|caps| rules.matched(&caps))
            else {
                let end = rest.chars().next().map_or(0, char::len_utf8);
                return Some(Err(self.unclassifiable(&rest[..end])));
            };
            let rule = rules.rule(index);

            if text.is_empty() {
                return Some(Err(LexError::EmptyMatch {
                    rule: rule.name.clone(),
                    line: self.line,
                    column: self.column,
                }));
            }
            if rules.is_catch_all(index) {
                return Some(Err(self.unclassifiable(text)));
            }

            let start = self.offset;
            let (line, column) = (self.line, self.column);
            self.offset += text.len();
            if rules.is_newline(index) {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += text.chars().count();
            }

            if rules.is_skipped(index) {
                continue;
            }

            tracing::trace!(rule = %rule.name, lexeme = text, line, column, "classified token");
            return Some(Ok(Token::new(
                rule.name.clone(),
                text,
                line,
                column,
                start..self.offset,
            )));
        }
    }

    fn unclassifiable(&self, text: &str) -> LexError {
        let value = SmolStr::from(text);
        tracing::debug!(%value, line = self.line, column = self.column, "unclassifiable input");
        LexError::UnclassifiableCharacter {
            value,
            line: self.line,
            column: self.column,
        }
    }
}
