//! Incremental prefix matcher over a shrinking buffer.
//!
//! Unlike [`Scanner`](crate::Scanner), a [`StreamMatcher`] has no rule
//! table: every query brings its own pattern. This makes it handy for
//! trying out grammar fragments by hand.

use crate::error::LexError;
use regex::Regex;
use rustc_hash::FxHashMap;

/// Compiled query patterns kept per buffer before the cache is flushed.
const MAX_CACHED: usize = 256;

/// How a query pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Match the text exactly; regex metacharacters have no meaning.
    #[default]
    Literal,
    /// Use the text as a regular expression.
    Regex,
}

/// Matches query patterns against the front of a buffer, optionally
/// consuming the matched prefix.
#[derive(Debug, Clone, Default)]
pub struct StreamMatcher {
    remaining: String,
    done: bool,
    /// Compiled, anchored query patterns for the current buffer
    cache: FxHashMap<(MatchMode, String), Regex>,
}

impl StreamMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with `content`.
    pub fn set(&mut self, content: impl Into<String>) {
        self.remaining = content.into();
        self.done = self.remaining.is_empty();
        self.cache.clear();
        tracing::debug!(len = self.remaining.len(), "matcher reset");
    }

    /// Check whether `pattern` matches at the front of the buffer, without consuming.
    ///
    /// Takes `&mut self` only to cache the compiled pattern; the buffer is
    /// left untouched.
    pub fn is_next(&mut self, pattern: &str, mode: MatchMode) -> Result<bool, LexError> {
        Ok(self.match_len(pattern, mode)?.is_some())
    }

    /// Consume and return the prefix matched by `pattern`.
    ///
    /// `Ok(None)` means the pattern did not match; the buffer is unchanged.
    pub fn get_next(&mut self, pattern: &str, mode: MatchMode) -> Result<Option<String>, LexError> {
        let Some(len) = self.match_len(pattern, mode)? else {
            return Ok(None);
        };
        let matched: String = self.remaining.drain(..len).collect();
        if self.remaining.is_empty() {
            self.done = true;
        }
        Ok(Some(matched))
    }

    /// Check if the buffer has been fully consumed.
    pub fn is_end(&self) -> bool {
        self.done
    }

    /// The unconsumed part of the buffer.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    fn match_len(&mut self, pattern: &str, mode: MatchMode) -> Result<Option<usize>, LexError> {
        if self.done {
            return Err(LexError::PrematureEndOfInput);
        }
        let regex = self.compile(pattern, mode)?;
        let len = regex.find(&self.remaining).map(|m| m.end());
        tracing::trace!(pattern, ?mode, matched = len.is_some(), "matcher query");
        Ok(len)
    }

    fn compile(&mut self, pattern: &str, mode: MatchMode) -> Result<Regex, LexError> {
        let key = (mode, pattern.to_string());
        if let Some(regex) = self.cache.get(&key) {
            return Ok(regex.clone());
        }
        let body = match mode {
            MatchMode::Literal => regex::escape(pattern),
            MatchMode::Regex => pattern.to_string(),
        };
        let regex = Regex::new(&format!(r"\A(?:{body})")).map_err(|source| {
            LexError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        if self.cache.len() >= MAX_CACHED {
            self.cache.clear();
        }
        self.cache.insert(key, regex.clone());
        Ok(regex)
    }
}
