//! Token classifier with one-token lookahead.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::rules::RuleSet;
use crate::token::Token;

/// Classifies source text into tokens on demand.
///
/// The next visible token is always classified ahead of time and held as
/// the lookahead, so [`peek`](Scanner::peek) never advances and
/// [`consume`](Scanner::consume) hands the lookahead over before
/// classifying the one after it.
#[derive(Debug, Clone)]
pub struct Scanner {
    rules: RuleSet,
    source: String,
    cursor: Cursor,
    lookahead: Option<Result<Token, LexError>>,
    /// Set once the iterator has yielded the held error
    reported: bool,
}

impl Scanner {
    /// Create a scanner over the standard rule table.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::standard())
    }

    /// Create a scanner over a custom rule table.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            source: String::new(),
            cursor: Cursor::default(),
            lookahead: None,
            reported: false,
        }
    }

    /// Start scanning `content`, discarding any previous scan.
    ///
    /// A classification error in the first token is held and reported by
    /// the next query.
    pub fn set(&mut self, content: impl Into<String>) {
        self.source = content.into();
        self.cursor = Cursor::default();
        self.reported = false;
        tracing::debug!(len = self.source.len(), "scanner reset");
        self.lookahead = self.cursor.next_token(&self.rules, &self.source);
    }

    /// Check whether the lookahead has rule name or lexeme `expected`.
    pub fn peek(&self, expected: &str) -> Result<bool, LexError> {
        match &self.lookahead {
            Some(Ok(token)) => Ok(token.matches(expected)),
            Some(Err(err)) => Err(err.clone()),
            None => Err(LexError::PrematureEndOfInput),
        }
    }

    /// Take the lookahead if it has rule name or lexeme `expected`.
    ///
    /// On a mismatch the lookahead stays in place and the error renders the
    /// offending source line with a caret under the token.
    pub fn consume(&mut self, expected: &str) -> Result<Token, LexError> {
        if let Some(Ok(token)) = &self.lookahead {
            if !token.matches(expected) {
                return Err(LexError::unexpected_token(
                    expected,
                    token.clone(),
                    &self.source,
                ));
            }
        }
        self.advance()
    }

    /// Take the lookahead whatever it is.
    pub fn advance(&mut self) -> Result<Token, LexError> {
        match self.lookahead.take() {
            Some(Ok(token)) => {
                self.lookahead = self.cursor.next_token(&self.rules, &self.source);
                Ok(token)
            }
            Some(Err(err)) => {
                self.lookahead = Some(Err(err.clone()));
                Err(err)
            }
            None => Err(LexError::PrematureEndOfInput),
        }
    }

    /// Check if every visible token has been consumed.
    pub fn is_end(&self) -> bool {
        self.lookahead.is_none()
    }

    /// The next unconsumed token, if it classified successfully.
    pub fn lookahead(&self) -> Option<&Token> {
        self.lookahead.as_ref().and_then(|result| result.as_ref().ok())
    }

    /// Get the source text of the current scan.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Yields the remaining tokens, ending after the first error.
///
/// The error stays in the lookahead, so `peek` and `consume` keep
/// reporting it after iteration stops.
impl Iterator for Scanner {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reported {
            return None;
        }
        let result = self.advance();
        match result {
            Err(LexError::PrematureEndOfInput) => None,
            Err(err) => {
                self.reported = true;
                Some(Err(err))
            }
            ok => Some(ok),
        }
    }
}
