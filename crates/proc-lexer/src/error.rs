//! Lexer error definitions.

use crate::token::Token;
use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// A fatal error raised while scanning or matching.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq)]
pub enum LexError {
    #[error("unrecognized token: `{value}`")]
    #[diagnostic(
        code(proc_lexer::unclassifiable),
        help("no token rule accepts this character")
    )]
    UnclassifiableCharacter {
        value: SmolStr,
        line: usize,
        column: usize,
    },

    #[error("expected `{expected}` but found {found}\n{line_text}\n{marker}")]
    #[diagnostic(code(proc_lexer::unexpected_token))]
    UnexpectedToken {
        expected: SmolStr,
        found: Token,
        line_text: String,
        marker: String,
    },

    #[error("already at end of input")]
    #[diagnostic(code(proc_lexer::end_of_input))]
    PrematureEndOfInput,

    #[error("rule `{rule}` matched an empty string")]
    #[diagnostic(
        code(proc_lexer::empty_match),
        help("token rules must consume at least one character")
    )]
    EmptyMatch {
        rule: SmolStr,
        line: usize,
        column: usize,
    },

    #[error("invalid pattern `{pattern}`")]
    #[diagnostic(code(proc_lexer::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl LexError {
    /// Build an `UnexpectedToken` error, rendering the offending source line
    /// with a caret under the token's column.
    pub(crate) fn unexpected_token(expected: &str, found: Token, source: &str) -> Self {
        let line_text = source
            .lines()
            .nth(found.line - 1)
            .unwrap_or_default()
            .to_string();
        let marker = format!("{}^", " ".repeat(found.column - 1));
        tracing::debug!(
            expected,
            found = %found,
            "lookahead does not satisfy expectation"
        );
        LexError::UnexpectedToken {
            expected: SmolStr::from(expected),
            found,
            line_text,
            marker,
        }
    }

    /// Get the 1-based `(line, column)` this error points at, if any.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            LexError::UnclassifiableCharacter { line, column, .. } => Some((*line, *column)),
            LexError::UnexpectedToken { found, .. } => Some((found.line, found.column)),
            LexError::EmptyMatch { line, column, .. } => Some((*line, *column)),
            LexError::PrematureEndOfInput => None,
            LexError::InvalidPattern { .. } => None,
        }
    }
}

/// An error raised while building a [`RuleSet`](crate::RuleSet).
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum RuleError {
    #[error("a rule set needs at least one rule")]
    #[diagnostic(code(proc_lexer::rules::empty))]
    NoRules,

    #[error("rule `{0}` is declared more than once")]
    #[diagnostic(code(proc_lexer::rules::duplicate))]
    DuplicateRule(SmolStr),

    #[error("`{0}` does not name a declared rule")]
    #[diagnostic(code(proc_lexer::rules::unknown))]
    UnknownRule(SmolStr),

    #[error("catch-all rule `{0}` must be declared last")]
    #[diagnostic(code(proc_lexer::rules::catch_all_order))]
    CatchAllNotLast(SmolStr),

    #[error("rule `{rule}` uses reserved group name `{group}`")]
    #[diagnostic(
        code(proc_lexer::rules::reserved_group),
        help("rename the capture group; names starting with `__rule` are reserved")
    )]
    ReservedGroupName { rule: SmolStr, group: SmolStr },

    #[error("rule `{rule}` has an invalid pattern")]
    #[diagnostic(code(proc_lexer::rules::invalid_pattern))]
    InvalidPattern {
        rule: SmolStr,
        #[source]
        source: regex::Error,
    },
}
