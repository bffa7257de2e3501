//! Token definitions.

use smol_str::SmolStr;
use std::fmt;

/// A classified unit of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Name of the rule that classified this token
    pub rule: SmolStr,
    /// The matched source text
    pub lexeme: SmolStr,
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    /// Byte range in the source
    pub span: std::ops::Range<usize>,
}

impl Token {
    pub fn new(
        rule: impl Into<SmolStr>,
        lexeme: impl Into<SmolStr>,
        line: usize,
        column: usize,
        span: std::ops::Range<usize>,
    ) -> Self {
        Self {
            rule: rule.into(),
            lexeme: lexeme.into(),
            line,
            column,
            span,
        }
    }

    /// Check whether `expected` names either this token's rule or its exact lexeme.
    ///
    /// Both comparisons are tried, so `"NUMBER"` and `"42"` both accept the
    /// token `42`.
    pub fn matches(&self, expected: &str) -> bool {
        self.rule == expected || self.lexeme == expected
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` ({}) at line {}, column {}",
            self.lexeme, self.rule, self.line, self.column
        )
    }
}
