//! # proc-lexer
//!
//! Lexical front end for a small procedural language.
//!
//! Two independent pieces live here:
//!
//! - [`Scanner`] classifies a whole source string into [`Token`]s using an
//!   ordered [`RuleSet`], holding one token of lookahead for a parser.
//! - [`StreamMatcher`] tests or consumes a prefix of a buffer against
//!   patterns supplied per query, for experimenting with grammar fragments.
//!
//! ## Example
//!
//! ```
//! use proc_lexer::Scanner;
//!
//! let mut scanner = Scanner::new();
//! scanner.set("for i = 0;");
//!
//! assert!(scanner.peek("KEYWORD").unwrap());
//! let keyword = scanner.consume("for").unwrap();
//! assert_eq!(keyword.rule, "KEYWORD");
//! assert_eq!(scanner.consume("ID").unwrap().lexeme, "i");
//! ```

mod cursor;
mod error;
mod matcher;
mod rules;
mod scanner;
mod token;

pub use error::{LexError, RuleError};
pub use matcher::{MatchMode, StreamMatcher};
pub use rules::{RuleSet, RuleSetBuilder, TokenRule, STANDARD_RULES};
pub use scanner::Scanner;
pub use token::Token;

/// Tokenize source code with the standard rule table.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut scanner = Scanner::new();
    scanner.set(source);
    scanner.collect()
}
