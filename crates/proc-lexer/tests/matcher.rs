//! End-to-end tests for the incremental matcher.

use proc_lexer::{LexError, MatchMode, StreamMatcher};

#[test]
fn test_round_trip_to_end() {
    let mut matcher = StreamMatcher::new();
    matcher.set("asd 123");
    assert_eq!(
        matcher.get_next("asd", MatchMode::Literal).unwrap().as_deref(),
        Some("asd")
    );
    assert_eq!(
        matcher.get_next(" ", MatchMode::Literal).unwrap().as_deref(),
        Some(" ")
    );
    assert_eq!(
        matcher.get_next("[0-9]*", MatchMode::Regex).unwrap().as_deref(),
        Some("123")
    );
    assert!(matcher.is_end());
    assert_eq!(
        matcher.get_next(" ", MatchMode::Literal),
        Err(LexError::PrematureEndOfInput)
    );
}

#[test]
fn test_hand_written_production() {
    // assignment := ID " "* "=" " "* NUMBER ";"
    fn assignment(matcher: &mut StreamMatcher) -> Result<Option<(String, String)>, LexError> {
        let Some(name) = matcher.get_next("[A-Za-z_][A-Za-z0-9_]*", MatchMode::Regex)? else {
            return Ok(None);
        };
        matcher.get_next(" *", MatchMode::Regex)?;
        if matcher.get_next("=", MatchMode::Literal)?.is_none() {
            return Ok(None);
        }
        matcher.get_next(" *", MatchMode::Regex)?;
        let Some(value) = matcher.get_next("[0-9]+", MatchMode::Regex)? else {
            return Ok(None);
        };
        if matcher.get_next(";", MatchMode::Literal)?.is_none() {
            return Ok(None);
        }
        Ok(Some((name, value)))
    }

    let mut matcher = StreamMatcher::new();
    matcher.set("count = 10;rest");
    assert_eq!(
        assignment(&mut matcher).unwrap(),
        Some(("count".to_string(), "10".to_string()))
    );
    assert_eq!(matcher.remaining(), "rest");
    assert!(!matcher.is_end());
}

#[test]
fn test_reset_after_end() {
    let mut matcher = StreamMatcher::new();
    matcher.set("x");
    matcher.get_next("x", MatchMode::Literal).unwrap();
    assert!(matcher.is_end());

    matcher.set("y.z");
    assert!(matcher.is_next("y", MatchMode::Literal).unwrap());
    assert!(!matcher.is_next("y\\.", MatchMode::Literal).unwrap());
    assert!(matcher.is_next("y\\.", MatchMode::Regex).unwrap());
}
