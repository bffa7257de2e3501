//! Token rule tables.
//!
//! A [`RuleSet`] is an ordered list of named patterns compiled into a single
//! anchored alternation. Declaration order is priority order: when two
//! rules match at the same position, the one declared first wins.

use crate::error::RuleError;
use regex::{Captures, Regex};
use smol_str::SmolStr;

/// A named pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub name: SmolStr,
    pub pattern: SmolStr,
}

impl TokenRule {
    pub fn new(name: impl Into<SmolStr>, pattern: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// The rule table of the procedural language, in priority order.
pub const STANDARD_RULES: &[(&str, &str)] = &[
    ("KEYWORD", r"(?:for|return)\b"),
    ("NUMBER", r"[0-9]+"),
    ("ASSIGN", r"="),
    ("END", r";"),
    ("SYMBOL", r"[(){}]"),
    ("ID", r"[A-Za-z_][A-Za-z0-9_]*"),
    ("UnaryOP", r"--|\+\+"),
    ("OP", r"[+\-*/]"),
    ("COND", r"==|!=|<=|>=|<|>"),
    ("NEWLINE", r"\r\n|\n"),
    ("SPACE", r"[ \t]+"),
    ("OTHER", r"."),
];

/// Prefix of the capture groups wrapping each rule in the combined pattern.
const GROUP_PREFIX: &str = "__rule";

lazy_static::lazy_static! {
    static ref STANDARD: RuleSet = RuleSet::builder()
        .rules(STANDARD_RULES.iter().copied())
        .skip("SPACE")
        .skip("NEWLINE")
        .newline("NEWLINE")
        .catch_all("OTHER")
        .build()
        .expect("standard rule table is valid");
}

/// A compiled, ordered rule table plus the roles some rules play.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<TokenRule>,
    regex: Regex,
    /// Capture group index of each rule, parallel to `rules`
    groups: Vec<usize>,
    skipped: Vec<bool>,
    newline: Option<usize>,
    catch_all: Option<usize>,
}

impl RuleSet {
    /// The standard rule table of the language.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Create a builder for a custom rule table.
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&TokenRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub(crate) fn rule(&self, index: usize) -> &TokenRule {
        &self.rules[index]
    }

    /// Match the combined alternation at the start of `input`.
    pub(crate) fn captures<'h>(&self, input: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(input)
    }

    /// Find which rule produced `caps`, returning its index and matched text.
    pub(crate) fn matched<'h>(&self, caps: &Captures<'h>) -> Option<(usize, &'h str)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(index, &group)| caps.get(group).map(|m| (index, m.as_str())))
    }

    pub(crate) fn is_skipped(&self, index: usize) -> bool {
        self.skipped[index]
    }

    pub(crate) fn is_newline(&self, index: usize) -> bool {
        self.newline == Some(index)
    }

    pub(crate) fn is_catch_all(&self, index: usize) -> bool {
        self.catch_all == Some(index)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`RuleSet`].
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    rules: Vec<TokenRule>,
    skip: Vec<SmolStr>,
    newline: Option<SmolStr>,
    catch_all: Option<SmolStr>,
}

impl RuleSetBuilder {
    /// Append a rule; later rules have lower priority.
    pub fn rule(mut self, name: impl Into<SmolStr>, pattern: impl Into<SmolStr>) -> Self {
        self.rules.push(TokenRule::new(name, pattern));
        self
    }

    pub fn rules<N, P>(mut self, rules: impl IntoIterator<Item = (N, P)>) -> Self
    where
        N: Into<SmolStr>,
        P: Into<SmolStr>,
    {
        self.rules
            .extend(rules.into_iter().map(|(name, pattern)| TokenRule::new(name, pattern)));
        self
    }

    /// Matches of this rule advance the position but are never surfaced.
    pub fn skip(mut self, name: impl Into<SmolStr>) -> Self {
        self.skip.push(name.into());
        self
    }

    /// Matches of this rule start a new line.
    pub fn newline(mut self, name: impl Into<SmolStr>) -> Self {
        self.newline = Some(name.into());
        self
    }

    /// Matches of this rule are reported as unclassifiable input.
    pub fn catch_all(mut self, name: impl Into<SmolStr>) -> Self {
        self.catch_all = Some(name.into());
        self
    }

    pub fn build(self) -> Result<RuleSet, RuleError> {
        if self.rules.is_empty() {
            return Err(RuleError::NoRules);
        }

        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i].iter().any(|prior| prior.name == rule.name) {
                return Err(RuleError::DuplicateRule(rule.name.clone()));
            }
            // Compile each pattern on its own so a bad one is attributed to its rule.
            let own = Regex::new(&rule.pattern).map_err(|source| RuleError::InvalidPattern {
                rule: rule.name.clone(),
                source,
            })?;
            if let Some(group) = own
                .capture_names()
                .flatten()
                .find(|group| group.starts_with(GROUP_PREFIX))
            {
                return Err(RuleError::ReservedGroupName {
                    rule: rule.name.clone(),
                    group: SmolStr::from(group),
                });
            }
        }

        let index_of = |name: &SmolStr| {
            self.rules
                .iter()
                .position(|rule| &rule.name == name)
                .ok_or_else(|| RuleError::UnknownRule(name.clone()))
        };

        let mut skipped = vec![false; self.rules.len()];
        for name in &self.skip {
            skipped[index_of(name)?] = true;
        }
        let newline = self.newline.as_ref().map(index_of).transpose()?;
        let catch_all = self.catch_all.as_ref().map(index_of).transpose()?;
        if let Some(index) = catch_all {
            if index != self.rules.len() - 1 {
                return Err(RuleError::CatchAllNotLast(self.rules[index].name.clone()));
            }
        }

        let alternation = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("(?P<{GROUP_PREFIX}{i}>{})", rule.pattern))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"\A(?:{alternation})")).map_err(|source| {
            RuleError::InvalidPattern {
                rule: self.rules[0].name.clone(),
                source,
            }
        })?;

        let groups = (0..self.rules.len())
            .map(|i| {
                let name = format!("{GROUP_PREFIX}{i}");
                regex
                    .capture_names()
                    .position(|group| group == Some(name.as_str()))
                    .ok_or_else(|| RuleError::UnknownRule(self.rules[i].name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rules = self.rules.len(), "compiled rule set");

        Ok(RuleSet {
            rules: self.rules,
            regex,
            groups,
            skipped,
            newline,
            catch_all,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(rules: &RuleSet, input: &str) -> Option<(SmolStr, String)> {
        let caps = rules.captures(input)?;
        let (index, text) = rules.matched(&caps)?;
        Some((rules.rule(index).name.clone(), text.to_string()))
    }

    #[test]
    fn test_standard_table_order() {
        let rules = RuleSet::standard();
        let names: Vec<_> = rules.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "KEYWORD", "NUMBER", "ASSIGN", "END", "SYMBOL", "ID", "UnaryOP", "OP", "COND",
                "NEWLINE", "SPACE", "OTHER"
            ]
        );
    }

    #[test]
    fn test_each_rule_minimal_input() {
        let rules = RuleSet::standard();
        let cases = [
            ("return", "KEYWORD"),
            ("7", "NUMBER"),
            ("=", "ASSIGN"),
            (";", "END"),
            ("(", "SYMBOL"),
            ("x", "ID"),
            ("--", "UnaryOP"),
            ("*", "OP"),
            ("<=", "COND"),
            ("\r\n", "NEWLINE"),
            ("\t", "SPACE"),
            ("@", "OTHER"),
        ];
        for (input, expected) in cases {
            let (rule, text) = classify(&rules, input).unwrap();
            assert_eq!(rule, expected, "input {input:?}");
            assert_eq!(text, input);
        }
    }

    #[test]
    fn test_match_is_anchored() {
        let rules = RuleSet::builder().rule("NUMBER", "[0-9]+").build().unwrap();
        assert_eq!(classify(&rules, "x1"), None);
    }

    #[test]
    fn test_inner_groups_do_not_shift_rules() {
        let rules = RuleSet::builder()
            .rule("PAIR", "(a)(b)")
            .rule("C", "c")
            .build()
            .unwrap();
        assert_eq!(classify(&rules, "c"), Some(("C".into(), "c".into())));
        assert_eq!(classify(&rules, "ab"), Some(("PAIR".into(), "ab".into())));
    }

    #[test]
    fn test_roles() {
        let rules = RuleSet::standard();
        let newline = rules.rules().iter().position(|r| r.name == "NEWLINE").unwrap();
        let space = rules.rules().iter().position(|r| r.name == "SPACE").unwrap();
        assert!(rules.is_newline(newline));
        assert!(rules.is_skipped(newline));
        assert!(rules.is_skipped(space));
        assert!(!rules.is_newline(space));
        assert!(rules.is_catch_all(rules.rules().len() - 1));
        assert_eq!(rules.get("ID").map(|r| r.pattern.as_str()), Some("[A-Za-z_][A-Za-z0-9_]*"));
    }

    #[test]
    fn test_build_errors() {
        assert!(matches!(RuleSet::builder().build(), Err(RuleError::NoRules)));
        assert!(matches!(
            RuleSet::builder().rule("A", "a").rule("A", "b").build(),
            Err(RuleError::DuplicateRule(name)) if name == "A"
        ));
        assert!(matches!(
            RuleSet::builder().rule("A", "a").skip("B").build(),
            Err(RuleError::UnknownRule(name)) if name == "B"
        ));
        assert!(matches!(
            RuleSet::builder().rule("ANY", ".").rule("A", "a").catch_all("ANY").build(),
            Err(RuleError::CatchAllNotLast(name)) if name == "ANY"
        ));
        assert!(matches!(
            RuleSet::builder().rule("A", "a").rule("BAD", "(").build(),
            Err(RuleError::InvalidPattern { rule, .. }) if rule == "BAD"
        ));
    }

    #[test]
    fn test_user_groups_cannot_shadow_rule_groups() {
        assert!(matches!(
            RuleSet::builder().rule("A", "a").rule("B", "(?P<__rule0>b)").build(),
            Err(RuleError::ReservedGroupName { rule, group }) if rule == "B" && group == "__rule0"
        ));

        // Ordinary named groups inside a rule are fine.
        let rules = RuleSet::builder()
            .rule("A", "a")
            .rule("B", "(?P<r0>b)")
            .build()
            .unwrap();
        assert_eq!(classify(&rules, "b"), Some(("B".into(), "b".into())));
    }
}
