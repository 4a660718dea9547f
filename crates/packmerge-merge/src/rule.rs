//! Conflict rules: glob patterns paired with a resolution strategy.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;

use crate::error::MergeError;

/// How a conflict on a path covered by a rule is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Keep the earliest candidate in input order, discard the rest.
    PickFirst,
    /// Concatenate the distinct contents in input order.
    Merge,
}

impl Strategy {
    /// Parse a strategy from its manifest name (`pick-first`, `merge`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pick-first" | "pickFirst" => Some(Self::PickFirst),
            "merge" => Some(Self::Merge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PickFirst => "pick-first",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled glob pattern and the strategy applied to paths it matches.
///
/// `*` and `?` never match `/`; `**` spans any number of segments, so
/// `**/libjsc.so` matches both `libjsc.so` and `lib/x86/libjsc.so`.
#[derive(Debug, Clone)]
pub struct ConflictRule {
    pattern: String,
    strategy: Strategy,
    matcher: GlobMatcher,
}

impl ConflictRule {
    pub fn new(pattern: &str, strategy: Strategy) -> Result<Self, MergeError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| MergeError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            strategy,
            matcher: glob.compile_matcher(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Conflict rules in declaration order; the first rule matching a path wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ConflictRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from `(pattern, strategy name)` pairs, failing on the
    /// first invalid pattern or unknown strategy.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, MergeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = Self::new();
        for (pattern, name) in pairs {
            let strategy = Strategy::parse(name).ok_or_else(|| MergeError::UnknownStrategy {
                name: name.to_string(),
                pattern: pattern.to_string(),
            })?;
            set.push(ConflictRule::new(pattern, strategy)?);
        }
        Ok(set)
    }

    pub fn push(&mut self, rule: ConflictRule) {
        self.rules.push(rule);
    }

    /// The first rule, in declaration order, whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<&ConflictRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConflictRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
