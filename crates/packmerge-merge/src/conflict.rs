//! Reporting of conflicting paths and how each was resolved.

use std::fmt;

use serde::Serialize;

/// How a conflicting path was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// A `pick-first` rule kept the earliest candidate.
    PickedFirst,
    /// A `merge` rule concatenated the candidates.
    Merged,
    /// No rule matched, but every candidate had the same bytes.
    Identical,
    /// No rule matched and the contents differ.
    Unresolved,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::PickedFirst => "picked first",
            Outcome::Merged => "merged",
            Outcome::Identical => "identical",
            Outcome::Unresolved => "UNRESOLVED",
        };
        f.write_str(s)
    }
}

/// One path claimed by two or more candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathConflict {
    pub path: String,
    pub outcome: Outcome,
    /// Pattern of the rule that decided the outcome, if any.
    pub rule: Option<String>,
    /// Every contributing origin, in input order.
    pub origins: Vec<String>,
    /// Origin of the surviving candidate. `None` when merged or unresolved.
    pub kept: Option<String>,
}

/// All conflicts found during one packaging pass, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<PathConflict>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, conflict: PathConflict) {
        self.conflicts.push(conflict);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// Conflicts that no rule covers and whose contents differ.
    pub fn unresolved(&self) -> impl Iterator<Item = &PathConflict> {
        self.conflicts
            .iter()
            .filter(|c| c.outcome == Outcome::Unresolved)
    }

    pub fn has_unresolved(&self) -> bool {
        self.unresolved().next().is_some()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No packaging conflicts.");
        }
        writeln!(f, "Packaging conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.outcome)?;
        if let Some(rule) = &self.rule {
            write!(f, " by `{rule}`")?;
        }
        if let Some(kept) = &self.kept {
            write!(f, ", kept {kept}")?;
        }
        write!(f, " [{}]", self.origins.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report() {
        let report = ConflictReport::new();
        assert!(report.is_empty());
        assert!(!report.has_unresolved());
        assert_eq!(report.to_string(), "No packaging conflicts.");
    }

    #[test]
    fn report_lists_each_conflict() {
        let mut report = ConflictReport::new();
        report.add(PathConflict {
            path: "lib/x86/libjsc.so".to_string(),
            outcome: Outcome::PickedFirst,
            rule: Some("**/libjsc.so".to_string()),
            origins: vec!["a".to_string(), "b".to_string()],
            kept: Some("a".to_string()),
        });
        report.add(PathConflict {
            path: "lib/x86/libfoo.so".to_string(),
            outcome: Outcome::Unresolved,
            rule: None,
            origins: vec!["a".to_string(), "c".to_string()],
            kept: None,
        });
        assert_eq!(report.len(), 2);
        assert!(report.has_unresolved());
        assert_eq!(report.unresolved().count(), 1);
        let s = report.to_string();
        assert!(s.contains("Packaging conflicts (2):"));
        assert!(s.contains("lib/x86/libjsc.so: picked first by `**/libjsc.so`, kept a [a, b]"));
        assert!(s.contains("lib/x86/libfoo.so: UNRESOLVED [a, c]"));
    }
}
