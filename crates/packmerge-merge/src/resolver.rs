//! The packaging conflict resolver.
//!
//! Candidates are grouped by destination path, keeping input order inside
//! each group. A path with a single candidate passes through unchanged. For a
//! conflicting path the first matching rule decides; without a rule the
//! candidates must be byte-identical, otherwise resolution fails with
//! [`MergeError::UnresolvedConflict`].
//!
//! Groups are visited in lexicographic path order, so the result, the report
//! and the reported error are the same on every run for the same inputs.

use std::collections::BTreeMap;

use crate::candidate::CandidateFile;
use crate::conflict::{ConflictReport, Outcome, PathConflict};
use crate::error::MergeError;
use crate::rule::{RuleSet, Strategy};

/// The deduplicated output of a packaging pass: exactly one file per path.
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    entries: BTreeMap<String, CandidateFile>,
    report: ConflictReport,
}

impl MergeResult {
    pub fn get(&self, path: &str) -> Option<&CandidateFile> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Surviving files in path order.
    pub fn files(&self) -> impl Iterator<Item = &CandidateFile> {
        self.entries.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// How every conflicting path was resolved.
    pub fn report(&self) -> &ConflictReport {
        &self.report
    }

    pub fn into_files(self) -> impl Iterator<Item = CandidateFile> {
        self.entries.into_values()
    }
}

/// What to do with one conflicting group.
enum Decision {
    /// Keep the group member at this index.
    Keep(usize),
    /// Replace the group with concatenated content.
    Merge(Vec<u8>),
    Unresolved,
}

/// Resolve `candidates` into a [`MergeResult`] using `rules`.
///
/// `candidates` must be in a reproducible order; `pick-first` and `merge`
/// both follow it. On failure no partial result is returned.
pub fn resolve(candidates: Vec<CandidateFile>, rules: &RuleSet) -> Result<MergeResult, MergeError> {
    let total = candidates.len();
    let mut groups: BTreeMap<String, Vec<CandidateFile>> = BTreeMap::new();
    for candidate in candidates {
        groups
            .entry(candidate.path().to_string())
            .or_default()
            .push(candidate);
    }

    let mut result = MergeResult::default();
    for (path, mut group) in groups {
        if group.len() == 1 {
            result.entries.insert(path, group.remove(0));
            continue;
        }

        let members: Vec<&CandidateFile> = group.iter().collect();
        let (decision, conflict) = decide(&path, &members, rules);
        let survivor = match decision {
            Decision::Keep(index) => group.swap_remove(index),
            Decision::Merge(content) => {
                CandidateFile::new(&path, merged_origin(&conflict.origins), content)
            }
            Decision::Unresolved => {
                return Err(MergeError::UnresolvedConflict {
                    path,
                    origins: conflict.origins,
                });
            }
        };
        tracing::debug!(
            "Resolved conflict at {path}: {} ({} candidates)",
            conflict.outcome,
            conflict.origins.len()
        );
        result.report.add(conflict);
        result.entries.insert(path, survivor);
    }

    tracing::info!(
        "Merged {total} candidates into {} entries ({} conflicts resolved)",
        result.entries.len(),
        result.report.len()
    );
    Ok(result)
}

/// Report how every conflict among `candidates` would be resolved, without
/// failing on unresolved ones.
pub fn plan(candidates: &[CandidateFile], rules: &RuleSet) -> ConflictReport {
    let mut groups: BTreeMap<&str, Vec<&CandidateFile>> = BTreeMap::new();
    for candidate in candidates {
        groups.entry(candidate.path()).or_default().push(candidate);
    }

    let mut report = ConflictReport::new();
    for (path, group) in groups {
        if group.len() > 1 {
            let (_, conflict) = decide(path, &group, rules);
            report.add(conflict);
        }
    }
    report
}

fn decide(path: &str, group: &[&CandidateFile], rules: &RuleSet) -> (Decision, PathConflict) {
    let origins: Vec<String> = group.iter().map(|c| c.origin().to_string()).collect();
    let rule = rules.first_match(path);

    let (decision, outcome) = match rule.map(|r| r.strategy()) {
        Some(Strategy::PickFirst) => (Decision::Keep(0), Outcome::PickedFirst),
        Some(Strategy::Merge) => (Decision::Merge(concatenate(group)), Outcome::Merged),
        None if all_identical(group) => (Decision::Keep(0), Outcome::Identical),
        None => (Decision::Unresolved, Outcome::Unresolved),
    };

    let kept = match &decision {
        Decision::Keep(index) => Some(origins[*index].clone()),
        _ => None,
    };
    let conflict = PathConflict {
        path: path.to_string(),
        outcome,
        rule: rule.map(|r| r.pattern().to_string()),
        origins,
        kept,
    };
    (decision, conflict)
}

fn all_identical(group: &[&CandidateFile]) -> bool {
    group
        .split_first()
        .map(|(first, rest)| rest.iter().all(|c| c.content() == first.content()))
        .unwrap_or(true)
}

/// Concatenate distinct contents in input order, separating parts with a
/// newline when the previous part does not end with one.
fn concatenate(group: &[&CandidateFile]) -> Vec<u8> {
    let mut seen: Vec<&[u8]> = Vec::new();
    let mut out = Vec::new();
    for candidate in group {
        let content = candidate.content();
        if seen.contains(&content) {
            continue;
        }
        if !out.is_empty() && !out.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(content);
        seen.push(content);
    }
    out
}

fn merged_origin(origins: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for origin in origins {
        if !unique.contains(&origin.as_str()) {
            unique.push(origin);
        }
    }
    unique.join("+")
}
