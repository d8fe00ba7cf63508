//! Name matching predicate shared by every lookup path
//!
//! The default mode is the subsequence match editors expect while typing:
//! `"nnint"` matches `non_neg_integer`, `"Str"` matches `struct`.

use serde::{Deserialize, Serialize};

/// Tests a candidate name against the typed hint
pub trait NameMatcher: Send + Sync {
    fn matches(&self, name: &str, hint: &str) -> bool;
}

/// Matching strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchMode {
    /// First character equal ignoring ASCII case, rest of the hint a subsequence of the name
    #[default]
    Subsequence,
    /// Case-sensitive prefix
    Prefix,
    /// Prefix, or the name's leading chars within `max_distance` edits of the hint
    Levenshtein { max_distance: usize },
}

/// Configurable fuzzy matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher {
    mode: MatchMode,
}

impl FuzzyMatcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }
}

impl NameMatcher for FuzzyMatcher {
    fn matches(&self, name: &str, hint: &str) -> bool {
        if hint.is_empty() {
            return true;
        }
        match self.mode {
            MatchMode::Subsequence => subsequence_match(name, hint),
            MatchMode::Prefix => name.starts_with(hint),
            MatchMode::Levenshtein { max_distance } => {
                if name.starts_with(hint) {
                    return true;
                }
                let head: String = name.chars().take(hint.chars().count()).collect();
                strsim::levenshtein(&head, hint) <= max_distance
            }
        }
    }
}

fn subsequence_match(name: &str, hint: &str) -> bool {
    let mut name_chars = name.chars();
    let mut hint_chars = hint.chars();

    match (name_chars.next(), hint_chars.next()) {
        (Some(n), Some(h)) if n.eq_ignore_ascii_case(&h) => {}
        _ => return false,
    }

    // Greedy scan is optimal for subsequence membership
    'hint: for h in hint_chars {
        for n in name_chars.by_ref() {
            if n.eq_ignore_ascii_case(&h) {
                continue 'hint;
            }
        }
        return false;
    }
    true
}
