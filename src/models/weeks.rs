//! Semester week sets and their textual form ("1-8,10,12-16").
//!
//! An empty set is meaningful: the entry recurs on every week.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Highest week number a set may hold.
pub const MAX_WEEK: u32 = 60;

/// Inclusive bounds of one `N` or `A-B` token; `None` when not numeric.
fn token_bounds(token: &str) -> Option<(u64, u64)> {
    match token.split_once('-') {
        Some((a, b)) => Some((a.trim().parse().ok()?, b.trim().parse().ok()?)),
        None => token.parse().ok().map(|w| (w, w)),
    }
}

fn tokens(input: &str) -> impl Iterator<Item = (u64, u64)> + '_ {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(token_bounds)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSet(BTreeSet<u32>);

impl WeekSet {
    /// The "every week" set.
    pub fn every_week() -> Self {
        Self::default()
    }

    pub fn is_every_week(&self) -> bool {
        self.0.is_empty()
    }

    /// Week filter predicate: empty set matches any week.
    pub fn includes(&self, week: u32) -> bool {
        self.0.is_empty() || self.0.contains(&week)
    }

    /// True when both sets share at least one explicit week.
    pub fn intersects(&self, other: &WeekSet) -> bool {
        self.0.iter().any(|w| other.0.contains(w))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &u32> {
        self.0.iter()
    }

    /// Parse the comma separated editing form.
    ///
    /// Each token is either `N` or an inclusive `A-B` range. Tokens that are
    /// not numbers are skipped, and a reversed range (`A > B`) contributes
    /// nothing. Tokens reaching past [`MAX_WEEK`] are skipped too. The
    /// result is deduplicated and sorted.
    pub fn parse(input: &str) -> Self {
        let mut weeks = BTreeSet::new();

        for (start, end) in tokens(input) {
            if start.max(end) > MAX_WEEK as u64 {
                continue;
            }
            weeks.extend(start as u32..=end as u32);
        }

        Self(weeks)
    }

    /// First week number in `input` above [`MAX_WEEK`], if any.
    pub fn out_of_range(input: &str) -> Option<u64> {
        tokens(input)
            .map(|(start, end)| start.max(end))
            .find(|w| *w > MAX_WEEK as u64)
    }

    /// Storage form: JSON array. Unreadable text falls back to "every week".
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str::<Vec<u32>>(raw)
            .map(|v| v.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        let v: Vec<u32> = self.0.iter().copied().collect();
        serde_json::to_string(&v).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromIterator<u32> for WeekSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Run-length form: consecutive weeks collapse into `A-B`.
impl fmt::Display for WeekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut runs: Vec<(u32, u32)> = Vec::new();

        for &w in &self.0 {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == w => *end = w,
                _ => runs.push((w, w)),
            }
        }

        let parts: Vec<String> = runs
            .into_iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{}-{}", start, end)
                }
            })
            .collect();

        write!(f, "{}", parts.join(","))
    }
}
