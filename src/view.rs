use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::problem::ProblemRecord;

/// Column the problem table is ordered by
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Difficulty,
    #[default]
    Frequency,
    #[strum(serialize = "Acceptance")]
    AcceptanceRate,
}

impl SortKey {
    /// Direction a key starts in when it is first selected
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortKey::Difficulty => SortDirection::Ascending,
            SortKey::Frequency | SortKey::AcceptanceRate => SortDirection::Descending,
        }
    }

    pub fn project(&self, record: &ProblemRecord) -> f64 {
        match self {
            SortKey::Difficulty => record.difficulty.rank() as f64,
            SortKey::Frequency => record.frequency,
            SortKey::AcceptanceRate => record.acceptance_rate,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Active sort key plus direction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    /// Selecting a new key resets to its default direction,
    /// re-selecting the active key flips the direction.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            *self = SortState::new(key);
        }
    }

    /// Total order over the projected values. NaN sorts after every number
    /// in both directions and ties with other NaNs.
    pub fn compare(&self, a: &ProblemRecord, b: &ProblemRecord) -> Ordering {
        let (x, y) = (self.key.project(a), self.key.project(b));
        match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self.direction {
                SortDirection::Ascending => x.total_cmp(&y),
                SortDirection::Descending => y.total_cmp(&x),
            },
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(SortKey::default())
    }
}

/// Indices into `records` of the filtered, sorted view
pub fn derive_view_indices(
    records: &[ProblemRecord],
    selected_tags: &BTreeSet<String>,
    sort: SortState,
) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| selected_tags.is_empty() || r.has_any_topic(selected_tags))
        .map(|(i, _)| i)
        .collect();

    // sort_by is stable
    indices.sort_by(|&a, &b| sort.compare(&records[a], &records[b]));
    indices
}

/// Records matching any selected tag, ordered by `sort`.
/// An empty tag set keeps every record.
pub fn derive_view<'a>(
    records: &'a [ProblemRecord],
    selected_tags: &BTreeSet<String>,
    sort: SortState,
) -> Vec<&'a ProblemRecord> {
    derive_view_indices(records, selected_tags, sort)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Every topic across `records`, deduplicated and sorted
pub fn collect_tags(records: &[ProblemRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.topics.iter())
        .sorted()
        .dedup()
        .cloned()
        .collect()
}
