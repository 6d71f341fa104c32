use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};

use crate::problem::{Difficulty, ProblemRecord};
use crate::solved::SolvedSet;
use crate::store::KeyValueStore;
use crate::view::{collect_tags, derive_view_indices, SortKey, SortState};

/// Solved counts for the progress header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub solved: usize,
    pub total: usize,
    /// (solved, total) per difficulty
    pub by_difficulty: HashMap<Difficulty, (usize, usize)>,
}

/// Owns the record set and every piece of state the view depends on.
///
/// The derived view is cached as indices into `records` and recomputed only
/// when the sort or tag filter changes.
pub struct Dashboard {
    records: Vec<ProblemRecord>,
    tags: Vec<String>,
    sort: SortState,
    selected_tags: BTreeSet<String>,
    solved: SolvedSet,
    store: Box<dyn KeyValueStore>,
    view: Vec<usize>,
}

impl Dashboard {
    pub fn new(records: Vec<ProblemRecord>, sort_key: SortKey, store: Box<dyn KeyValueStore>) -> Self {
        let solved = SolvedSet::load(store.as_ref());
        let tags = collect_tags(&records);
        info!(
            "dashboard ready: {} problems, {} tags, {} solved",
            records.len(),
            tags.len(),
            solved.len()
        );

        let mut dashboard = Self {
            records,
            tags,
            sort: SortState::new(sort_key),
            selected_tags: BTreeSet::new(),
            solved,
            store,
            view: Vec::new(),
        };
        dashboard.refresh_view();
        dashboard
    }

    fn refresh_view(&mut self) {
        self.view = derive_view_indices(&self.records, &self.selected_tags, self.sort);
        debug!(
            "view refreshed: {} of {} records, sort {} {}",
            self.view.len(),
            self.records.len(),
            self.sort.key,
            self.sort.direction.arrow()
        );
    }

    pub fn records(&self) -> &[ProblemRecord] {
        &self.records
    }

    /// Every selectable filter tag, sorted
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selected_tags.contains(tag)
    }

    pub fn current_view(&self) -> Vec<&ProblemRecord> {
        self.view.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn view_record(&self, position: usize) -> Option<&ProblemRecord> {
        self.view.get(position).map(|&i| &self.records[i])
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort.select(key);
        self.refresh_view();
    }

    /// Add `tag` to the filter, or remove it when already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.selected_tags.remove(tag) {
            self.selected_tags.insert(tag.to_string());
        }
        self.refresh_view();
    }

    pub fn clear_tags(&mut self) {
        if self.selected_tags.is_empty() {
            return;
        }
        self.selected_tags.clear();
        self.refresh_view();
    }

    pub fn is_solved(&self, link: &str) -> bool {
        self.solved.contains(link)
    }

    pub fn solved(&self) -> &SolvedSet {
        &self.solved
    }

    /// Flip the solved mark on `link` and persist the whole set.
    /// A failed write is logged; the in-memory toggle stands.
    pub fn toggle_solved(&mut self, link: &str) -> bool {
        let now_solved = self.solved.toggle(link);
        if let Err(e) = self.solved.save(self.store.as_mut()) {
            warn!("failed to persist solved list: {e}");
        }
        debug!("{link} solved={now_solved}");
        now_solved
    }

    /// Solved counts over the loaded records. Stale links in the store are ignored.
    pub fn progress(&self) -> Progress {
        let mut progress = Progress {
            total: self.records.len(),
            ..Progress::default()
        };
        for record in &self.records {
            let entry = progress
                .by_difficulty
                .entry(record.difficulty)
                .or_insert((0, 0));
            entry.1 += 1;
            if self.solved.contains(&record.link) {
                entry.0 += 1;
                progress.solved += 1;
            }
        }
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solved::SOLVED_KEY;
    use crate::store::MemoryStore;
    use crate::view::SortDirection;

    fn record(title: &str, difficulty: Difficulty, freq: f64, topics: &[&str]) -> ProblemRecord {
        ProblemRecord {
            difficulty,
            title: title.to_string(),
            frequency: freq,
            acceptance_rate: 50.0,
            link: format!("https://leetcode.com/problems/{}", title.to_lowercase()),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn dashboard_with(store: MemoryStore) -> Dashboard {
        let records = vec![
            record("alpha", Difficulty::Easy, 10.0, &["Array"]),
            record("beta", Difficulty::Hard, 90.0, &["Graph", "Array"]),
            record("gamma", Difficulty::Medium, 50.0, &["Math"]),
        ];
        Dashboard::new(records, SortKey::Frequency, Box::new(store))
    }

    fn titles(d: &Dashboard) -> Vec<String> {
        d.current_view().iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn initial_view_uses_key_default_direction() {
        let d = dashboard_with(MemoryStore::default());
        assert_eq!(d.sort().direction, SortDirection::Descending);
        assert_eq!(titles(&d), vec!["beta", "gamma", "alpha"]);
        assert_eq!(d.tags(), ["Array", "Graph", "Math"]);
    }

    #[test]
    fn set_sort_key_recomputes_view() {
        let mut d = dashboard_with(MemoryStore::default());
        d.set_sort_key(SortKey::Difficulty);
        assert_eq!(titles(&d), vec!["alpha", "gamma", "beta"]);
        d.set_sort_key(SortKey::Difficulty);
        assert_eq!(titles(&d), vec!["beta", "gamma", "alpha"]);
    }

    #[test]
    fn toggle_tag_filters_and_unfilters() {
        let mut d = dashboard_with(MemoryStore::default());
        d.toggle_tag("Array");
        assert!(d.is_tag_selected("Array"));
        assert_eq!(titles(&d), vec!["beta", "alpha"]);

        d.toggle_tag("Math");
        assert_eq!(d.view_len(), 3);

        d.toggle_tag("Array");
        assert_eq!(titles(&d), vec!["gamma"]);

        d.clear_tags();
        assert!(d.selected_tags().is_empty());
        assert_eq!(d.view_len(), 3);
    }

    #[test]
    fn unknown_tag_yields_empty_view() {
        let mut d = dashboard_with(MemoryStore::default());
        d.toggle_tag("Nonexistent");
        assert_eq!(d.view_len(), 0);
        assert!(d.view_record(0).is_none());
    }

    #[test]
    fn toggle_solved_persists_and_round_trips() {
        let mut d = dashboard_with(MemoryStore::default());
        let link = d.view_record(0).unwrap().link.clone();

        assert!(d.toggle_solved(&link));
        assert!(d.is_solved(&link));
        assert!(!d.toggle_solved(&link));
        assert!(!d.is_solved(&link));
        assert!(d.solved().is_empty());
    }

    #[test]
    fn solved_set_loaded_from_store() {
        let mut store = MemoryStore::default();
        store
            .save(SOLVED_KEY, "[\"https://leetcode.com/problems/gamma\", \"https://gone\"]")
            .unwrap();
        let d = dashboard_with(store);
        assert!(d.is_solved("https://leetcode.com/problems/gamma"));

        let progress = d.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.solved, 1);
        assert_eq!(progress.by_difficulty[&Difficulty::Medium], (1, 1));
        assert_eq!(progress.by_difficulty[&Difficulty::Easy], (0, 1));
    }

    #[test]
    fn solved_state_does_not_change_view() {
        let mut d = dashboard_with(MemoryStore::default());
        let before = titles(&d);
        d.toggle_solved("https://leetcode.com/problems/beta");
        assert_eq!(titles(&d), before);
    }

    #[test]
    fn empty_dashboard() {
        let d = Dashboard::new(Vec::new(), SortKey::Difficulty, Box::new(MemoryStore::default()));
        assert_eq!(d.view_len(), 0);
        assert!(d.tags().is_empty());
        assert_eq!(d.progress().total, 0);
    }
}
