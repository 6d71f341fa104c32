use log::warn;
use std::collections::BTreeSet;

use crate::error::Result;
use crate::store::KeyValueStore;

/// Storage key the solved checklist lives under
pub const SOLVED_KEY: &str = "solvedProblemLinks";

/// Links the user has marked as solved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolvedSet {
    links: BTreeSet<String>,
}

impl SolvedSet {
    /// Read the persisted checklist. Absent, unreadable or malformed
    /// values all yield an empty set.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.load(SOLVED_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("could not read solved list, starting empty: {e}");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(links) => Self {
                links: links.into_iter().collect(),
            },
            Err(e) => {
                warn!("ignoring malformed solved list: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let links: Vec<&String> = self.links.iter().collect();
        store.save(SOLVED_KEY, &serde_json::to_string(&links)?)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    /// Flip membership of `link`; returns whether it is now solved
    pub fn toggle(&mut self, link: &str) -> bool {
        if self.links.remove(link) {
            false
        } else {
            self.links.insert(link.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }
}
