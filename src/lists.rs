use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::parser::parse_problems;
use crate::problem::ProblemRecord;

static LISTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lists");

/// Problem lists shipped inside the binary
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BundledList {
    #[default]
    TopInterview,
    Starter,
}

impl BundledList {
    fn file_name(&self) -> &'static str {
        match self {
            BundledList::TopInterview => "top_interview.csv",
            BundledList::Starter => "starter.csv",
        }
    }

    /// Raw CSV text of the embedded list
    pub fn text(&self) -> Result<&'static str> {
        LISTS_DIR
            .get_file(self.file_name())
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| DashError::MissingList(self.to_string()))
    }

    pub fn load(&self) -> Result<Vec<ProblemRecord>> {
        Ok(parse_problems(self.text()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Difficulty;
    use itertools::Itertools;

    #[test]
    fn test_every_bundled_list_parses_cleanly() {
        for list in BundledList::value_variants() {
            let text = list.text().unwrap();
            let data_lines = text.lines().skip(1).filter(|l| !l.is_empty()).count();
            let records = list.load().unwrap();
            assert_eq!(records.len(), data_lines, "{list} dropped rows");
        }
    }

    #[test]
    fn test_bundled_links_are_unique() {
        for list in BundledList::value_variants() {
            let records = list.load().unwrap();
            assert!(records.iter().map(|r| &r.link).all_unique(), "{list}");
        }
    }

    #[test]
    fn test_top_interview_contents() {
        let records = BundledList::TopInterview.load().unwrap();
        let first = &records[0];
        assert_eq!(first.title, "Two Sum");
        assert_eq!(first.difficulty, Difficulty::Easy);
        assert!((first.acceptance_rate - 55.31).abs() < 1e-9);
        assert_eq!(first.topics, vec!["Array", "Hash Table"]);

        let nim = records.iter().find(|r| r.title == "Nim Game").unwrap();
        assert_eq!(nim.topics, vec!["Math", "Brainteaser", "Game Theory"]);
    }

    #[test]
    fn test_display_matches_cli_name() {
        assert_eq!(BundledList::TopInterview.to_string(), "top-interview");
        assert_eq!(BundledList::Starter.to_string(), "starter");
        assert_eq!(
            BundledList::from_str("top-interview", false).unwrap(),
            BundledList::TopInterview
        );
    }
}
