use serde::Serialize;

/// Problem difficulty as published by the source list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Numeric rank used when sorting by difficulty (Easy=1, Medium=2, Hard=3)
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Normalize a raw difficulty field.
    ///
    /// The field is matched upper-cased first and then title-cased, so
    /// `easy`, `EASY` and `Easy` all resolve. Anything else is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.to_uppercase().as_str() {
            "EASY" => return Some(Difficulty::Easy),
            "MEDIUM" => return Some(Difficulty::Medium),
            "HARD" => return Some(Difficulty::Hard),
            _ => {}
        }

        match title_case(raw).as_str() {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// One interview problem. `link` is the identity key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub difficulty: Difficulty,
    pub title: String,
    pub frequency: f64,
    pub acceptance_rate: f64,
    pub link: String,
    pub topics: Vec<String>,
}

impl ProblemRecord {
    pub fn has_any_topic<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter().any(|tag| self.topics.contains(tag))
    }
}
