use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashError>;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bundled list not found: {0}")]
    MissingList(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(err: &DashError) -> &'static str {
        match err {
            DashError::Io(_) => "io",
            DashError::Sqlite(_) => "sqlite",
            DashError::Json(_) => "json",
            DashError::MissingList(_) => "missing-list",
        }
    }

    #[test]
    fn conversions_pick_the_matching_variant() {
        let io: DashError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert_eq!(kind(&io), "io");

        let json: DashError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert_eq!(kind(&json), "json");

        let sqlite: DashError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(kind(&sqlite), "sqlite");

        let missing = DashError::MissingList("starter".into());
        assert_eq!(kind(&missing), "missing-list");
        assert_eq!(missing.to_string(), "Bundled list not found: starter");
    }
}
