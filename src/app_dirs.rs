use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "leetdash";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/leetdash`, or the platform data dir without `$HOME`
    pub fn state_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            proj_dirs.data_local_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("leetdash_config.json")
        }
    }

    pub fn json_store_path() -> PathBuf {
        Self::state_dir().join("solved.json")
    }

    pub fn sqlite_store_path() -> PathBuf {
        Self::state_dir().join("solved.db")
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir().join("leetdash.log")
    }
}
