use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.quran.com/api/v4";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the SQLite store.
    pub data_dir: PathBuf,
    pub api_base_url: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("WIRD_DATA_DIR")
            .map(PathBuf::from)
            .ok()
            .unwrap_or_else(default_data_dir);

        let api_base_url =
            std::env::var("WIRD_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            data_dir,
            api_base_url,
            log_level,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("wird.db")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wird")
}
