use std::path::{Path, PathBuf};

use n0_error::Result;
use tracing::{info, warn};

use crate::config::Config;

// Repo builds up a series of file path conventions from a root directory path.
#[derive(Debug, Clone)]
pub struct Repo(PathBuf);

impl Repo {
    const CONFIG_FILE: &str = "config.yml";
    const LOGS_DIR: &str = "logs";

    pub fn default_location() -> PathBuf {
        dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("webook")
    }

    /// Opens or creates a repo at the given base directory.
    pub async fn open_or_create(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        tokio::fs::create_dir_all(&base_dir).await?;
        info!("opening repo at {}", base_dir.display());
        Ok(Self(base_dir))
    }

    /// Log directory under [`Repo::default_location`], usable before the repo is opened.
    pub fn default_logs_dir() -> PathBuf {
        Self::default_location().join(Self::LOGS_DIR)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Loads `config.yml`, writing the defaults first if it does not exist.
    pub async fn config(&self) -> Result<Config> {
        let config_file_path = self.0.join(Self::CONFIG_FILE);
        if !config_file_path.exists() {
            warn!("config file does not exist. writing defaults");
            let cfg = Config::default();
            cfg.write(config_file_path).await?;
            return Ok(cfg);
        };

        Config::from_file(config_file_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn config_is_created_on_first_open() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let repo = Repo::open_or_create(dir.path().join("nested")).await?;
        assert!(!repo.path().join("config.yml").exists());

        let config = repo.config().await?;
        assert_eq!(config, Config::default());
        assert!(repo.path().join("config.yml").exists());

        // second load reads the file instead of rewriting it
        let again = repo.config().await?;
        assert_eq!(again, config);
        Ok(())
    }
}
