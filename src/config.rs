use crate::error::{CompendiumError, Result};
use compendium_images_common::policy::{DEFAULT_ASK_THRESHOLD, DEFAULT_AUTO_THRESHOLD};
use compendium_images_common::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 出力ファイル名（デフォルト）
pub const DEFAULT_OUTPUT: &str = "with_images.compendium";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auto_threshold: u8,
    pub ask_threshold: u8,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_threshold: DEFAULT_AUTO_THRESHOLD,
            ask_threshold: DEFAULT_ASK_THRESHOLD,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 設定ファイルがなければデフォルト
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CompendiumError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("compendium-images").join("config.json"))
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.auto_threshold, self.ask_threshold)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [("auto_threshold", self.auto_threshold), ("ask_threshold", self.ask_threshold)] {
            if value > 100 {
                return Err(CompendiumError::Config(format!("{} は 0-100 で指定してください: {}", key, value)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.thresholds(), Thresholds::new(80, 50));
        assert_eq!(config.output, PathBuf::from("with_images.compendium"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            auto_threshold: 90,
            ask_threshold: 60,
            output: PathBuf::from("out.compendium"),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "ask_threshold": 40 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.auto_threshold, 80);
        assert_eq!(config.ask_threshold, 40);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CompendiumError::JsonParse(_))));
    }

    #[test]
    fn test_out_of_range_threshold_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "auto_threshold": 150 }"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(CompendiumError::Config(_))));
    }
}
