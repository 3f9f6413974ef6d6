use crate::error::{Result, SeatPlanError};
use seat_plan_common::SeatingConfig;
use std::path::{Path, PathBuf};

/// User configuration file (~/.config/seat-plan/config.json)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub seating: SeatingConfig,
    /// Where the configuration was read from; None means built-in defaults
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, or the default path when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(SeatPlanError::FileNotFound(path.display().to_string()));
                }
                Self::load_from(path)
            }
            None => {
                let default_path = Self::config_path()?;
                if default_path.exists() {
                    Self::load_from(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let seating = SeatingConfig::from_json(&content)?;
        log::debug!("config loaded from {}", path.display());
        Ok(Self {
            seating,
            source: Some(path.to_path_buf()),
        })
    }

    /// Write the current settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.seating)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SeatPlanError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("seat-plan").join("config.json"))
    }

    /// Apply a command-line block size override
    pub fn with_block_size(mut self, block_size: Option<usize>) -> Result<Self> {
        if let Some(size) = block_size {
            self.seating.students_per_block = size;
            self.seating.validate()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.seating.center_code = "9999".into();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.seating.center_code, "9999");
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/seat-plan.json")));
        assert!(matches!(result, Err(SeatPlanError::FileNotFound(_))));
    }

    #[test]
    fn test_block_size_override() {
        let config = Config::default().with_block_size(Some(12)).unwrap();
        assert_eq!(config.seating.students_per_block, 12);

        assert!(Config::default().with_block_size(Some(0)).is_err());
        let untouched = Config::default().with_block_size(None).unwrap();
        assert_eq!(untouched.seating.students_per_block, 30);
    }
}
