use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub sort: SortConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colored console output
    pub use_color: bool,

    /// Print the column list after loading a file
    pub show_columns: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Column names recognized as the year part of the default ordering
    pub year_columns: Vec<String>,

    /// Column names recognized as the month part of the default ordering
    pub month_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            sort: SortConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_columns: true,
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            year_columns: vec!["arrival_date_year".to_string(), "year".to_string()],
            month_columns: vec!["arrival_date_month".to_string(), "month".to_string()],
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("nullsweep").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# nullsweep Configuration File
# Location: ~/.config/nullsweep/config.toml (Linux/macOS)
#           %APPDATA%\nullsweep\config.toml (Windows)

[display]
# Use colored console output
# Set to false for plain text (better for piping/logs)
use_color = true

# Print the column list after loading a file
show_columns = true

[sort]
# Column names recognized for the default chronological ordering, applied
# when no explicit --sort column is given and the dataset carries one of
# each. The month column is expected to hold full English month names.
year_columns = ["arrival_date_year", "year"]
month_columns = ["arrival_date_month", "month"]
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.display.use_color);
        assert!(config
            .sort
            .year_columns
            .contains(&"arrival_date_year".to_string()));
        assert!(config
            .sort
            .month_columns
            .contains(&"arrival_date_month".to_string()));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.display.use_color, parsed.display.use_color);
        assert_eq!(config.sort.year_columns, parsed.sort.year_columns);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[display]\nuse_color = false\n").unwrap();
        assert!(!parsed.display.use_color);
        assert!(parsed.display.show_columns);
        assert!(!parsed.sort.month_columns.is_empty());
    }

    #[test]
    fn test_commented_default_parses() {
        let parsed: Config = toml::from_str(&Config::create_default_with_comments()).unwrap();
        assert_eq!(parsed.sort.year_columns, Config::default().sort.year_columns);
    }
}
