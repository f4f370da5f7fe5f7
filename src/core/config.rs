use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Log file; events go to stderr when unset
    #[serde(default = "default_log_path")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_links")]
    pub links: Vec<MenuLink>,
}

/// Entry on the logged-in main menu
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MenuLink {
    pub label: String,
    pub url: String,
}

// Default value functions
fn default_database_path() -> PathBuf {
    PathBuf::from("data/accounts.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_log_path() -> Option<PathBuf> {
    Some(PathBuf::from("pinledger.log"))
}

fn default_links() -> Vec<MenuLink> {
    const VIDEO: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&ab_channel=RickAstley";

    let mut links: Vec<MenuLink> = (1..=4)
        .map(|n| MenuLink {
            label: format!("Video {}", n),
            url: VIDEO.to_string(),
        })
        .collect();

    links.push(MenuLink {
        label: "Cat 1".to_string(),
        url: "https://drive.google.com/file/d/10WXq4WZX0j365DwTPbYnXTkxaX0HtDxw/view?usp=sharing"
            .to_string(),
    });
    links.push(MenuLink {
        label: "Cat 2".to_string(),
        url: "https://drive.google.com/file/d/13zeFjUGoa59GM0acTMV8tX3t0_4FS1N9/view?usp=sharing"
            .to_string(),
    });

    links
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            path: default_log_path(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            links: default_links(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to built-in defaults
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Replace the database path (command line `--database`) and re-validate
    pub fn with_database(mut self, path: PathBuf) -> Result<Self> {
        self.database.path = path;
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            bail!("database path must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        for link in &self.menu.links {
            if link.label.trim().is_empty() {
                bail!("menu link label must not be empty (url: {})", link.url);
            }
            if !(link.url.starts_with("http://") || link.url.starts_with("https://")) {
                bail!(
                    "menu link '{}' has unsupported url '{}'. Must start with http:// or https://",
                    link.label,
                    link.url
                );
            }
        }

        Ok(())
    }
}
