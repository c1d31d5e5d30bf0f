use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::variables::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const CANDIDATES: [&str; 4] = ["glen.toml", "glen.json", "glen.yaml", "glen.yml"];

/// Configuration file structure for Glen.
///
/// Every value can also be given on the command line, which takes precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub repo: RepoConfig,

    #[serde(default)]
    pub variables: VariablesConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabConfig {
    /// GitLab personal access token
    pub token: Option<String>,

    /// API origin to use instead of `https://<remote host>`
    pub api_url: Option<String>,

    /// Variables requested per API page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepoConfig {
    /// Path inside the git checkout
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Name of the GitLab remote
    #[serde(default = "default_remote_name")]
    pub remote_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VariablesConfig {
    /// Merge in parent group variables
    #[serde(default)]
    pub recurse: bool,

    /// Only collect parent group variables
    #[serde(default)]
    pub group_only: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `export KEY="VALUE"` lines, ready for `eval`
    #[default]
    Export,
    Json,
    Table,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: None,
            page_size: default_page_size(),
        }
    }
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            remote_name: default_remote_name(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_remote_name() -> String {
    "origin".to_string()
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path (must exist)
    /// 2. ./glen.toml, ./glen.json, ./glen.yaml, ./glen.yml
    /// 3. `<user config dir>/glen/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let found = Self::find_in(Path::new(".")).or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join("glen").join("config.toml"))
                .filter(|path| path.exists())
        });

        match found {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    fn find_in(dir: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.exists())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        let config: Self = match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.gitlab.page_size) {
            bail!(
                "Invalid configuration: page-size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.gitlab.page_size
            );
        }
        if self.gitlab.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            bail!("Invalid configuration: gitlab token is empty");
        }
        Ok(())
    }
}
