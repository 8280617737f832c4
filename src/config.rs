use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::license::groups::DEFAULT_FREE_GROUPS;
use crate::vote::DEFAULT_THRESHOLD;

const DEFAULT_LICENSE_GROUPS_URL: &str =
    "https://gitweb.gentoo.org/repo/gentoo.git/plain/profiles/license_groups";

/// Root configuration structure, deserialized from `.freedom-checkr/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub voting: VotingConfig,
    pub gentoo: GentooConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct VotingConfig {
    /// Share of free votes a project must strictly exceed to be called free.
    pub threshold: f64,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Where the Gentoo free-license identifiers come from.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GentooConfig {
    /// Fetched with `--online`.
    pub license_groups_url: String,
    /// Local copy, used when not online.
    pub license_groups_file: Option<PathBuf>,
    /// Groups whose members count as free.
    pub free_groups: Vec<String>,
}

impl Default for GentooConfig {
    fn default() -> Self {
        Self {
            license_groups_url: DEFAULT_LICENSE_GROUPS_URL.to_string(),
            license_groups_file: None,
            free_groups: DEFAULT_FREE_GROUPS.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        let threshold = self.voting.threshold;
        if !(0.0..1.0).contains(&threshold) {
            bail!("voting.threshold must be within [0, 1), got {}", threshold);
        }
        if self.gentoo.free_groups.is_empty() {
            bail!("gentoo.free-groups must name at least one group");
        }
        Ok(self)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.freedom-checkr/config.toml`
/// 3. `~/.config/freedom-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    load_config_with_home(project_path, config_override, dirs::home_dir())
}

fn load_config_with_home(
    project_path: &Path,
    config_override: Option<&Path>,
    home_dir: Option<PathBuf>,
) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".freedom-checkr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = home_dir {
        let home_config = home
            .join(".config")
            .join("freedom-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    config.validate()
}
