use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    /// Directory holding the `google/` and `discord/` templates
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// Teams (or raw group addresses) whose members the bot never touches
    #[serde(default)]
    pub teams_to_skip: Vec<String>,
    #[serde(default)]
    pub teams: BTreeMap<String, TeamConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token (can also be passed through DISCORD_TOKEN)
    #[serde(default)]
    pub token: Option<String>,
    /// Prefix for text commands
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub roles: RolesConfig,
}

fn default_prefix() -> String {
    "!".to_string()
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            prefix: default_prefix(),
            roles: RolesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolesConfig {
    /// Roles every provisioned member receives
    #[serde(default)]
    pub default: Vec<String>,
    /// Roles allowed to run management commands
    #[serde(default)]
    pub admin: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Primary domain new accounts are created in
    #[serde(default)]
    pub domain: String,
    /// Super admin impersonated for Directory API calls
    #[serde(default)]
    pub admin_email: String,
    #[serde(default = "default_customer")]
    pub customer: String,
    /// Path to the service account JSON key (domain-wide delegation enabled)
    #[serde(default = "default_key_path")]
    pub service_account_key: PathBuf,
    /// Custom schema holding the Discord id and pseudo
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Wait between account creation and signature update, in seconds
    #[serde(default = "default_signature_delay")]
    pub signature_delay_secs: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_customer() -> String {
    "my_customer".to_string()
}

fn default_key_path() -> PathBuf {
    PathBuf::from("service_account.json")
}

fn default_schema() -> String {
    "discord".to_string()
}

fn default_signature_delay() -> u64 {
    5
}

fn default_timeout() -> u64 {
    30
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            admin_email: String::new(),
            customer: default_customer(),
            service_account_key: default_key_path(),
            schema: default_schema(),
            signature_delay_secs: default_signature_delay(),
            timeout: default_timeout(),
        }
    }
}

/// One team: its Google group, Discord role and welcome message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Google group address
    pub google_email: String,
    /// Title shown in signatures; teams without one are not team roles
    #[serde(default)]
    pub team_role: Option<String>,
    /// Discord role name
    pub discord: String,
    /// Template under `discord/` sent to new members
    #[serde(default)]
    pub message_template: Option<String>,
}

impl TeamConfig {
    pub fn is_team_role(&self) -> bool {
        self.team_role.as_deref().is_some_and(|r| !r.is_empty())
    }
}

impl Config {
    /// Get the project directories
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "workspace-bot", "workspace-bot")
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs().context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))
        } else if path.is_some() {
            bail!("Config file not found: {:?}", config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Look up a team by name
    pub fn team(&self, name: &str) -> Option<&TeamConfig> {
        self.teams.get(name)
    }

    /// Group addresses whose members are exempt from management
    pub fn skipped_groups(&self) -> Vec<String> {
        self.teams_to_skip
            .iter()
            .map(|entry| match self.teams.get(entry) {
                Some(team) => team.google_email.to_lowercase(),
                None => entry.to_lowercase(),
            })
            .collect()
    }

    /// Check the settings the bot cannot run without
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.google.domain.is_empty() {
            problems.push("google.domain is not set".to_string());
        }
        if self.google.admin_email.is_empty() {
            problems.push("google.admin_email is not set".to_string());
        }
        if self.teams.is_empty() {
            problems.push("no teams configured".to_string());
        }
        for entry in &self.teams_to_skip {
            if !self.teams.contains_key(entry) && !entry.contains('@') {
                problems.push(format!(
                    "teams_to_skip entry '{}' is neither a team nor a group address",
                    entry
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            bail!("Invalid configuration:\n  - {}", problems.join("\n  - "))
        }
    }
}
