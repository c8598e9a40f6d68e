//! Configuration for the user profile module

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    value::Uncased,
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix for overrides, e.g. `USER_PROFILE_CUSTOMPROFILE__CACHE=false`
pub const ENV_PREFIX: &str = "USER_PROFILE_";

/// User profile module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Custom profile behaviour (`customProfile.*`)
    #[serde(default, rename = "customProfile")]
    pub custom_profile: CustomProfileConfig,

    /// Where field-definition documents are discovered
    #[serde(default)]
    pub schema: SchemaConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomProfileConfig {
    /// Keep the merged schema in the schema cache until invalidated
    #[serde(default = "default_true")]
    pub cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Logical namespace looked up under each search root
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// File extensions treated as field-definition documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Roots scanned by the filesystem locator, lowest priority first
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_profile: CustomProfileConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

impl Default for CustomProfileConfig {
    fn default() -> Self {
        Self { cache: true }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            extensions: default_extensions(),
            search_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Layer defaults, an optional YAML file and `USER_PROFILE_*` variables
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Yaml::file(path));
        }
        // `lowercase` must come after `map`, which resets it
        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| Uncased::from(env_key_path(key.as_str())))
                .lowercase(false),
        )
    }

    /// Extract the configuration from [`Config::figment`]
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        Ok(Self::figment(file).extract()?)
    }
}

/// `CUSTOMPROFILE__CACHE` -> `customProfile.cache`
fn env_key_path(key: &str) -> String {
    key.to_ascii_lowercase()
        .split("__")
        .map(|part| match part {
            "customprofile" => "customProfile",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn default_true() -> bool {
    true
}

fn default_namespace() -> String {
    "userProfile".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}
