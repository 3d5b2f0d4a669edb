use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::ParamType;

pub const CONFIG_FILE_NAME: &str = ".loccatrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Fully qualified name of the generated registry type.
    #[serde(default = "default_manager_name")]
    pub manager_name: String,
    /// Property name to type string.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Falls back to the first configured locale when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default = "default_localization_directory")]
    pub localization_directory: String,
    #[serde(default = "default_location_format")]
    pub location_format: String,
    #[serde(default)]
    pub bot_package: String,
    #[serde(default = "default_contracts")]
    pub contracts: String,
}

fn default_manager_name() -> String {
    "localization.LocalizationManager".to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en-US".to_string()]
}

fn default_localization_directory() -> String {
    "localization".to_string()
}

fn default_location_format() -> String {
    "%locale%/%name%.yaml".to_string()
}

fn default_contracts() -> String {
    "contracts.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manager_name: default_manager_name(),
            properties: BTreeMap::new(),
            locales: default_locales(),
            default_locale: None,
            localization_directory: default_localization_directory(),
            location_format: default_location_format(),
            bot_package: String::new(),
            contracts: default_contracts(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            bail!("'locales' must list at least one locale");
        }

        let mut seen = HashSet::new();
        for locale in &self.locales {
            if locale.trim().is_empty() {
                bail!("'locales' contains an empty locale");
            }
            if !seen.insert(locale.as_str()) {
                bail!("Duplicate locale in 'locales': \"{}\"", locale);
            }
        }

        if let Some(default) = &self.default_locale
            && !self.locales.contains(default)
        {
            bail!(
                "'defaultLocale' \"{}\" is not listed in 'locales' ({})",
                default,
                self.locales.join(", ")
            );
        }

        if !self.location_format.contains("%name%") {
            bail!(
                "'locationFormat' must contain %name%: \"{}\"",
                self.location_format
            );
        }
        if self.locales.len() > 1 && !self.location_format.contains("%locale%") {
            bail!(
                "'locationFormat' must contain %locale% when more than one locale is configured: \"{}\"",
                self.location_format
            );
        }

        self.property_types()?;
        Ok(())
    }

    /// The fallback locale: the explicit default, or the first locale.
    pub fn default_locale(&self) -> &str {
        self.default_locale
            .as_deref()
            .or(self.locales.first().map(String::as_str))
            .unwrap_or_default()
    }

    /// Parses every declared property type.
    pub fn property_types(&self) -> Result<BTreeMap<String, ParamType>> {
        self.properties
            .iter()
            .map(|(name, ty)| -> Result<(String, ParamType)> {
                let parsed = ParamType::parse(ty)
                    .with_context(|| format!("Invalid type for property '{}': \"{}\"", name, ty))?;
                Ok((name.clone(), parsed))
            })
            .collect()
    }

    pub fn contracts_path(&self, root: &Path) -> PathBuf {
        root.join(&self.contracts)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file, or the start directory.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
