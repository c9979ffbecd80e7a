//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use swag_commerce::quote::DEFAULT_SALES_EMAIL;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["swag.toml", ".swag.toml", "swag.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the catalog and cart live.
    #[serde(default)]
    pub store: StoreConfig,

    /// Quote and order mail settings.
    #[serde(default)]
    pub mail: MailConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage locations, relative to the config file's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Product list (JSON array).
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Cart storage file.
    #[serde(default = "default_cart_file")]
    pub cart_file: String,
}

fn default_catalog() -> String {
    "data/catalog.json".to_string()
}

fn default_cart_file() -> String {
    ".swag/cart.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            cart_file: default_cart_file(),
        }
    }
}

/// Mail hand-off settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sales inbox receiving quotes and orders.
    #[serde(default = "default_mail_to")]
    pub to: String,

    /// Optional copy recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
}

fn default_mail_to() -> String {
    DEFAULT_SALES_EMAIL.to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            to: default_mail_to(),
            cc: None,
        }
    }
}

impl MailConfig {
    /// The copy recipient, ignoring a blank entry.
    pub fn cc(&self) -> Option<&str> {
        self.cc.as_deref().map(str::trim).filter(|cc| !cc.is_empty())
    }
}

/// Generate a default swag.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Swag storefront configuration

[store]
# Product list, relative to this file
catalog = "{catalog}"
# Cart storage, created on first use
cart_file = "{cart_file}"

[mail]
to = "{to}"
# cc = "compras@tuempresa.cl"
"#,
        catalog = default_catalog(),
        cart_file = default_cart_file(),
        to = DEFAULT_SALES_EMAIL,
    )
}
