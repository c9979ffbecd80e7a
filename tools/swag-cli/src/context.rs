//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use swag_cache::FileStore;
use swag_commerce::cart::{CartStore, KvCartPersistence};
use swag_commerce::catalog::Catalog;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// The cart as the CLI opens it: one JSON file on disk.
pub type FileCart = CartStore<KvCartPersistence<FileStore>>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        match &config_path {
            Some(path) => debug!(path = %path.display(), "loaded config"),
            None => debug!("no config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory store paths are relative to: the config file's, else the
    /// working directory.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a configured path.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Load the product catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.resolve_path(&self.config.store.catalog);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog = Catalog::from_json(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        debug!(path = %path.display(), products = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Open the cart.
    pub fn cart(&self) -> Result<FileCart> {
        let path = self.resolve_path(&self.config.store.cart_file);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open cart storage: {}", path.display()))?;
        Ok(CartStore::open(KvCartPersistence::new(store)))
    }
}
