//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shop_cache::FileStore;
use shop_commerce::cart::{Cart, CartTotals};
use shop_commerce::catalog::Catalog;
use shop_commerce::CartStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Demo catalog used when no catalog path is configured.
const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context, reading `config_path` or the nearest config file.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(&cwd, config_path, output)
    }

    fn load_from(cwd: &Path, config_path: Option<&Path>, output: Output) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(resolve(cwd, path)),
            None => CliConfig::find(cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Directory that relative paths in the config are resolved against:
    /// the config file's directory, or the working directory without one.
    pub fn config_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd)
    }

    /// Directory holding the storage slots.
    pub fn storage_dir(&self) -> PathBuf {
        resolve(self.config_dir(), &self.config.storage.dir)
    }

    /// Load the configured catalog, or the bundled demo catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = resolve(self.config_dir(), path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Invalid catalog: {}", path.display()))
            }
            None => Catalog::from_json(BUNDLED_CATALOG).context("Invalid bundled catalog"),
        }
    }

    /// Open the persisted cart, reporting notifications on the terminal.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let catalog = self.load_catalog()?;
        let dir = self.storage_dir();
        let store = FileStore::open(dir.clone())
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;

        let cart = CartStore::builder(catalog, store)
            .key(self.config.storage.cart_key.clone())
            .notifier(self.output.clone())
            .view(|cart: &Cart, totals: &CartTotals| {
                tracing::debug!(
                    lines = cart.len(),
                    items = cart.item_count(),
                    total = %totals.total,
                    "cart updated"
                );
            })
            .open();
        Ok(cart)
    }
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::ids::ProductId;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(false, true)
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::load_from(dir.path(), None, quiet()).unwrap();
        let catalog = ctx.load_catalog().unwrap();

        assert_eq!(catalog.len(), 8);
        assert!(catalog.find(&ProductId::new("1")).is_some());
    }

    #[test]
    fn test_cart_persists_between_sessions() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::load_from(dir.path(), None, quiet()).unwrap();

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(&ProductId::new("1"), 2).unwrap();
        drop(cart);

        let reopened = ctx.open_cart().unwrap();
        assert_eq!(reopened.item_count(), 2);
        assert!(dir.path().join(".shop").is_dir());
    }

    #[test]
    fn test_config_file_sets_cart_key() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("shop.toml"),
            "[storage]\ndir = \"state\"\ncart_key = \"cart:alice\"\n",
        )
        .unwrap();

        let ctx = Context::load_from(dir.path(), None, quiet()).unwrap();
        assert_eq!(ctx.config_path, Some(dir.path().join("shop.toml")));
        assert_eq!(ctx.storage_dir(), dir.path().join("state"));

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(&ProductId::new("3"), 1).unwrap();
        assert_eq!(cart.key(), "cart:alice");
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("shop.toml"),
            "[storage]\ndir = \"state\"\n\n[catalog]\npath = \"products.json\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("products.json"),
            include_str!("../data/catalog.json"),
        )
        .unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = Context::load_from(&nested, None, quiet()).unwrap();
        assert_eq!(ctx.config_dir(), dir.path());
        assert_eq!(ctx.storage_dir(), dir.path().join("state"));
        assert_eq!(ctx.load_catalog().unwrap().len(), 8);

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(&ProductId::new("2"), 1).unwrap();
        drop(cart);

        let from_root = Context::load_from(dir.path(), None, quiet()).unwrap();
        assert_eq!(from_root.open_cart().unwrap().item_count(), 1);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut ctx = Context::load_from(dir.path(), None, quiet()).unwrap();
        ctx.config.catalog.path = Some(PathBuf::from("missing.json"));

        let err = ctx.load_catalog().unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }
}
