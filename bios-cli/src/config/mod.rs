//! Run configuration: secrets from the environment, category wiring from
//! built-in defaults with an optional TOML override file.

mod categories;

pub use categories::{Category, CategoryConfig};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default token endpoint of the training BIOS deployment
pub const DEFAULT_TOKEN_URL: &str = "https://training-bios2.kemenkeu.go.id/api/token";

/// Default worksheet read from every source spreadsheet
pub const DEFAULT_WORKSHEET: &str = "Sheet1";

/// Secrets supplied by the deployment environment
#[derive(Debug, Clone)]
pub struct Secrets {
    pub satker: String,
    pub api_key: String,
}

impl Secrets {
    /// Load SATKER and API_KEY from the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Secrets {
            satker: require_env("SATKER")?,
            api_key: require_env("API_KEY")?,
        })
    }
}

/// Load the GOOGLE_CREDENTIALS service-account JSON blob from the environment
pub fn google_credentials_from_env() -> Result<String> {
    require_env("GOOGLE_CREDENTIALS")
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("environment variable {} is not set", name),
    }
}

/// Full run configuration, loaded once at startup and passed into the
/// orchestrator
#[derive(Debug, Clone)]
pub struct Config {
    pub token_url: String,
    pub worksheet: String,
    /// Categories in their fixed processing order
    pub categories: Vec<CategoryConfig>,
}

impl Config {
    /// Built-in wiring for the training BIOS deployment
    pub fn defaults() -> Self {
        Config {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            worksheet: DEFAULT_WORKSHEET.to_string(),
            categories: Category::ALL.iter().map(|c| c.default_config()).collect(),
        }
    }

    /// Load configuration, applying overrides from `path` if given, else
    /// from the user's config file if one exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::defaults();

        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(file) = file {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read config file: {}", file.display()))?;
            let overrides: ConfigFile = toml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", file.display()))?;
            config.apply(overrides)?;
        }

        Ok(config)
    }

    fn apply(&mut self, overrides: ConfigFile) -> Result<()> {
        if let Some(url) = overrides.token_url {
            self.token_url = url;
        }
        if let Some(worksheet) = overrides.worksheet {
            self.worksheet = worksheet;
        }

        for (key, patch) in overrides.categories {
            let Some(category) = Category::from_key(&key) else {
                bail!("unknown category {:?} in config file", key);
            };
            let entry = self
                .categories
                .iter_mut()
                .find(|c| c.category == category)
                .expect("defaults cover every category");
            if let Some(sheet_id) = patch.sheet_id {
                entry.sheet_id = sheet_id;
            }
            if let Some(endpoint) = patch.endpoint {
                entry.endpoint = endpoint;
            }
            if let Some(read_endpoint) = patch.read_endpoint {
                entry.read_endpoint = Some(read_endpoint);
            }
        }

        Ok(())
    }
}

/// Serde shape of the optional TOML override file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    token_url: Option<String>,
    worksheet: Option<String>,
    #[serde(default)]
    categories: HashMap<String, CategoryPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryPatch {
    sheet_id: Option<String>,
    endpoint: Option<String>,
    read_endpoint: Option<String>,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bios-cli").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_categories_in_order() {
        let config = Config::defaults();
        let order: Vec<_> = config.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_override_patches_one_category() {
        let mut config = Config::defaults();
        let overrides: ConfigFile = toml::from_str(
            r#"
            worksheet = "Data"

            [categories.penerimaan]
            sheet_id = "custom-sheet"
            "#,
        )
        .unwrap();
        config.apply(overrides).unwrap();

        assert_eq!(config.worksheet, "Data");
        let penerimaan = config
            .categories
            .iter()
            .find(|c| c.category == Category::Penerimaan)
            .unwrap();
        assert_eq!(penerimaan.sheet_id, "custom-sheet");
        // Sibling categories keep their defaults
        let pengeluaran = config
            .categories
            .iter()
            .find(|c| c.category == Category::Pengeluaran)
            .unwrap();
        assert_ne!(pengeluaran.sheet_id, "custom-sheet");
    }

    #[test]
    fn test_unknown_category_key_is_rejected() {
        let mut config = Config::defaults();
        let overrides: ConfigFile = toml::from_str(
            r#"
            [categories.penarikan]
            sheet_id = "x"
            "#,
        )
        .unwrap();
        assert!(config.apply(overrides).is_err());
    }
}
