use anyhow::{Context, Result, bail};
use maskit::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("mas-ensure"))
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default mas binary (path or bare name)
    #[serde(default)]
    pub mas_path: Option<String>,
    /// Extra name -> App Store id translations
    #[serde(default)]
    pub apps: BTreeMap<String, String>,
}

impl Config {
    /// Load config from `path`, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_dir()?.join("config.toml"), false),
        };

        if !explicit && !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        for (name, id) in &config.apps {
            if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
                bail!("App Store id for '{name}' must be numeric, got '{id}'");
            }
        }
        Ok(config)
    }

    /// Built-in translations with the `[apps]` table merged over them.
    pub fn catalog(&self) -> Catalog {
        Catalog::builtin().with_entries(self.apps.clone())
    }

    /// Pick the mas path: explicit argument first, then config.
    pub fn mas_path(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .or(self.mas_path.as_deref())
            .map(|p| shellexpand::tilde(p).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_apps_table() {
        let config = Config::parse(
            r#"
mas_path = "/opt/homebrew/bin/mas"

[apps]
"Things 3" = "904280696"
Xcode = "1"
"#,
        )
        .unwrap();

        let catalog = config.catalog();
        assert_eq!(catalog.translate("Things 3").unwrap(), "904280696");
        assert_eq!(catalog.translate("Xcode").unwrap(), "1");
        assert_eq!(catalog.translate("Caffeine").unwrap(), "411246225");
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        let err = Config::parse("[apps]\nFoo = \"abc\"\n").unwrap_err();
        assert!(err.to_string().contains("must be numeric"));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("mas = \"x\"\n").is_err());
    }

    #[test]
    fn test_explicit_mas_path_wins() {
        let config = Config {
            mas_path: Some("/usr/local/bin/mas".into()),
            ..Config::default()
        };
        assert_eq!(
            config.mas_path(Some("/opt/mas")).as_deref(),
            Some("/opt/mas")
        );
        assert_eq!(
            config.mas_path(None).as_deref(),
            Some("/usr/local/bin/mas")
        );
        assert_eq!(Config::default().mas_path(None), None);
    }

    #[test]
    fn test_mas_path_expands_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = Config::default();
        let expanded = config.mas_path(Some("~/bin/mas")).unwrap();
        assert_eq!(PathBuf::from(expanded), home.join("bin/mas"));
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[apps]\nMagnet = \"441258766\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.apps.get("Magnet").map(String::as_str), Some("441258766"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::load(Some(&tmp.path().join("nope.toml"))).is_err());
    }
}
