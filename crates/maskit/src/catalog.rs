//! Name to App Store identifier translation.
//!
//! The catalog is built once at startup and read-only afterwards. Refreshing
//! produces a new catalog from a [`CatalogSource`].

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Built-in translations.
const BUILTIN: &[(&str, &str)] = &[
    ("iA Writer Classic", "439623248"),
    ("Xcode", "497799835"),
    ("ReadKit", "588726889"),
    ("Todoist", "585829637"),
    ("Caffeine", "411246225"),
];

/// Supplies additional translations when the catalog is refreshed.
pub trait CatalogSource {
    /// Fetch `(name, identifier)` pairs to merge over the current table.
    fn fetch(&self) -> Result<Vec<(String, String)>>;
}

/// Source with nothing to add.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSource;

impl CatalogSource for StaticSource {
    fn fetch(&self) -> Result<Vec<(String, String)>> {
        Ok(Vec::new())
    }
}

/// Immutable name to identifier table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Catalog with only the built-in translations.
    pub fn builtin() -> Self {
        Self::empty().with_entries(
            BUILTIN
                .iter()
                .map(|(name, id)| ((*name).to_string(), (*id).to_string())),
        )
    }

    /// Catalog with no translations.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add entries, replacing any existing translation of the same name.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(entries);
        self
    }

    /// Build a new catalog with whatever `source` supplies merged in.
    pub fn refreshed(self, source: &dyn CatalogSource) -> Result<Self> {
        let fetched = source.fetch()?;
        log::debug!("catalog refresh added {} entr(ies)", fetched.len());
        Ok(self.with_entries(fetched))
    }

    /// Look up the identifier for `name`.
    pub fn translate(&self, name: &str) -> Result<String> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownApplication {
                name: name.to_string(),
            })
    }

    /// Iterate `(name, identifier)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, id)| (name.as_str(), id.as_str()))
    }

    /// Number of translations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no translations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<(String, String)>);

    impl CatalogSource for FixedSource {
        fn fetch(&self) -> Result<Vec<(String, String)>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_translate_builtin() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.translate("Caffeine").unwrap(), "411246225");
        assert_eq!(catalog.translate("Xcode").unwrap(), "497799835");
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_translate_unknown() {
        let err = Catalog::builtin().translate("Nonexistent App").unwrap_err();
        match err {
            Error::UnknownApplication { name } => assert_eq!(name, "Nonexistent App"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_translate_is_case_sensitive() {
        assert!(Catalog::builtin().translate("caffeine").is_err());
    }

    #[test]
    fn test_with_entries_overrides_builtin() {
        let catalog = Catalog::builtin().with_entries([
            ("Xcode".to_string(), "1".to_string()),
            ("Things 3".to_string(), "904280696".to_string()),
        ]);
        assert_eq!(catalog.translate("Xcode").unwrap(), "1");
        assert_eq!(catalog.translate("Things 3").unwrap(), "904280696");
    }

    #[test]
    fn test_static_refresh_is_noop() {
        let catalog = Catalog::builtin().refreshed(&StaticSource).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_refresh_merges_source() {
        let source = FixedSource(vec![("Magnet".into(), "441258766".into())]);
        let catalog = Catalog::empty().refreshed(&source).unwrap();
        assert_eq!(catalog.translate("Magnet").unwrap(), "441258766");
        assert_eq!(catalog.len(), 1);
    }
}
