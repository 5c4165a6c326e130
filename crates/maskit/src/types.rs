//! Core types for App Store reconciliation.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Which column of the installed set a lookup should match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchBy {
    /// Match the store identifier (first column of `mas list`)
    #[default]
    Id,
    /// Match the application name (remainder of the line)
    Name,
}

/// Snapshot of installed apps, keyed by store identifier.
///
/// Built once from `mas list` output and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSet {
    apps: BTreeMap<String, String>,
}

impl InstalledSet {
    /// Parse `mas list` output.
    ///
    /// Each line is split on its first whitespace run into identifier and
    /// name. Lines with fewer than two tokens contribute nothing.
    pub fn parse(output: &str) -> Self {
        let mut apps = BTreeMap::new();

        for line in output.lines() {
            // Format: "497799835 Xcode (14.3)"
            let line = line.trim_start();
            let Some((id, rest)) = line.split_once(char::is_whitespace) else {
                if !line.is_empty() {
                    log::trace!("skipping listing line without a name: {line:?}");
                }
                continue;
            };

            let name = rest.trim();
            if name.is_empty() {
                log::trace!("skipping listing line without a name: {line:?}");
                continue;
            }

            apps.insert(id.to_string(), name.to_string());
        }

        Self { apps }
    }

    /// Whether an app with this identifier is installed.
    pub fn contains_id(&self, id: &str) -> bool {
        self.apps.contains_key(id)
    }

    /// Whether an app with this exact name is installed.
    pub fn contains_name(&self, name: &str) -> bool {
        self.apps.values().any(|n| n == name)
    }

    /// Membership test against the column selected by `by`.
    pub fn contains(&self, key: &str, by: MatchBy) -> bool {
        match by {
            MatchBy::Id => self.contains_id(key),
            MatchBy::Name => self.contains_name(key),
        }
    }

    /// Name recorded for an identifier.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.apps.get(id).map(String::as_str)
    }

    /// Iterate `(identifier, name)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.apps.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    /// Number of installed apps.
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Whether no apps were listed.
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// What the caller asked for, before name translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredApp {
    /// Store identifier
    pub id: Option<String>,
    /// Human-readable name, translated through the [`Catalog`]
    pub name: Option<String>,
    /// Report the intended change without performing it
    pub dry_run: bool,
}

impl DesiredApp {
    /// Desire an app by store identifier.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Desire an app by catalog name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the dry-run flag.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Translate into a request with a concrete identifier.
    pub fn resolve(&self, catalog: &Catalog) -> Result<ResolvedApp> {
        let id = match (&self.id, &self.name) {
            (Some(id), Some(name)) => {
                return Err(Error::ConflictingInput {
                    id: id.clone(),
                    name: name.clone(),
                });
            }
            (Some(id), None) => id.clone(),
            (None, Some(name)) => catalog.translate(name)?,
            (None, None) => return Err(Error::MissingInput),
        };

        Ok(ResolvedApp {
            id,
            name: self.name.clone(),
            dry_run: self.dry_run,
        })
    }
}

/// A desired app whose identifier is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApp {
    /// Store identifier
    pub id: String,
    /// Original name, if the caller supplied one
    pub name: Option<String>,
    /// Report the intended change without performing it
    pub dry_run: bool,
}

/// Reconciliation phases.
///
/// `Start -> Located -> Authenticated -> Queried`, then one of the terminal
/// phases. Precondition failures end the run before `Located` or
/// `Authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing done yet
    Start,
    /// Binary found
    Located,
    /// Store session confirmed
    Authenticated,
    /// Installed set captured
    Queried,
    /// Desired app was already present
    AlreadyInstalled,
    /// `mas install` running
    Installing,
    /// `mas install` succeeded
    Installed,
    /// `mas install` failed
    InstallFailed,
    /// Absent, but dry-run suppressed the install
    WouldInstall,
}

impl Phase {
    /// Whether the run ends in this phase.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::AlreadyInstalled | Self::Installed | Self::InstallFailed | Self::WouldInstall
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Located => "located",
            Self::Authenticated => "authenticated",
            Self::Queried => "queried",
            Self::AlreadyInstalled => "already installed",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::InstallFailed => "install failed",
            Self::WouldInstall => "would install",
        };
        f.write_str(s)
    }
}

/// Result of [`crate::reconcile::ensure_installed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the host changed (or would change, under dry-run)
    pub changed: bool,
    /// Terminal phase reached
    pub phase: Phase,
}

/// Final report for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Whether the host changed (or would change, under dry-run)
    pub changed: bool,
    /// Resolved store identifier
    pub id: String,
    /// Name as supplied by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Terminal phase reached
    #[serde(skip)]
    pub phase: Phase,
}
