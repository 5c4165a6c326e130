//! # maskit
//!
//! Idempotent Mac App Store installs on top of the `mas` CLI.
//!
//! This crate provides functionality for:
//! - Translating app names to App Store identifiers
//! - Locating `mas` and checking the App Store session
//! - Installing an app only when it is not already present
//!
//! ## Example
//!
//! ```no_run
//! use maskit::{Catalog, DesiredApp, Installer, Request};
//!
//! let installer = Installer::new(Catalog::builtin());
//! let request = Request::new(DesiredApp::by_name("Caffeine"));
//!
//! let report = installer.ensure_present(&request).expect("install failed");
//! println!("changed: {}", report.changed);
//! ```
//!
//! ## Subprocess Protocol
//!
//! Only three `mas` invocations are ever made, strictly in order:
//! `mas account`, `mas list`, and (when needed) `mas install <id>`.
//! Swap the process layer with [`Installer::with_runner`] to test without
//! a real binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod catalog;
pub mod error;
pub mod locate;
pub mod reconcile;
pub mod types;

pub use backend::{CommandOutput, CommandRunner};
pub use catalog::{Catalog, CatalogSource, StaticSource};
pub use error::{Error, ErrorCategory, Result};
pub use locate::Mas;
pub use types::{DesiredApp, InstalledSet, MatchBy, Outcome, Phase, Report, ResolvedApp};

use backend::system::SystemRunner;
use std::ffi::OsString;

/// One "ensure present" request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// The app to ensure
    pub app: DesiredApp,
    /// Explicit `mas` path or bare name
    pub mas_path: Option<String>,
    /// Refresh the catalog before translating
    pub update_cache: bool,
}

impl Request {
    /// Request with default binary lookup and no cache refresh.
    pub fn new(app: DesiredApp) -> Self {
        Self {
            app,
            ..Self::default()
        }
    }
}

/// High-level entry point tying translation, location and reconciliation
/// together.
pub struct Installer<R: CommandRunner = SystemRunner> {
    runner: R,
    catalog: Catalog,
    source: Box<dyn CatalogSource>,
    search_path: Option<OsString>,
}

impl Installer<SystemRunner> {
    /// Installer running real processes, searching the process `PATH`.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_runner(SystemRunner, catalog)
    }
}

impl<R: CommandRunner> Installer<R> {
    /// Installer with a custom process runner (useful for testing).
    pub fn with_runner(runner: R, catalog: Catalog) -> Self {
        Self {
            runner,
            catalog,
            source: Box::new(StaticSource),
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Use `source` when a request asks for a cache refresh.
    pub fn with_source(mut self, source: Box<dyn CatalogSource>) -> Self {
        self.source = source;
        self
    }

    /// Search these directories instead of the process `PATH`.
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// The process runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The translation table.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Locate `mas` and check the session.
    pub fn locate(&self, mas_path: Option<&str>) -> Result<Mas<'_>> {
        locate::locate(&self.runner, mas_path, self.search_path.as_deref())
    }

    /// Currently installed apps.
    pub fn installed(&self, mas_path: Option<&str>) -> Result<InstalledSet> {
        self.locate(mas_path)?.list()
    }

    /// Translate, locate, and install if absent.
    pub fn ensure_present(&self, request: &Request) -> Result<Report> {
        let resolved = if request.update_cache {
            let catalog = self.catalog.clone().refreshed(self.source.as_ref())?;
            request.app.resolve(&catalog)?
        } else {
            request.app.resolve(&self.catalog)?
        };
        log::debug!("{}: {}", resolved.id, Phase::Start);

        let mas = self.locate(request.mas_path.as_deref())?;
        log::debug!("{}: {}", resolved.id, Phase::Authenticated);

        let outcome = reconcile::ensure_installed(&mas, &resolved.id, resolved.dry_run)?;

        Ok(Report {
            changed: outcome.changed,
            id: resolved.id,
            name: resolved.name,
            phase: outcome.phase,
        })
    }
}
