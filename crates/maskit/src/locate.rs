//! Locating the `mas` binary and checking its preconditions.

use crate::backend::{CommandOutput, CommandRunner};
use crate::error::{Error, Result};
use crate::types::{InstalledSet, Phase};
use std::ffi::OsStr;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Bare name looked up on the search path.
pub const MAS_BINARY: &str = "mas";

/// Exact `mas account` output when no one is signed in.
pub const NOT_SIGNED_IN: &str = "Not signed in";

/// Paths to try, in order.
///
/// An explicit path starting with a separator is the only candidate. A
/// bare name is joined onto each `search_path` directory; a relative path
/// is resolved against the working directory.
pub fn candidates(explicit: Option<&str>, search_path: Option<&OsStr>) -> Vec<PathBuf> {
    let name = explicit.unwrap_or(MAS_BINARY);
    if name.starts_with(MAIN_SEPARATOR) {
        return vec![PathBuf::from(name)];
    }
    if name.contains(MAIN_SEPARATOR) {
        return vec![current_dir().join(name)];
    }

    search_path
        .map(|paths| {
            std::env::split_paths(paths)
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(|dir| dir.join(name))
                .collect()
        })
        .unwrap_or_default()
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

/// First candidate that is an executable file.
pub fn find_executable(explicit: Option<&str>, search_path: Option<&OsStr>) -> Result<PathBuf> {
    let name = explicit.unwrap_or(MAS_BINARY);
    let found = if name.starts_with(MAIN_SEPARATOR) {
        which::which_in(name, None::<&OsStr>, Path::new("/"))
    } else {
        which::which_in(name, search_path, current_dir())
    };

    found.map_err(|e| {
        let searched = candidates(explicit, search_path);
        log::debug!("no executable mas among {searched:?}: {e}");
        Error::NotFound { searched }
    })
}

/// Find `mas` and confirm the host is signed in to the store.
///
/// Runs exactly one subprocess (`mas account`).
pub fn locate<'r>(
    runner: &'r dyn CommandRunner,
    explicit: Option<&str>,
    search_path: Option<&OsStr>,
) -> Result<Mas<'r>> {
    let path = find_executable(explicit, search_path)?;
    log::debug!("{}: {}", path.display(), Phase::Located);

    let mas = Mas::new(path, runner);
    mas.check_signed_in()?;
    Ok(mas)
}

/// Handle to a located `mas` binary.
pub struct Mas<'r> {
    path: PathBuf,
    runner: &'r dyn CommandRunner,
}

impl<'r> Mas<'r> {
    /// Wrap a known binary path without any checks.
    pub fn new(path: impl Into<PathBuf>, runner: &'r dyn CommandRunner) -> Self {
        Self {
            path: path.into(),
            runner,
        }
    }

    /// Path of the binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run(&self.path, args)
    }

    /// Fail with [`Error::NotAuthenticated`] if `mas account` says so.
    ///
    /// Any other output, including a nonzero exit, counts as signed in.
    pub fn check_signed_in(&self) -> Result<()> {
        let output = self.run(&["account"])?;
        if output.stdout.trim_end() == NOT_SIGNED_IN {
            return Err(Error::NotAuthenticated);
        }
        Ok(())
    }

    /// Capture the installed set via `mas list`.
    pub fn list(&self) -> Result<InstalledSet> {
        let output = self.run(&["list"])?;
        if !output.success() {
            log::warn!(
                "mas list exited with {:?}: {}",
                output.code,
                output.stderr.trim()
            );
        }
        Ok(InstalledSet::parse(&output.stdout))
    }

    /// Run `mas install <id>`.
    pub fn install(&self, id: &str) -> Result<()> {
        let output = self.run(&["install", id])?;
        if !output.success() {
            return Err(Error::InstallFailed {
                id: id.to_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}
