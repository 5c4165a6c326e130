//! Idempotent install: list once, install only when absent.

use crate::error::Result;
use crate::locate::Mas;
use crate::types::{MatchBy, Outcome, Phase};

fn level(phase: Phase) -> log::Level {
    if phase.is_terminal() {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

fn enter(phase: Phase, id: &str) -> Phase {
    log::log!(level(phase), "{id}: {phase}");
    phase
}

/// Ensure the app with store identifier `id` is installed.
///
/// Runs `mas list` once, then `mas install <id>` only if `id` is absent and
/// `dry_run` is false. Under dry-run an absent app reports `changed = true`
/// without any install call.
pub fn ensure_installed(mas: &Mas<'_>, id: &str, dry_run: bool) -> Result<Outcome> {
    let installed = mas.list()?;
    enter(Phase::Queried, id);

    if installed.contains(id, MatchBy::Id) {
        return Ok(Outcome {
            changed: false,
            phase: enter(Phase::AlreadyInstalled, id),
        });
    }

    if dry_run {
        return Ok(Outcome {
            changed: true,
            phase: enter(Phase::WouldInstall, id),
        });
    }

    enter(Phase::Installing, id);
    if let Err(e) = mas.install(id) {
        enter(Phase::InstallFailed, id);
        return Err(e);
    }

    Ok(Outcome {
        changed: true,
        phase: enter(Phase::Installed, id),
    })
}
