//! Real process backend using `std::process::Command`.

use crate::backend::{CommandOutput, CommandRunner};
use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Runner that executes real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("running {} {}", program.display(), args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let output = CommandOutput::from(output);
        log::debug!("{} exited with {:?}", program.display(), output.code);
        Ok(output)
    }
}
