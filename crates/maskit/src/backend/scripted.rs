//! Scripted backend that replays canned output.
//!
//! Used by tests (here and in the CLI) to exercise the full
//! locate/list/install flow without a real `mas` binary.

use crate::backend::{CommandOutput, CommandRunner};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Runner that answers by sub-command and records every call.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `subcommand` with `output`.
    pub fn respond(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.responses.insert(subcommand.to_string(), output);
        self
    }

    /// Signed-in account, empty listing, successful install.
    pub fn signed_in() -> Self {
        Self::new()
            .respond("account", CommandOutput::ok("user@example.com\n"))
            .respond("list", CommandOutput::ok(""))
            .respond("install", CommandOutput::ok(""))
    }

    /// Every recorded argument vector, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded calls whose first argument is `subcommand`.
    pub fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|argv| argv.first().is_some_and(|a| a == subcommand))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.iter().map(ToString::to_string).collect());

        let subcommand = args.first().copied().unwrap_or_default();
        self.responses
            .get(subcommand)
            .cloned()
            .ok_or_else(|| Error::Spawn {
                program: program.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no scripted response for '{subcommand}'"),
                ),
            })
    }
}
