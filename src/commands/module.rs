use anyhow::Result;
use maskit::Installer;
use std::path::Path;

use crate::Context;
use crate::config::Config;
use crate::module::{self, ModuleArgs, ModuleResult};

/// Run the module protocol; returns whether the invocation failed.
pub fn run(ctx: &Context, args_file: &Path) -> Result<bool> {
    let result = match load(ctx, args_file) {
        Ok((config, args)) => {
            let installer = Installer::new(config.catalog());
            module::run(&installer, args, |p| config.mas_path(p))
        }
        Err(e) => ModuleResult::fail(format!("{e:#}")),
    };

    println!("{}", serde_json::to_string(&result)?);
    Ok(result.is_failed())
}

fn load(ctx: &Context, args_file: &Path) -> Result<(Config, ModuleArgs)> {
    let args = ModuleArgs::load(args_file)?;
    let config = Config::load(ctx.config.as_deref())?;
    Ok((config, args))
}
