use anyhow::Result;
use maskit::{DesiredApp, Installer, Phase, Report, Request};

use crate::Context;
use crate::cli::EnsureArgs;
use crate::config::Config;
use crate::module::ModuleResult;
use crate::ui;

/// Returns whether the app ended up (or would end up) installed.
pub fn run(ctx: &Context, args: EnsureArgs) -> Result<bool> {
    let json = args.json;
    let result = ensure(ctx, args);

    if json {
        let out = to_json(result);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(!out.is_failed());
    }

    let report = result?;
    if !ctx.quiet || report.changed {
        print_report(&report);
    }
    Ok(true)
}

fn ensure(ctx: &Context, args: EnsureArgs) -> Result<Report> {
    let config = Config::load(ctx.config.as_deref())?;
    let installer = Installer::new(config.catalog());

    let request = Request {
        app: DesiredApp {
            id: args.id,
            name: args.name,
            dry_run: args.dry_run,
        },
        mas_path: config.mas_path(args.mas_path.as_deref()),
        update_cache: args.update_cache,
    };

    Ok(installer.ensure_present(&request)?)
}

fn to_json(result: Result<Report>) -> ModuleResult {
    match result {
        Ok(report) => ModuleResult::Ok(report),
        Err(e) => ModuleResult::fail(format!("{e:#}")),
    }
}

fn label(report: &Report) -> String {
    match &report.name {
        Some(name) => format!("{name} ({})", report.id),
        None => report.id.clone(),
    }
}

fn print_report(report: &Report) {
    let app = label(report);
    match report.phase {
        Phase::AlreadyInstalled => ui::info(&format!("{app} is already installed")),
        Phase::WouldInstall => ui::info(&format!("[dry-run] Would install {app}")),
        _ => ui::success(&format!("Installed {app}")),
    }
}
