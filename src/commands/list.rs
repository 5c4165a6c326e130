use anyhow::Result;
use maskit::{InstalledSet, Installer};
use std::collections::BTreeMap;

use crate::Context;
use crate::config::Config;
use crate::ui;

pub fn run(ctx: &Context, mas_path: Option<&str>, json: bool) -> Result<()> {
    let config = Config::load(ctx.config.as_deref())?;
    let installer = Installer::new(config.catalog());
    let installed = installer.installed(config.mas_path(mas_path).as_deref())?;

    if json {
        println!("{}", to_json(&installed)?);
        return Ok(());
    }

    if installed.is_empty() {
        ui::info("No App Store apps installed");
        return Ok(());
    }

    ui::header(&format!("Installed apps ({})", installed.len()));
    let width = ui::id_width(installed.iter().map(|(id, _)| id));
    for (id, name) in installed.iter() {
        ui::row(id, name, width);
    }

    Ok(())
}

/// Installed apps as a JSON object keyed by store id.
fn to_json(installed: &InstalledSet) -> Result<String> {
    let map: BTreeMap<&str, &str> = installed.iter().collect();
    Ok(serde_json::to_string_pretty(&map)?)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use maskit::backend::scripted::ScriptedRunner;
    use maskit::{Catalog, CommandOutput};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn installer(listing: &str, dir: &TempDir) -> Installer<ScriptedRunner> {
        let path = dir.path().join("mas");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let runner = ScriptedRunner::signed_in().respond("list", CommandOutput::ok(listing));
        Installer::with_runner(runner, Catalog::builtin())
            .with_search_path(Some(dir.path().as_os_str().to_owned()))
    }

    #[test]
    fn test_listing_to_json() {
        let tmp = TempDir::new().unwrap();
        let installer = installer("497799835 Xcode (14.3)\n411246225 Caffeine (1.1.3)\n", &tmp);

        let installed = installer.installed(None).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&installed).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "411246225": "Caffeine (1.1.3)",
                "497799835": "Xcode (14.3)",
            })
        );
        assert_eq!(ui::id_width(installed.iter().map(|(id, _)| id)), 9);
        assert_eq!(
            installer.runner().calls(),
            vec![vec!["account".to_string()], vec!["list".to_string()]]
        );
    }

    #[test]
    fn test_empty_listing() {
        let tmp = TempDir::new().unwrap();
        let installer = installer("", &tmp);

        let installed = installer.installed(None).unwrap();
        assert!(installed.is_empty());
        assert_eq!(to_json(&installed).unwrap(), "{}");
    }
}
