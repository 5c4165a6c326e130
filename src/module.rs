//! Configuration-management module protocol.
//!
//! The caller writes a JSON arguments file and reads a single JSON object
//! from stdout: the report on success, `{"failed": true, "msg": ...}` on
//! failure.

use anyhow::{Context, Result};
use maskit::{CommandRunner, DesiredApp, Error, Installer, Report, Request};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_state() -> String {
    "present".to_string()
}

/// Parameters accepted from the caller.
#[derive(Debug, Deserialize)]
pub struct ModuleArgs {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mas_path: Option<String>,
    #[serde(default)]
    pub update_cache: bool,
    /// Dry-run flag injected by the framework
    #[serde(default, rename = "_ansible_check_mode")]
    pub check_mode: bool,
}

impl ModuleArgs {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid module arguments in {}", path.display()))
    }

    /// Validate and convert into a library request.
    pub fn into_request(self) -> maskit::Result<Request> {
        if self.state != "present" {
            return Err(Error::UnsupportedState(self.state));
        }

        Ok(Request {
            app: DesiredApp {
                id: self.id,
                name: self.name,
                dry_run: self.check_mode,
            },
            mas_path: self.mas_path,
            update_cache: self.update_cache,
        })
    }
}

/// What gets printed on stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ModuleResult {
    Ok(Report),
    Failed { failed: bool, msg: String },
}

impl ModuleResult {
    pub fn fail(msg: impl Into<String>) -> Self {
        Self::Failed {
            failed: true,
            msg: msg.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Run one module invocation against `installer`.
///
/// `default_mas_path` comes from the config file and is used only when the
/// arguments do not name a binary.
pub fn run<R: CommandRunner>(
    installer: &Installer<R>,
    args: ModuleArgs,
    default_mas_path: impl FnOnce(Option<&str>) -> Option<String>,
) -> ModuleResult {
    let mut request = match args.into_request() {
        Ok(r) => r,
        Err(e) => return ModuleResult::fail(e.to_string()),
    };
    request.mas_path = default_mas_path(request.mas_path.as_deref());

    match installer.ensure_present(&request) {
        Ok(report) => ModuleResult::Ok(report),
        Err(e) => {
            log::error!("{e}");
            ModuleResult::fail(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskit::backend::scripted::ScriptedRunner;
    use maskit::{Catalog, CommandOutput};
    use tempfile::TempDir;

    fn args(json: &str) -> ModuleArgs {
        serde_json::from_str(json).unwrap()
    }

    #[cfg(unix)]
    fn fake_mas(dir: &Path) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("mas");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn installer(runner: ScriptedRunner) -> Installer<ScriptedRunner> {
        Installer::with_runner(runner, Catalog::builtin()).with_search_path(None)
    }

    #[test]
    fn test_args_defaults() {
        let a = args(r#"{"id": "411246225", "_ansible_verbosity": 0}"#);
        assert_eq!(a.state, "present");
        assert!(!a.check_mode);
        assert!(!a.update_cache);
    }

    #[test]
    fn test_absent_state_is_rejected() {
        let result = run(
            &installer(ScriptedRunner::signed_in()),
            args(r#"{"state": "absent", "id": "1"}"#),
            |p| p.map(String::from),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["failed"], true);
        assert!(json["msg"].as_str().unwrap().contains("absent"));
    }

    #[test]
    fn test_conflicting_input_message() {
        let result = run(
            &installer(ScriptedRunner::signed_in()),
            args(r#"{"id": "411246225", "name": "Caffeine"}"#),
            |p| p.map(String::from),
        );
        assert!(result.is_failed());
    }

    #[cfg(unix)]
    #[test]
    fn test_end_to_end_install() {
        let tmp = TempDir::new().unwrap();
        let mas = fake_mas(tmp.path());
        let installer = installer(ScriptedRunner::signed_in());

        let result = run(
            &installer,
            args(&format!(r#"{{"id": "411246225", "mas_path": "{mas}"}}"#)),
            |p| p.map(String::from),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"changed": true, "id": "411246225"}));
        assert_eq!(installer.runner().calls_to("install").len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_end_to_end_already_installed_by_name() {
        let tmp = TempDir::new().unwrap();
        let mas = fake_mas(tmp.path());
        let runner = ScriptedRunner::signed_in()
            .respond("list", CommandOutput::ok("411246225 Caffeine (1.1.3)\n"));
        let installer = installer(runner);

        let result = run(&installer, args(r#"{"name": "Caffeine"}"#), |p| {
            p.map(String::from).or(Some(mas))
        });

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"changed": false, "id": "411246225", "name": "Caffeine"})
        );
        assert!(installer.runner().calls_to("install").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_check_mode_never_installs() {
        let tmp = TempDir::new().unwrap();
        let mas = fake_mas(tmp.path());
        let installer = installer(ScriptedRunner::signed_in());

        let result = run(
            &installer,
            args(&format!(
                r#"{{"id": "411246225", "mas_path": "{mas}", "_ansible_check_mode": true}}"#
            )),
            |p| p.map(String::from),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["changed"], true);
        assert!(installer.runner().calls_to("install").is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("args");
        fs::write(&path, r#"{"name": "Xcode", "update_cache": true}"#).unwrap();

        let a = ModuleArgs::load(&path).unwrap();
        assert_eq!(a.name.as_deref(), Some("Xcode"));
        assert!(a.update_cache);
    }
}
