//! Install a freshly prepared site through the external drush tool.
//!
//! Preparation runs first so the database credentials exist by the time
//! drush bootstraps. Operator input travels to drush as discrete argv
//! elements, never through a shell, and drush's own output goes straight
//! to the operator's terminal.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use colored::*;
use which::which;

use crate::buildfile::BuildFile;
use crate::commands::prepare::{self, PrepareOptions};
use crate::error::Error;
use crate::paths;
use crate::prompt;
use crate::validate;

/// Install profiles shipped with the application.
const PROFILES: [&str; 3] = ["minimal", "standard", "testing"];

/// Menu entry for a profile pulled in through the package manager.
const MANUAL_PROFILE: &str = "manually enter (a profile as defined and downloaded via the package manager)";

#[derive(Debug, Default, Clone)]
pub struct InstallOptions {
    pub prepare: PrepareOptions,
    pub profile: Option<String>,
}

pub fn execute(opts: &InstallOptions) -> Result<()> {
    let root = &opts.prepare.root;

    // File structure first.
    let prepared = prepare::execute(&opts.prepare)?;

    let account_name = prompt::ask_validated(
        "Choose and enter an administrator user name",
        Some("admin"),
        validate::machine_name,
    )?;
    let account_pass = prompt::ask("Choose and enter the administrators password", Some("123456"))?;
    let account_mail = prompt::ask_validated(
        "Enter the administrator users mail",
        Some("webmaster@example.com"),
        validate::email,
    )?;
    let site_title = prompt::ask("Choose and enter a human readable site name", None)?;
    let site_mail = prompt::ask_validated(
        "Enter the sitewide mail",
        Some("webmaster@example.com"),
        validate::email,
    )?;
    let profile = resolve_profile(root, opts)?;

    println!(
        "Your site {} is being installed, please wait ...",
        prepared.site_name.cyan()
    );

    let drush = locate_drush(root)?;
    let docroot = paths::docroot(root);

    let status = Command::new(&drush)
        .current_dir(root)
        .args([
            format!("--account-mail={account_mail}"),
            format!("--account-name={account_name}"),
            format!("--account-pass={account_pass}"),
            format!("--site-mail={site_mail}"),
            format!("--site-name={site_title}"),
            format!("--root={}", docroot.display()),
            "--yes".to_string(),
            "site-install".to_string(),
            profile,
            "install_configure_form.update_status_module=array(FALSE,FALSE)".to_string(),
        ])
        .status()
        .with_context(|| format!("Failed to run {}", drush.display()))?;
    if !status.success() {
        return Err(Error::ExternalTool {
            tool: "drush site-install".to_string(),
            status,
        }
        .into());
    }

    println!("Your new site will now open in your browser using a one time login link.");
    let status = Command::new(&drush)
        .current_dir(root)
        .args(["uli".to_string(), format!("--root={}", docroot.display())])
        .status()
        .with_context(|| format!("Failed to run {}", drush.display()))?;
    if !status.success() {
        return Err(Error::ExternalTool {
            tool: "drush uli".to_string(),
            status,
        }
        .into());
    }
    Ok(())
}

/// Flag or build file first, then an interactive pick with `standard`
/// as the default.
fn resolve_profile(root: &Path, opts: &InstallOptions) -> Result<String> {
    let build = BuildFile::load(root)?;
    if let Some(profile) = opts.profile.clone().or(build.install.profile) {
        validate::machine_name(&profile)?;
        return Ok(profile);
    }

    let mut options: Vec<&str> = PROFILES.to_vec();
    options.push(MANUAL_PROFILE);
    let picked = prompt::select("Select the install profile:", &options, 1)?;
    if options[picked] == MANUAL_PROFILE {
        return prompt::ask_validated(
            "Choose and enter a profile name",
            None,
            validate::machine_name,
        );
    }
    Ok(PROFILES[picked].to_string())
}

/// Prefer the project-local drush; fall back to one on PATH.
fn locate_drush(root: &Path) -> Result<PathBuf> {
    let local = paths::project::local_drush(root);
    if local.exists() {
        return Ok(local);
    }
    which("drush").context("drush not found (neither vendor/drush/drush/drush nor on PATH)")
}
