//! Remove installer artifacts after a package-manager run.
//!
//! The application ships documentation and development files that have no
//! business on a live docroot; this sweeps them out. It also offers to
//! drop `.git` when the tree still points at the starter repository it
//! was cloned from.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use colored::*;

use crate::paths;
use crate::prompt;

/// Files below the docroot that should not be publicly reachable.
const CLEANUP_FILES: [&str; 10] = [
    "core/CHANGELOG.txt",
    "core/COPYRIGHT.txt",
    "core/INSTALL.mysql.txt",
    "core/INSTALL.pgsql.txt",
    "core/INSTALL.sqlite.txt",
    "core/INSTALL.txt",
    "core/LICENSE.txt",
    "core/MAINTAINERS.txt",
    "core/UPDATE.txt",
    "sites/development.services.yml",
];

/// Remotes of the starter project new trees are cloned from.
const STARTER_REMOTES: [&str; 2] = [
    "https://github.com/sitesmith/cms-project.git",
    "git@github.com:sitesmith/cms-project.git",
];

pub fn execute(root: &Path) -> Result<()> {
    let docroot = paths::docroot(root);
    let mut removed = 0;
    for relative in CLEANUP_FILES {
        let path = docroot.join(relative);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }
    }
    println!(
        "🧹 Removed {removed} installer artifact(s) from {}.",
        docroot.display()
    );

    disconnect_starter_remote(root)?;
    Ok(())
}

/// Offer to drop `.git` when origin still points at the starter
/// repository. Skipped without a terminal; this also runs from
/// package-manager hooks on build servers.
fn disconnect_starter_remote(root: &Path) -> Result<()> {
    if !root.join(".git").exists() {
        return Ok(());
    }
    let output = Command::new("git")
        .current_dir(root)
        .args(["config", "--get", "remote.origin.url"])
        .output()
        .context("Failed to run git config")?;
    if !output.status.success() {
        // No origin configured.
        return Ok(());
    }
    let origin = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !STARTER_REMOTES.contains(&origin.as_str()) {
        return Ok(());
    }

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            "Origin still points at the starter repository; rerun interactively to disconnect."
                .yellow()
        );
        return Ok(());
    }
    if prompt::confirm("Disconnect from the starter repository?")? {
        let git_dir = root.join(".git");
        fs::remove_dir_all(&git_dir)
            .with_context(|| format!("Failed to remove {}", git_dir.display()))?;
        println!("✓ Removed {}.", git_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_removes_listed_artifacts() {
        let temp = TempDir::new().unwrap();
        let core = temp.path().join("docroot/core");
        fs::create_dir_all(&core).unwrap();
        fs::write(core.join("CHANGELOG.txt"), "changes").unwrap();
        fs::write(core.join("INSTALL.txt"), "install").unwrap();
        // Not on the list; must survive.
        fs::write(core.join("README.txt"), "readme").unwrap();

        execute(temp.path()).unwrap();

        assert!(!core.join("CHANGELOG.txt").exists());
        assert!(!core.join("INSTALL.txt").exists());
        assert!(core.join("README.txt").exists());
    }

    #[test]
    fn test_cleanup_tolerates_an_empty_tree() {
        let temp = TempDir::new().unwrap();
        execute(temp.path()).unwrap();
    }
}
