//! Multisite and environment discovery.

use std::cmp::Ordering;
use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use crate::error::Error;
use crate::paths;

/// Deployment environments, in detection and selection order. `prod` is
/// the default.
pub const ENVIRONMENTS: [&str; 4] = ["prod", "acc", "test", "dev"];

/// Sentinel directory holding the site templates rather than a real site.
pub const DEFAULT_SITE: &str = "default";

/// List the site directories under `docroot/sites`, natural-sorted, with
/// the `default` sentinel floated to the end.
pub fn discover(root: &Path) -> Result<Vec<String>, Error> {
    let sites_dir = paths::sites::dir(root);
    let mut names = Vec::new();

    let entries = fs::read_dir(&sites_dir).map_err(|e| Error::filesystem(&sites_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::filesystem(&sites_dir, e))?;
        let is_dir = entry
            .file_type()
            .map_err(|e| Error::filesystem(entry.path(), e))?
            .is_dir();
        if !is_dir {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    if let Some(at) = names.iter().position(|name| name == DEFAULT_SITE) {
        let sentinel = names.remove(at);
        names.push(sentinel);
    }
    Ok(names)
}

/// The environment a site was prepared for earlier, judged by which
/// `settings.<env>.php` override already exists.
pub fn detect_environment(root: &Path, site: &str) -> Option<&'static str> {
    ENVIRONMENTS
        .into_iter()
        .find(|env| paths::sites::env_settings(root, site, env).exists())
}

/// Site names double as URL fragments with underscores swapped for dashes.
pub fn uri_fragment(site_name: &str) -> String {
    site_name.replace('_', "-")
}

/// Compare with digit runs ordered numerically, so `site2` < `site10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_number(&mut ca);
                let nb = take_number(&mut cb);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => {
                    ca.next();
                    cb.next();
                }
                other => return other,
            },
        }
    }
}

fn take_number(chars: &mut Peekable<Chars>) -> u64 {
    let mut n: u64 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(u64::from(digit));
        chars.next();
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_natural_cmp_orders_digit_runs_numerically() {
        assert_eq!(natural_cmp("site2", "site10"), Ordering::Less);
        assert_eq!(natural_cmp("site10", "site2"), Ordering::Greater);
        assert_eq!(natural_cmp("site2", "site2"), Ordering::Equal);
        assert_eq!(natural_cmp("alpha", "beta"), Ordering::Less);
        assert_eq!(natural_cmp("site", "site2"), Ordering::Less);
    }

    #[test]
    fn test_discover_floats_default_to_the_end() {
        let temp = TempDir::new().unwrap();
        let sites_dir = temp.path().join("docroot/sites");
        for name in ["default", "site10", "site2", "acme"] {
            fs::create_dir_all(sites_dir.join(name)).unwrap();
        }
        // A stray file must not show up as a site.
        fs::write(sites_dir.join("sites.php"), "<?php").unwrap();

        let names = discover(temp.path()).unwrap();
        assert_eq!(names, vec!["acme", "site2", "site10", "default"]);
    }

    #[test]
    fn test_discover_errors_without_a_sites_dir() {
        let temp = TempDir::new().unwrap();
        let err = discover(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[test]
    fn test_detect_environment_takes_the_first_match() {
        let temp = TempDir::new().unwrap();
        let site_dir = temp.path().join("docroot/sites/acme");
        fs::create_dir_all(&site_dir).unwrap();
        assert_eq!(detect_environment(temp.path(), "acme"), None);

        fs::write(site_dir.join("settings.dev.php"), "<?php").unwrap();
        assert_eq!(detect_environment(temp.path(), "acme"), Some("dev"));

        // acc outranks dev in detection order.
        fs::write(site_dir.join("settings.acc.php"), "<?php").unwrap();
        assert_eq!(detect_environment(temp.path(), "acme"), Some("acc"));
    }

    #[test]
    fn test_uri_fragment_swaps_underscores() {
        assert_eq!(uri_fragment("acme_site"), "acme-site");
        assert_eq!(uri_fragment("acme"), "acme");
    }
}
