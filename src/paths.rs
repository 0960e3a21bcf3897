//! Single source of truth for the scaffolded project tree layout.
//!
//! This module defines WHERE files live. It has no I/O, no validation,
//! no business logic. One file shows the entire tree.
//!
//! ```text
//! <root>/
//! ├── docroot/
//! │   ├── modules/  profiles/  themes/  libraries/
//! │   └── sites/
//! │       ├── sites.php                     # multisite routing registry
//! │       ├── example_template.sites.php
//! │       ├── default/                      # template set for new sites
//! │       │   ├── example_template.settings.php
//! │       │   ├── example_template.settings.<env>.php
//! │       │   └── example_template.services.<env>.yml
//! │       └── <site>/
//! │           ├── settings.php
//! │           ├── settings.<env>.php
//! │           ├── services.<env>.yml
//! │           └── files/                    # public uploads, mode 0775
//! ├── settings/
//! │   ├── example_template.settings.database.php
//! │   └── settings.<site>.database.php      # credentials, mode 0640
//! ├── drush/
//! │   ├── aliases.drushrc.example_template.php
//! │   ├── <site>.aliases.drushrc.php
//! │   ├── drushrc.example_template.php
//! │   └── drushrc.php
//! ├── config/
//! ├── private_files/<site>/
//! ├── vendor/drush/drush/drush              # project-local install tool
//! └── sitesmith.toml                        # optional build-file defaults
//! ```

use std::path::{Path, PathBuf};

/// Web root below the project: `<root>/docroot`
pub fn docroot(root: &Path) -> PathBuf {
    root.join("docroot")
}

/// Multisite registry and per-site directories under the docroot.
pub mod sites {
    use super::*;

    /// `docroot/sites/`
    pub fn dir(root: &Path) -> PathBuf {
        docroot(root).join("sites")
    }

    /// Routing registry: `docroot/sites/sites.php`
    pub fn registry(root: &Path) -> PathBuf {
        dir(root).join("sites.php")
    }

    /// `docroot/sites/example_template.sites.php`
    pub fn registry_template(root: &Path) -> PathBuf {
        dir(root).join("example_template.sites.php")
    }

    /// One site's directory: `docroot/sites/<site>/`
    pub fn site_dir(root: &Path, site: &str) -> PathBuf {
        dir(root).join(site)
    }

    /// `docroot/sites/<site>/settings.php`
    pub fn settings(root: &Path, site: &str) -> PathBuf {
        site_dir(root, site).join("settings.php")
    }

    /// `docroot/sites/default/example_template.settings.php`
    pub fn settings_template(root: &Path) -> PathBuf {
        dir(root).join("default/example_template.settings.php")
    }

    /// `docroot/sites/<site>/settings.<env>.php`
    pub fn env_settings(root: &Path, site: &str, env: &str) -> PathBuf {
        site_dir(root, site).join(format!("settings.{env}.php"))
    }

    /// `docroot/sites/default/example_template.settings.<env>.php`
    pub fn env_settings_template(root: &Path, env: &str) -> PathBuf {
        dir(root).join(format!("default/example_template.settings.{env}.php"))
    }

    /// `docroot/sites/<site>/services.<env>.yml`
    pub fn services(root: &Path, site: &str, env: &str) -> PathBuf {
        site_dir(root, site).join(format!("services.{env}.yml"))
    }

    /// `docroot/sites/default/example_template.services.<env>.yml`
    pub fn services_template(root: &Path, env: &str) -> PathBuf {
        dir(root).join(format!("default/example_template.services.{env}.yml"))
    }

    /// Public upload directory: `docroot/sites/<site>/files/`
    pub fn files_dir(root: &Path, site: &str) -> PathBuf {
        site_dir(root, site).join("files")
    }
}

/// Project-level settings, deployment files and scratch directories.
pub mod project {
    use super::*;

    /// Credentials file: `settings/settings.<site>.database.php`
    pub fn database_settings(root: &Path, site: &str) -> PathBuf {
        root.join(format!("settings/settings.{site}.database.php"))
    }

    /// `settings/example_template.settings.database.php`
    pub fn database_settings_template(root: &Path) -> PathBuf {
        root.join("settings/example_template.settings.database.php")
    }

    /// Deployment aliases: `drush/<site>.aliases.drushrc.php`
    pub fn aliases(root: &Path, site: &str) -> PathBuf {
        root.join(format!("drush/{site}.aliases.drushrc.php"))
    }

    /// `drush/aliases.drushrc.example_template.php`
    pub fn aliases_template(root: &Path) -> PathBuf {
        root.join("drush/aliases.drushrc.example_template.php")
    }

    /// Local tool options (active domain): `drush/drushrc.php`
    pub fn drushrc(root: &Path) -> PathBuf {
        root.join("drush/drushrc.php")
    }

    /// `drush/drushrc.example_template.php`
    pub fn drushrc_template(root: &Path) -> PathBuf {
        root.join("drush/drushrc.example_template.php")
    }

    /// Exported configuration: `config/`
    pub fn config_dir(root: &Path) -> PathBuf {
        root.join("config")
    }

    /// Non-public uploads: `private_files/<site>/`
    pub fn private_files_dir(root: &Path, site: &str) -> PathBuf {
        root.join("private_files").join(site)
    }

    /// Build-file defaults: `sitesmith.toml`
    pub fn buildfile(root: &Path) -> PathBuf {
        root.join("sitesmith.toml")
    }

    /// Project-local install tool: `vendor/drush/drush/drush`
    pub fn local_drush(root: &Path) -> PathBuf {
        root.join("vendor/drush/drush/drush")
    }

    /// Directories that must exist (and be kept in version control) for a
    /// site to build and test.
    pub fn required_dirs(root: &Path, site: &str) -> Vec<PathBuf> {
        vec![
            config_dir(root),
            private_files_dir(root, site),
            docroot(root).join("modules"),
            docroot(root).join("profiles"),
            docroot(root).join("themes"),
            docroot(root).join("libraries"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docroot() {
        let root = Path::new("/var/www/acme");
        assert_eq!(docroot(root), PathBuf::from("/var/www/acme/docroot"));
    }

    #[test]
    fn test_sites_paths() {
        let root = Path::new("/srv/project");

        assert_eq!(
            sites::registry(root),
            PathBuf::from("/srv/project/docroot/sites/sites.php")
        );
        assert_eq!(
            sites::settings(root, "acme"),
            PathBuf::from("/srv/project/docroot/sites/acme/settings.php")
        );
        assert!(sites::settings_template(root)
            .ends_with("sites/default/example_template.settings.php"));
        assert_eq!(
            sites::env_settings(root, "acme", "acc"),
            PathBuf::from("/srv/project/docroot/sites/acme/settings.acc.php")
        );
        assert!(sites::env_settings_template(root, "dev")
            .ends_with("default/example_template.settings.dev.php"));
        assert_eq!(
            sites::services(root, "acme", "dev"),
            PathBuf::from("/srv/project/docroot/sites/acme/services.dev.yml")
        );
        assert!(sites::files_dir(root, "acme").ends_with("sites/acme/files"));
    }

    #[test]
    fn test_project_paths() {
        let root = Path::new("/srv/project");

        assert_eq!(
            project::database_settings(root, "acme"),
            PathBuf::from("/srv/project/settings/settings.acme.database.php")
        );
        assert_eq!(
            project::aliases(root, "acme"),
            PathBuf::from("/srv/project/drush/acme.aliases.drushrc.php")
        );
        assert_eq!(
            project::drushrc(root),
            PathBuf::from("/srv/project/drush/drushrc.php")
        );
        assert!(project::buildfile(root).ends_with("sitesmith.toml"));
        assert!(project::local_drush(root).ends_with("vendor/drush/drush/drush"));
    }

    #[test]
    fn test_required_dirs_cover_site_scratch_space() {
        let root = Path::new("/srv/project");
        let dirs = project::required_dirs(root, "acme");

        assert!(dirs.contains(&PathBuf::from("/srv/project/config")));
        assert!(dirs.contains(&PathBuf::from("/srv/project/private_files/acme")));
        assert!(dirs.contains(&PathBuf::from("/srv/project/docroot/modules")));
        assert_eq!(dirs.len(), 6);
    }
}
