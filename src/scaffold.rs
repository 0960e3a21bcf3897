//! Templated file materialization.
//!
//! A template is copied to its target at most once: an existing target is
//! never rewritten, so operator edits survive any number of reruns. On the
//! way over, `{{ name }}` tokens are replaced with resolved values in a
//! single pass, and the result lands under a restrictive file mode.
//!
//! The write goes through a temporary file in the target directory that is
//! renamed into place, so an interrupted run cannot leave a half-written
//! target that a later run would treat as already done.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Error;

/// Mode for generated secret-bearing files: no world access.
pub const SECRET_FILE_MODE: u32 = 0o640;

/// Mode for generated public directories (file upload targets): group-writable.
pub const PUBLIC_DIR_MODE: u32 = 0o775;

/// Ordered `{{ token }}` -> replacement map.
///
/// Built up one entry per resolved setting (site name, environment,
/// database credentials, domain), then consumed by [`materialize`].
/// Insertion order does not affect the output: substitution is a single
/// simultaneous pass, not sequential rewriting.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token form a bare identifier takes inside a template.
    pub fn token(name: &str) -> String {
        format!("{{{{ {name} }}}}")
    }

    /// Register the replacement for `{{ name }}`. Re-inserting a name
    /// overwrites its previous value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let token = Self::token(name);
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let token = Self::token(name);
        self.entries
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

/// What [`materialize`] did, or declined to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Target written from the template with placeholders substituted.
    Created,
    /// Target already present; nothing touched.
    AlreadyExists,
    /// Template absent; nothing to copy. Non-fatal for a batch.
    TemplateMissing,
}

/// Replace every placeholder occurrence in `text` in one pass.
///
/// Earliest match wins, and at equal positions the longest token wins.
/// Replacement values are never re-scanned for further tokens, and tokens
/// without an entry are left verbatim so a template stays reusable in
/// contexts where not every placeholder is resolved yet.
pub fn substitute(text: &str, placeholders: &PlaceholderMap) -> String {
    if placeholders.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let mut earliest: Option<(usize, &str, &str)> = None;
        for (token, value) in placeholders.iter() {
            if let Some(at) = rest.find(token) {
                let better = match earliest {
                    None => true,
                    Some((best_at, best_token, _)) => {
                        at < best_at || (at == best_at && token.len() > best_token.len())
                    }
                };
                if better {
                    earliest = Some((at, token, value));
                }
            }
        }
        let Some((at, token, value)) = earliest else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + token.len()..];
    }
    out
}

/// Materialize `target` from `template`, substituting `placeholders`.
///
/// Repeated invocations are safe: once the target exists this is a no-op
/// reporting [`Outcome::AlreadyExists`]. The rendered content is staged in
/// a temporary file next to the target, given [`SECRET_FILE_MODE`], and
/// renamed into place.
pub fn materialize(
    target: &Path,
    template: &Path,
    placeholders: &PlaceholderMap,
) -> Result<Outcome, Error> {
    if target.exists() {
        return Ok(Outcome::AlreadyExists);
    }
    if !template.exists() {
        return Ok(Outcome::TemplateMissing);
    }

    let text = fs::read_to_string(template).map_err(|e| Error::filesystem(template, e))?;
    let rendered = substitute(&text, placeholders);

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(parent).map_err(|e| Error::filesystem(parent, e))?;
    staged
        .write_all(rendered.as_bytes())
        .map_err(|e| Error::filesystem(target, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(SECRET_FILE_MODE))
            .map_err(|e| Error::filesystem(target, e))?;
    }

    staged
        .persist(target)
        .map_err(|e| Error::filesystem(target, e.error))?;
    Ok(Outcome::Created)
}

/// Set the permission bits on an existing path. No-op off unix.
pub fn set_mode(path: &Path, mode: u32) -> Result<(), Error> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| Error::filesystem(path, e))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}
