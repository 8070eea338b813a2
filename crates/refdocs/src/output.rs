//! Output file naming and writing
//!
//! File names follow a fixed scheme:
//!
//! - API entries: `<module>_<name>_<entrytype>.html`, where the module
//!   name has its `@` dropped and `/` replaced by `_`;
//! - root CLI commands: `<name>.html`;
//! - CLI subcommands: `<parent>/<name>.html`.
//!
//! The entry type suffix keeps `Foo` (class) and `foo` (function) apart
//! on case-insensitive file systems. Anything the scheme still maps to the
//! same case-folded path is disambiguated when the [`OutputPlan`] for a
//! run is assigned.

use crate::collection::{resolve_parent, EntryCollection};
use crate::diagnostics::{RefdocsError, RefdocsResult};
use crate::entry::DocEntry;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// `@angular/common/http` -> `angular_common_http`
pub fn normalize_module_name(module_name: &str) -> String {
    module_name.replacen('@', "", 1).replace('/', "_")
}

/// File name for an API entry
pub fn api_filename(module_name: &str, name: &str, entry_type: &str) -> String {
    format!(
        "{}_{}_{}.html",
        normalize_module_name(module_name),
        name,
        entry_type.to_lowercase()
    )
}

/// File name for a CLI command, nested under its parent when it has one
pub fn cli_filename(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{}/{}.html", parent, name),
        None => format!("{}.html", name),
    }
}

/// File name for any entry, relative to the output directory
pub fn normalized_filename(
    module_name: &str,
    entry: &DocEntry,
    collections: &[EntryCollection],
) -> String {
    match entry.as_cli() {
        Some(cmd) => {
            let parent = cmd
                .parent
                .and_then(|p| resolve_parent(collections, p))
                .map(|p| p.name.as_str());
            if cmd.parent.is_some() && parent.is_none() {
                tracing::warn!("parent of CLI subcommand `{}` not found", cmd.name);
            }
            cli_filename(parent, &cmd.name)
        }
        None => api_filename(module_name, entry.name(), entry.entry_type_tag()),
    }
}

/// Directory depth of a relative output path (`ng/build.html` -> 1)
pub fn depth(relative: &str) -> usize {
    relative.matches('/').count()
}

/// Final relative path of every entry in a run.
///
/// Assigned once, before anything is rendered, so cross-reference links
/// and written files always agree. Unknown and malformed entries get no
/// page.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pages: Vec<Vec<Option<String>>>,
}

impl OutputPlan {
    /// Assign a unique page to every renderable entry, in run order.
    pub fn assign(collections: &[EntryCollection]) -> Self {
        let mut claims = Claims::default();
        let mut pages = Vec::with_capacity(collections.len());

        for collection in collections {
            let mut assigned = Vec::with_capacity(collection.entries.len());
            for entry in &collection.entries {
                let page = match entry {
                    DocEntry::Unknown(_) | DocEntry::Malformed(_) => None,
                    _ => Some(claims.claim(&normalized_filename(
                        &collection.module_name,
                        entry,
                        collections,
                    ))),
                };
                assigned.push(page);
            }
            pages.push(assigned);
        }

        Self { pages }
    }

    /// Page of the `entry`-th entry of the `collection`-th collection
    pub fn page(&self, collection: usize, entry: usize) -> Option<&str> {
        self.pages.get(collection)?.get(entry)?.as_deref()
    }
}

/// Case-folded paths handed out so far
#[derive(Debug, Default)]
struct Claims {
    claimed: HashSet<String>,
}

impl Claims {
    /// Reserve a unique relative path.
    ///
    /// The first claimant keeps the requested name; later case-insensitive
    /// collisions get `-1`, `-2`, ... appended before the extension.
    fn claim(&mut self, filename: &str) -> String {
        if self.claimed.insert(filename.to_lowercase()) {
            return filename.to_string();
        }

        let (stem, ext) = filename
            .rsplit_once('.')
            .map(|(stem, ext)| (stem, format!(".{}", ext)))
            .unwrap_or((filename, String::new()));

        let mut counter = 1;
        loop {
            let candidate = format!("{}-{}{}", stem, counter, ext);
            if self.claimed.insert(candidate.to_lowercase()) {
                tracing::warn!(
                    "output file {} already used in this run, writing {} instead",
                    filename,
                    candidate
                );
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Writes rendered pages below an output directory
#[derive(Debug)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// Create a writer for the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare(&self) -> RefdocsResult<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| RefdocsError::Write {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Write a page, creating parent directories as needed.
    pub fn write(&self, relative: &str, html: &str) -> RefdocsResult<PathBuf> {
        let path = self.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| RefdocsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, html).map_err(|source| RefdocsError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
