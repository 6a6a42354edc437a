//! Template - Locating and loading blueprint module sources
//!
//! Blueprint templates live on disk as directories of `.tf` files, one
//! directory per blueprint ID. Candidate roots are probed in priority
//! order and the first root that yields any matching file wins; later
//! roots are never consulted. A root that is missing, unreadable, or
//! contains no `.tf` files is skipped, not an error - the caller treats
//! a missing template as the trigger for raw-resource fallback.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::schema::{VariableSchema, extract_variables};

/// Extension of template source files
pub const TEMPLATE_EXTENSION: &str = "tf";

/// Environment variable naming the highest-priority template root
pub const TEMPLATE_ROOT_ENV: &str = "TERRAGEN_BLUEPRINT_ROOT";

/// Fixed root used by deployed installations
pub const DEPLOYED_TEMPLATE_ROOT: &str = "/opt/armportal/infra/modules";

/// A source of blueprint template text.
///
/// The trait exists so the lookup chain can mix filesystem directories
/// with other backends (or test doubles) without changing the observable
/// first-hit ordering. Implementations must treat I/O failures as `None`.
pub trait TemplateSource: Send + Sync {
    /// Concatenated template text for a blueprint, or `None` when this
    /// source has nothing for it
    fn load(&self, blueprint_id: &str) -> Option<String>;
}

/// Template source reading `.tf` files from `<root>/<blueprint_id>/`.
///
/// Only immediate files are read; contents are concatenated in
/// lexicographic filename order with a blank-line separator so the
/// result is deterministic regardless of directory enumeration order.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirectorySource {
    fn load(&self, blueprint_id: &str) -> Option<String> {
        let dir = self.root.join(blueprint_id);
        if !dir.is_dir() {
            return None;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = %dir.display(), %err, "skipping unreadable template directory");
                return None;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext == TEMPLATE_EXTENSION)
            })
            .collect();

        if files.is_empty() {
            return None;
        }
        files.sort();

        let mut parts = Vec::with_capacity(files.len());
        for path in files {
            match fs::read_to_string(&path) {
                Ok(content) => parts.push(content),
                Err(err) => {
                    warn!(file = %path.display(), %err, "skipping candidate with unreadable template file");
                    return None;
                }
            }
        }
        Some(parts.join("\n\n"))
    }
}

/// A loaded blueprint: its ID plus the concatenated source text
#[derive(Debug, Clone)]
pub struct BlueprintTemplate {
    pub blueprint_id: String,
    pub source: String,
}

impl BlueprintTemplate {
    /// Variable declarations recovered from the template text
    pub fn variables(&self) -> VariableSchema {
        extract_variables(&self.source)
    }
}

/// Ordered chain of template sources with first-hit short-circuit.
///
/// The production chain, highest priority first:
/// 1. operator override root ([`TEMPLATE_ROOT_ENV`] or
///    [`TemplateLoader::with_override`])
/// 2. the deployed runtime root [`DEPLOYED_TEMPLATE_ROOT`]
/// 3. `infra/modules` relative to the repository checkout
pub struct TemplateLoader {
    sources: Vec<Box<dyn TemplateSource>>,
}

impl TemplateLoader {
    /// Production chain, reading the override root from the environment
    pub fn new() -> Self {
        Self::with_override(std::env::var(TEMPLATE_ROOT_ENV).ok().map(PathBuf::from))
    }

    /// Production chain with an explicit (or absent) override root
    pub fn with_override(override_root: Option<PathBuf>) -> Self {
        let mut roots = Vec::new();
        if let Some(root) = override_root {
            roots.push(root);
        }
        roots.push(PathBuf::from(DEPLOYED_TEMPLATE_ROOT));
        roots.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("../infra/modules"));
        Self::with_roots(roots)
    }

    /// Chain of plain directory roots, in the given priority order
    pub fn with_roots(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            sources: roots
                .into_iter()
                .map(|root| Box::new(DirectorySource::new(root)) as Box<dyn TemplateSource>)
                .collect(),
        }
    }

    /// Chain of arbitrary sources, in the given priority order
    pub fn with_sources(sources: Vec<Box<dyn TemplateSource>>) -> Self {
        Self { sources }
    }

    /// Load the template for a blueprint, or `None` when no source has it
    pub fn load(&self, blueprint_id: &str) -> Option<BlueprintTemplate> {
        for source in &self.sources {
            if let Some(text) = source.load(blueprint_id) {
                return Some(BlueprintTemplate {
                    blueprint_id: blueprint_id.to_string(),
                    source: text,
                });
            }
        }
        debug!(blueprint_id, "no template found in any candidate root");
        None
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}
