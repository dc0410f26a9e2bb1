//! Third-party fragment discovery.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::DeserializationError;
use crate::model::{OriginTag, ParsedSettings};
use crate::parser::Parser;
use crate::util::debug;

/// A synchronous façade over an OS app-extension catalog lookup.
///
/// The real catalog is awaitable; per spec.md §5 and §9 ("Async fragment discovery"), the
/// resolver never exposes that scheduler to its own callers. An implementation is expected
/// to block internally (a latch over a background executor) and return only once every
/// extension folder it knows about has been enumerated.
pub trait AppExtensionCatalog {
    /// Returns the filesystem paths of every installed app extension's public folder.
    fn public_folders(&self) -> Vec<PathBuf>;
}

/// An [`AppExtensionCatalog`] with no registered extensions. The default for platforms or
/// test runs with no OS extension mechanism to query.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtensionCatalog;

impl AppExtensionCatalog for NoExtensionCatalog {
    fn public_folders(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// One fragment file's parse result plus the file it came from, for warning attribution.
#[derive(Debug)]
pub struct FragmentParseFailure {
    /// The file that failed to parse.
    pub path: PathBuf,
    /// Why it failed.
    pub error: DeserializationError
}

/// Enumerates fragment roots and an [`AppExtensionCatalog`], parsing every `.json` file found
/// under a publisher sub-directory whose name is not a disabled namespace (spec.md §4.5).
#[derive(Debug)]
pub struct FragmentLoader;

impl FragmentLoader {
    /// Walks `roots` (typically the per-user and machine-wide fragment directories) plus
    /// every folder `catalog` reports, skipping publisher namespaces in `disabled_sources`.
    ///
    /// A single fragment file failing to parse never aborts the scan (spec.md §7: "any error
    /// during a single fragment file... must not fail sibling loads"); it is instead recorded
    /// in the returned failure list for silent logging by the caller.
    pub fn load(
        roots: &[PathBuf],
        catalog: &dyn AppExtensionCatalog,
        disabled_sources: &HashSet<String>
    ) -> (Vec<ParsedSettings>, Vec<FragmentParseFailure>) {
        debug!("FragmentLoader::load", roots);

        let mut all_roots: Vec<PathBuf> = roots.to_vec();
        all_roots.extend(catalog.public_folders());

        let mut parsed = Vec::new();
        let mut failures = Vec::new();

        for root in all_roots {
            let Ok(publishers) = std::fs::read_dir(&root) else { continue };
            for publisher_entry in publishers.flatten() {
                let publisher_path = publisher_entry.path();
                if !publisher_path.is_dir() {
                    continue;
                }
                let Some(namespace) = publisher_path.file_name().and_then(|n| n.to_str()) else { continue };
                if disabled_sources.contains(namespace) {
                    continue;
                }
                Self::load_publisher(&publisher_path, namespace, &mut parsed, &mut failures);
            }
        }

        (parsed, failures)
    }

    fn load_publisher(dir: &Path, namespace: &str, parsed: &mut Vec<ParsedSettings>, failures: &mut Vec<FragmentParseFailure>) {
        let Ok(entries) = std::fs::read_dir(dir) else { return };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(_) => continue
            };
            match Parser::parse(&bytes, OriginTag::Fragment) {
                Ok(mut settings) => {
                    for profile in settings.profiles.iter_mut() {
                        profile.source = Some(namespace.to_string());
                    }
                    parsed.push(settings);
                }
                Err(error) => failures.push(FragmentParseFailure { path, error })
            }
        }
    }
}
