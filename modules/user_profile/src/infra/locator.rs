//! Filesystem resource locator
//!
//! Each search root contributes `<root>/schema/<namespace>`. Roots are
//! configured lowest priority first and reported highest priority first.

use crate::domain::ResourceLocator;
use std::path::PathBuf;

/// Directory that holds schema namespaces under every search root
pub const SCHEMA_DIR: &str = "schema";

#[derive(Debug, Clone, Default)]
pub struct FsResourceLocator {
    roots: Vec<PathBuf>,
}

impl FsResourceLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl ResourceLocator for FsResourceLocator {
    /// `recursive` reports every root that has the namespace, otherwise only the
    /// highest priority one. `include_files` also accepts a plain file in place
    /// of a directory.
    fn find_resources(&self, namespace: &str, recursive: bool, include_files: bool) -> Vec<PathBuf> {
        let found = self
            .roots
            .iter()
            .rev()
            .map(|root| root.join(SCHEMA_DIR).join(namespace))
            .filter(|path| path.is_dir() || (include_files && path.is_file()));

        if recursive {
            found.collect()
        } else {
            found.take(1).collect()
        }
    }
}
