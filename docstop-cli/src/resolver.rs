//! Include resolution against the file system

use docstop_core::{read_fragment, select_path, ReferenceLocator, ReferenceResolver, Resolution};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves `<include>` elements relative to the documented source file
///
/// Inherited documentation needs a compiler's view of the type hierarchy,
/// so `<inheritdoc>` is never resolved here.
#[derive(Debug, Clone)]
pub struct FileResolver {
    base_dir: PathBuf,
}

impl FileResolver {
    /// Resolver for includes written in `source`
    pub fn for_source(source: &Path) -> Self {
        let base_dir = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { base_dir }
    }

    /// Resolver reading included files from `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ReferenceResolver for FileResolver {
    fn resolve(&self, locator: &ReferenceLocator) -> Resolution {
        let ReferenceLocator::Include { file, path } = locator else {
            return Resolution::Unresolved;
        };

        let target = self.base_dir.join(file);
        let text = match fs::read_to_string(&target) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("cannot read included file {}: {e}", target.display());
                return Resolution::Unresolved;
            }
        };
        let document = match read_fragment(&text, 0) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::debug!("cannot read markup of {}: {e}", target.display());
                return Resolution::Unresolved;
            }
        };

        let selected = select_path(&document, path);
        if selected.is_empty() {
            log::debug!("{path} selects nothing in {}", target.display());
            Resolution::Unresolved
        } else {
            Resolution::Resolved(selected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn include(file: &str, path: &str) -> ReferenceLocator {
        ReferenceLocator::Include {
            file: file.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_resolves_relative_to_source() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Doc.xml"),
            "<Root><summary>Text</summary></Root>",
        )
        .unwrap();

        let resolver = FileResolver::for_source(&temp_dir.path().join("Widget.cs"));
        match resolver.resolve(&include("Doc.xml", "/Root/*")) {
            Resolution::Resolved(nodes) => assert_eq!(nodes[0].tag(), Some("summary")),
            Resolution::Unresolved => panic!("Expected resolved include"),
        }
    }

    #[test]
    fn test_unusable_targets_are_unresolved() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Broken.xml"), "<Root><summary></Root>").unwrap();
        let resolver = FileResolver::new(temp_dir.path());

        assert_eq!(
            resolver.resolve(&include("Missing.xml", "/Root/*")),
            Resolution::Unresolved
        );
        assert_eq!(
            resolver.resolve(&include("Broken.xml", "/Root/*")),
            Resolution::Unresolved
        );
        assert_eq!(
            resolver.resolve(&ReferenceLocator::Inherited { cref: None }),
            Resolution::Unresolved
        );
    }
}
