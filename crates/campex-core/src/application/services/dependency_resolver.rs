//! Dependency Resolver - maps alias import specifiers to source files.
//!
//! Only specifiers under the root alias (default `@/`) are resolvable; the
//! alias maps to the source root. Everything else is an external package and
//! is never traversed.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{trace, warn};

use crate::{application::ports::Filesystem, domain::RelativePath};

/// Default root alias.
pub const DEFAULT_ALIAS: &str = "@/";

/// Default extensions, tried in order.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["tsx", "ts"];

/// `from '<spec>'`, bare `import '<spec>'` and dynamic `import('<spec>')`.
static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bfrom\s+|\bimport\s*\(\s*|\bimport\s+)['"]([^'"\r\n]+)['"]"#)
        .expect("import pattern is valid")
});

/// Extract import specifiers from source text.
///
/// Order of first appearance, duplicates removed.
pub fn scan_imports(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    IMPORT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|spec| seen.insert(spec.clone()))
        .collect()
}

pub struct DependencyResolver {
    filesystem: Arc<dyn Filesystem>,
    source_root: PathBuf,
    alias: String,
    extensions: Vec<String>,
}

impl DependencyResolver {
    pub fn new(filesystem: Arc<dyn Filesystem>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            source_root: source_root.into(),
            alias: DEFAULT_ALIAS.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Candidate files for `specifier`, in lookup order.
    ///
    /// `None` for specifiers outside the alias, or ones that would leave the
    /// source root.
    pub fn candidates(&self, specifier: &str) -> Option<Vec<PathBuf>> {
        let rest = specifier.strip_prefix(self.alias.as_str())?;
        let relative = RelativePath::try_new(rest).ok()?;
        let base = relative.under(&self.source_root);
        let base = base.to_string_lossy();

        let files = self.extensions.iter().map(|ext| format!("{base}.{ext}"));
        let indexes = self.extensions.iter().map(|ext| format!("{base}/index.{ext}"));

        Some(files.chain(indexes).map(PathBuf::from).collect())
    }

    /// Resolve a specifier found in `importer` to an existing file.
    ///
    /// External specifiers return `None` silently. Alias specifiers with no
    /// existing candidate are logged and return `None`.
    pub async fn resolve(&self, specifier: &str, importer: &Path) -> Option<PathBuf> {
        if !specifier.starts_with(self.alias.as_str()) {
            trace!(specifier, "External import, not traversed");
            return None;
        }

        let Some(candidates) = self.candidates(specifier) else {
            warn!(
                specifier,
                importer = %importer.display(),
                "Import escapes the source root; skipping"
            );
            return None;
        };

        for candidate in candidates {
            if self.filesystem.is_file(&candidate).await {
                return Some(candidate);
            }
        }

        warn!(
            specifier,
            importer = %importer.display(),
            "Could not resolve import; skipping"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use mockall::predicate::eq;

    fn resolver(fs: MockFilesystem) -> DependencyResolver {
        DependencyResolver::new(Arc::new(fs), "/src")
    }

    #[test]
    fn scans_every_import_form_in_order() {
        let text = r#"
            import React from 'react';
            import { Button } from "@/components/ui/Button";
            import '@/styles/globals';
            const Chart = dynamic(() => import('@/components/Chart'));
            export { Icon } from '@/components/ui/Button';
        "#;
        assert_eq!(
            scan_imports(text),
            vec![
                "react",
                "@/components/ui/Button",
                "@/styles/globals",
                "@/components/Chart",
            ]
        );
    }

    #[test]
    fn scan_ignores_identifiers_ending_in_from() {
        assert!(scan_imports("const datafrom 'x';").is_empty());
    }

    #[test]
    fn candidates_try_files_before_index() {
        let r = resolver(MockFilesystem::new());
        assert_eq!(
            r.candidates("@/lib/utils").unwrap(),
            vec![
                PathBuf::from("/src/lib/utils.tsx"),
                PathBuf::from("/src/lib/utils.ts"),
                PathBuf::from("/src/lib/utils/index.tsx"),
                PathBuf::from("/src/lib/utils/index.ts"),
            ]
        );
    }

    #[test]
    fn candidates_reject_external_and_escaping_specifiers() {
        let r = resolver(MockFilesystem::new());
        assert!(r.candidates("react").is_none());
        assert!(r.candidates("./local").is_none());
        assert!(r.candidates("@/../secrets").is_none());
    }

    #[tokio::test]
    async fn first_existing_candidate_wins() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().returning(|p| {
            p == Path::new("/src/lib/utils/index.tsx") || p == Path::new("/src/lib/utils/index.ts")
        });

        let r = resolver(fs);
        assert_eq!(
            r.resolve("@/lib/utils", Path::new("/src/a.tsx")).await,
            Some(PathBuf::from("/src/lib/utils/index.tsx"))
        );
    }

    #[tokio::test]
    async fn external_specifiers_never_touch_the_filesystem() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().never();
        assert!(resolver(fs).resolve("next/link", Path::new("/src/a.tsx")).await.is_none());
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().times(4).returning(|_| false);
        assert!(resolver(fs).resolve("@/missing", Path::new("/src/a.tsx")).await.is_none());
    }

    #[tokio::test]
    async fn custom_alias_and_extensions() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file()
            .with(eq(PathBuf::from("/src/hooks/useX.js")))
            .returning(|_| true);

        let r = resolver(fs)
            .with_alias("~/")
            .with_extensions(vec!["js".into()]);
        assert_eq!(
            r.resolve("~/hooks/useX", Path::new("/src/a.js")).await,
            Some(PathBuf::from("/src/hooks/useX.js"))
        );
    }
}
