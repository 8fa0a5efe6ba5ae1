use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A workspace-relative path.
///
/// Invariant: never absolute and never climbs out of its root with `..`.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::InvalidPath {
                path: path.display().to_string(),
                reason: "absolute paths are not allowed".into(),
            });
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(DomainError::InvalidPath {
                path: path.display().to_string(),
                reason: "path must stay inside its root".into(),
            });
        }
        Ok(Self(path))
    }

    /// Express `path` relative to `root`.
    pub fn strip(root: &Path, path: &Path) -> Result<Self, DomainError> {
        let relative = path.strip_prefix(root).map_err(|_| DomainError::InvalidPath {
            path: path.display().to_string(),
            reason: format!("not inside {}", root.display()),
        })?;
        Self::try_new(relative)
    }

    /// Resolve against a root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// `/`-separated form, independent of the host platform.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_and_parent_components() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("app/../../x").is_err());
        assert!(RelativePath::try_new("app/page.tsx").is_ok());
    }

    #[test]
    fn strip_requires_containment() {
        let rel = RelativePath::strip(Path::new("/src"), Path::new("/src/components/Hero.tsx"))
            .unwrap();
        assert_eq!(rel.to_slash_string(), "components/Hero.tsx");
        assert!(RelativePath::strip(Path::new("/src"), Path::new("/other/Hero.tsx")).is_err());
    }

    #[test]
    fn under_joins_root() {
        let rel = RelativePath::try_new("content/theme.json").unwrap();
        assert_eq!(rel.under(Path::new("/ws")), PathBuf::from("/ws/content/theme.json"));
    }
}
