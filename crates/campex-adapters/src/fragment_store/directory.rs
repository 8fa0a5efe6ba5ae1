//! Fragments stored as files: `<root>/<category>/<name>.json` or `.toml`.

use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use campex_core::{
    application::{ApplicationError, ports::FragmentStore},
    domain::{FragmentCategory, RelativePath},
    error::ExportResult,
};

use crate::filesystem::map_io_error;

/// Reads fragments from a directory tree, one subdirectory per category.
///
/// JSON is tried before TOML. Nothing is cached; every call reads the file.
#[derive(Debug, Clone)]
pub struct DirectoryFragmentStore {
    root: PathBuf,
}

impl DirectoryFragmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, category: FragmentCategory, name: &str) -> Option<[PathBuf; 2]> {
        // names come from the draft; keep them inside the category directory
        let relative = RelativePath::try_new(name).ok()?;
        if relative.as_path().components().count() != 1 {
            return None;
        }
        let dir = self.root.join(category.as_str());
        Some([
            dir.join(format!("{name}.json")),
            dir.join(format!("{name}.toml")),
        ])
    }
}

#[async_trait]
impl FragmentStore for DirectoryFragmentStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn load(&self, category: FragmentCategory, name: &str) -> ExportResult<Option<Value>> {
        let Some(candidates) = self.candidates(category, name) else {
            debug!("Fragment name is not a plain file name");
            return Ok(None);
        };

        for path in candidates {
            let raw = match tokio::fs::read_to_string(&path).await {
                Ok(raw) => raw,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(map_io_error(&path, e, "read fragment")),
            };
            debug!(path = %path.display(), "Reading fragment");
            return parse(&path, &raw).map(Some);
        }
        Ok(None)
    }
}

fn parse(path: &Path, raw: &str) -> ExportResult<Value> {
    let parsed = if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str::<Value>(raw).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<Value>(raw).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| {
        ApplicationError::FragmentParse {
            path: path.to_path_buf(),
            reason,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DirectoryFragmentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let store = DirectoryFragmentStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn loads_json_fragment() {
        let (_dir, store) =
            store_with(&[("colors/dark.json", r##"{"colors":{"primary":"#000"}}"##)]);
        let doc = store.load(FragmentCategory::Colors, "dark").await.unwrap();
        assert_eq!(doc, Some(json!({ "colors": { "primary": "#000" } })));
    }

    #[tokio::test]
    async fn loads_toml_fragment() {
        let (_dir, store) = store_with(&[("radii/round.toml", "[geometry]\nradius = \"16px\"\n")]);
        let doc = store.load(FragmentCategory::Radii, "round").await.unwrap();
        assert_eq!(doc, Some(json!({ "geometry": { "radius": "16px" } })));
    }

    #[tokio::test]
    async fn json_wins_over_toml() {
        let (_dir, store) = store_with(&[
            ("fonts/serif.json", r#"{"fonts":{"body":"Lora"}}"#),
            ("fonts/serif.toml", "[fonts]\nbody = \"Georgia\"\n"),
        ]);
        let doc = store.load(FragmentCategory::Fonts, "serif").await.unwrap().unwrap();
        assert_eq!(doc["fonts"]["body"], "Lora");
    }

    #[tokio::test]
    async fn missing_fragment_is_none() {
        let (_dir, store) = store_with(&[]);
        assert_eq!(store.load(FragmentCategory::Colors, "neon").await.unwrap(), None);
    }

    #[tokio::test]
    async fn traversal_names_are_none() {
        let (_dir, store) = store_with(&[("base/default.json", "{}")]);
        assert_eq!(
            store.load(FragmentCategory::Colors, "../base/default").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn broken_fragment_is_a_parse_error() {
        let (_dir, store) = store_with(&[("base/default.json", "{ not json")]);
        let err = store.load(FragmentCategory::Base, "default").await.unwrap_err();
        assert!(err.to_string().contains("could not be parsed"));
    }
}
