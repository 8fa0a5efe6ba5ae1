use serde_json::json;

use super::{EmitContext, Emitter};
use crate::error::{Context, ExportResult};

/// Pinned so that every export builds against the same toolchain.
const DEPENDENCIES: &[(&str, &str)] = &[
    ("next", "14.2.5"),
    ("react", "18.3.1"),
    ("react-dom", "18.3.1"),
];

const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@types/node", "20.14.12"),
    ("@types/react", "18.3.3"),
    ("autoprefixer", "10.4.19"),
    ("postcss", "8.4.40"),
    ("tailwindcss", "3.4.7"),
    ("typescript", "5.5.4"),
];

/// `package.json`, named after the package identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageManifest;

impl Emitter for PackageManifest {
    fn relative_path(&self) -> &'static str {
        "package.json"
    }

    fn render(&self, context: &EmitContext<'_>) -> ExportResult<String> {
        let pinned = |deps: &[(&str, &str)]| {
            deps.iter()
                .map(|(name, version)| (name.to_string(), json!(version)))
                .collect::<serde_json::Map<_, _>>()
        };

        let manifest = json!({
            "name": context.package_id.as_str(),
            "version": "0.1.0",
            "private": true,
            "scripts": {
                "dev": "next dev",
                "build": "next build",
                "start": "next start"
            },
            "dependencies": pinned(DEPENDENCIES),
            "devDependencies": pinned(DEV_DEPENDENCIES),
        });

        let mut out = serde_json::to_string_pretty(&manifest).context("serializing package.json")?;
        out.push('\n');
        Ok(out)
    }
}
