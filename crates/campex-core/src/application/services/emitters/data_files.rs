//! Emitters that serialize the draft and the assembled theme.

use serde_json::json;

use super::{EmitContext, Emitter};
use crate::error::{Context, ExportResult};

fn pretty(value: &serde_json::Value, what: &str) -> ExportResult<String> {
    let mut out = serde_json::to_string_pretty(value).context(format!("serializing {what}"))?;
    out.push('\n');
    Ok(out)
}

/// `content/theme.json`: the layout sections, in draft order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeDataFile;

impl Emitter for ThemeDataFile {
    fn relative_path(&self) -> &'static str {
        "content/theme.json"
    }

    fn render(&self, context: &EmitContext<'_>) -> ExportResult<String> {
        let sections = serde_json::to_value(&context.draft.layout_config)
            .context("serializing layout sections")?;
        pretty(&json!({ "layout": { "sections": sections } }), "theme data")
    }
}

/// `content/content.json`: variant name and header/footer settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDataFile;

impl Emitter for ContentDataFile {
    fn relative_path(&self) -> &'static str {
        "content/content.json"
    }

    fn render(&self, context: &EmitContext<'_>) -> ExportResult<String> {
        let draft = context.draft;
        let header = serde_json::to_value(&draft.header_config).context("serializing header")?;
        let footer = serde_json::to_value(&draft.footer_config).context("serializing footer")?;
        pretty(
            &json!({
                "variantName": draft.variant_name,
                "header": header,
                "footer": footer,
            }),
            "content data",
        )
    }
}

/// `app/theme.css`: the theme's style-variable block.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleSheet;

impl Emitter for StyleSheet {
    fn relative_path(&self) -> &'static str {
        "app/theme.css"
    }

    fn render(&self, context: &EmitContext<'_>) -> ExportResult<String> {
        Ok(context.theme.render_style_block())
    }
}
