//! Theme Assembler - merges fragments and overrides into one validated theme.
//!
//! Merge order is fixed: base, colors, fonts, radii, then the draft's
//! `themeOverrides`. Nothing leaves this module unless the schema accepts it.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::ThemeSchema,
        services::fragment_loader::{FragmentLoader, FragmentSet},
    },
    domain::{AssembledTheme, DomainError, ThemeConfig, deep_merge},
    error::ExportResult,
};

pub struct ThemeAssembler {
    loader: FragmentLoader,
    schema: Arc<dyn ThemeSchema>,
}

impl ThemeAssembler {
    pub fn new(loader: FragmentLoader, schema: Arc<dyn ThemeSchema>) -> Self {
        Self { loader, schema }
    }

    /// Load, merge and validate the theme for `config`.
    #[instrument(
        skip_all,
        fields(
            colors = config.color_preset.as_deref().unwrap_or("-"),
            fonts = config.font_preset.as_deref().unwrap_or("-"),
            radii = config.radius_preset.as_deref().unwrap_or("-"),
        )
    )]
    pub async fn assemble(&self, config: &ThemeConfig) -> ExportResult<AssembledTheme> {
        let fragments = self.loader.load_all(config).await?;
        let merged = merge(&fragments, &config.theme_overrides);

        if let Err(errors) = self.schema.validate(&merged) {
            warn!(count = errors.len(), "Assembled theme failed validation");
            return Err(DomainError::ThemeValidation { errors }.into());
        }

        info!("Theme assembled and validated");
        Ok(AssembledTheme::validated(merged))
    }
}

/// Deep-merge a fragment set and the overrides in precedence order.
pub fn merge(fragments: &FragmentSet, overrides: &Value) -> Value {
    let mut document = Value::Object(Map::new());
    for fragment in fragments.in_merge_order() {
        deep_merge(&mut document, &Value::Object(fragment.document().clone()));
    }
    deep_merge(&mut document, overrides);
    document
}
