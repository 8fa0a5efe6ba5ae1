use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    error::DomainError,
    value_objects::{PackageId, SectionName},
};

/// The user-authored, not-yet-published campaign configuration.
///
/// Owned by the upstream wizard; this pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    /// Set when the draft belongs to a persisted campaign.
    #[serde(default)]
    pub campaign_id: Option<String>,
    pub variant_name: String,
    #[serde(default)]
    pub header_config: ChromeConfig,
    #[serde(default)]
    pub footer_config: ChromeConfig,
    #[serde(default)]
    pub layout_config: Vec<LayoutSection>,
    #[serde(default)]
    pub theme_config: ThemeConfig,
}

impl CampaignDraft {
    /// Derive the package identifier from `variant_name`.
    pub fn package_id(&self) -> PackageId {
        PackageId::derive(&self.variant_name)
    }

    /// Parse every section name, preserving layout order.
    pub fn section_names(&self) -> Result<Vec<SectionName>, DomainError> {
        self.layout_config
            .iter()
            .map(|section| section.name.parse())
            .collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.variant_name.trim().is_empty() {
            return Err(DomainError::InvalidDraft(
                "variantName cannot be empty".into(),
            ));
        }
        self.section_names()?;

        if !self.theme_config.theme_overrides.is_object() {
            return Err(DomainError::InvalidDraft(
                "themeConfig.themeOverrides must be an object".into(),
            ));
        }
        Ok(())
    }
}

/// Header or footer settings.
///
/// Unknown flags are kept in `extra` and carried into the content data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the layout. Everything besides `name` is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSection {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Theme selection: three optional preset names plus free-form overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default)]
    pub color_preset: Option<String>,
    #[serde(default)]
    pub font_preset: Option<String>,
    #[serde(default)]
    pub radius_preset: Option<String>,
    #[serde(default = "empty_object")]
    pub theme_overrides: Value,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_preset: None,
            font_preset: None,
            radius_preset: None,
            theme_overrides: empty_object(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
