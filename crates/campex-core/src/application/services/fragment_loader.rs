//! Fragment Loader - reads named partial theme documents.
//!
//! Fragments are loaded fresh for every export; nothing is cached.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::FragmentStore},
    domain::{FragmentCategory, ThemeConfig, ThemeFragment},
    error::ExportResult,
};

/// Name of the base fragment when none is configured.
pub const DEFAULT_BASE_NAME: &str = "default";

/// The four fragments one theme is assembled from, in merge order.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSet {
    pub base: ThemeFragment,
    pub colors: ThemeFragment,
    pub fonts: ThemeFragment,
    pub radii: ThemeFragment,
}

impl FragmentSet {
    /// Fragments sorted by category, whatever order they were loaded in.
    pub fn in_merge_order(&self) -> [&ThemeFragment; 4] {
        let mut all = [&self.base, &self.colors, &self.fonts, &self.radii];
        all.sort_by_key(|f| f.category);
        all
    }
}

pub struct FragmentLoader {
    store: Arc<dyn FragmentStore>,
    base_name: String,
}

impl FragmentLoader {
    pub fn new(store: Arc<dyn FragmentStore>) -> Self {
        Self {
            store,
            base_name: DEFAULT_BASE_NAME.into(),
        }
    }

    /// Use a different base fragment name.
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Load one fragment.
    ///
    /// An absent name yields an empty fragment. A named fragment missing from
    /// the store is `FragmentNotFound`.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn load(
        &self,
        category: FragmentCategory,
        name: Option<&str>,
    ) -> ExportResult<ThemeFragment> {
        let Some(name) = name else {
            debug!("No preset selected");
            return Ok(ThemeFragment::empty(category));
        };

        match self.store.load(category, name).await? {
            Some(document) => {
                debug!(name, "Fragment loaded");
                Ok(ThemeFragment::new(category, name, document)?)
            }
            None => Err(ApplicationError::FragmentNotFound {
                category: category.to_string(),
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Load the base fragment and the three presets concurrently.
    ///
    /// Fails on the first error; the returned set is only produced once every
    /// load has settled.
    pub async fn load_all(&self, config: &ThemeConfig) -> ExportResult<FragmentSet> {
        let (base, colors, fonts, radii) = tokio::try_join!(
            self.load(FragmentCategory::Base, Some(self.base_name.as_str())),
            self.load(FragmentCategory::Colors, config.color_preset.as_deref()),
            self.load(FragmentCategory::Fonts, config.font_preset.as_deref()),
            self.load(FragmentCategory::Radii, config.radius_preset.as_deref()),
        )?;

        Ok(FragmentSet {
            base,
            colors,
            fonts,
            radii,
        })
    }
}
