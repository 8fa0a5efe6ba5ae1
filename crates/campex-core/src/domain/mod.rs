// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for campex.
//!
//! This module contains pure export logic: the draft model, theme fragments
//! and their merge, and the value objects the pipeline keys on. All I/O
//! (fragment reads, file copies, subprocesses, archives) is handled via ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few external crates**: std + thiserror + serde/serde_json for documents
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    draft::{CampaignDraft, ChromeConfig, LayoutSection, ThemeConfig},
    module::ResolvedModule,
    theme::{AssembledTheme, ThemeFragment, deep_merge},
};

pub use error::{DomainError, ErrorCategory, FieldError};

pub use value_objects::{FragmentCategory, PackageId, SectionName};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================================================
    // Precedence across fragment categories
    // ========================================================================

    fn merged(sources: &[serde_json::Value]) -> serde_json::Value {
        let mut doc = json!({});
        for source in sources {
            deep_merge(&mut doc, source);
        }
        doc
    }

    #[test]
    fn preset_beats_base() {
        let doc = merged(&[
            json!({ "colors": { "primary": "#111" } }),
            json!({ "colors": { "primary": "#222" } }),
        ]);
        assert_eq!(doc["colors"]["primary"], "#222");
    }

    #[test]
    fn override_beats_preset() {
        let doc = merged(&[
            json!({ "colors": { "primary": "#111" } }),
            json!({ "colors": { "primary": "#222" } }),
            json!({}),
            json!({}),
            json!({ "colors": { "primary": "#333" } }),
        ]);
        assert_eq!(doc["colors"]["primary"], "#333");
    }

    #[test]
    fn base_keys_survive_every_later_source() {
        let base = json!({
            "colors": { "primary": "#111", "background": "#fff" },
            "fonts": { "body": "Inter" },
            "geometry": { "radius": "4px" }
        });
        let doc = merged(&[
            base.clone(),
            json!({ "colors": { "primary": "#222" } }),
            json!({ "fonts": null }),
            json!({ "geometry": { "radius": null, "gap": "1rem" } }),
            json!({ "colors": { "accent": "#f06" } }),
        ]);
        for pointer in [
            "/colors/primary",
            "/colors/background",
            "/fonts/body",
            "/geometry/radius",
        ] {
            assert!(doc.pointer(pointer).is_some(), "lost {pointer}");
        }
    }

    #[test]
    fn validator_reports_bad_section() {
        let draft: CampaignDraft = serde_json::from_value(json!({
            "variantName": "x",
            "layoutConfig": [ { "name": "Hero" }, { "name": "bad name" } ]
        }))
        .unwrap();
        assert!(DomainValidator::validate_draft(&draft).is_err());
        assert!(DomainValidator::validate_sections(&draft).is_err());
    }
}
