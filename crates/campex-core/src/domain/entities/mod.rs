pub mod common;
pub mod draft;
pub mod module;
pub mod theme;

pub use crate::domain::DomainError;
pub use draft::CampaignDraft;
pub use module::ResolvedModule;
pub use theme::{AssembledTheme, ThemeFragment};
