//! Domain value objects: FragmentCategory, PackageId, SectionName.
//!
//! # Design
//!
//! These are pure value types with equality by value. Each one
//! enforces its invariant at construction so that services downstream never
//! re-check it.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── FragmentCategory ─────────────────────────────────────────────────────────

/// Fixed categories of the fragment store.
///
/// The declaration order is the merge order: later categories win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentCategory {
    Base,
    Colors,
    Fonts,
    Radii,
}

impl FragmentCategory {
    /// All categories in merge precedence order.
    pub const ALL: [Self; 4] = [Self::Base, Self::Colors, Self::Fonts, Self::Radii];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Colors => "colors",
            Self::Fonts => "fonts",
            Self::Radii => "radii",
        }
    }
}

impl fmt::Display for FragmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "colors" | "color" => Ok(Self::Colors),
            "fonts" | "font" => Ok(Self::Fonts),
            "radii" | "radius" => Ok(Self::Radii),
            other => Err(DomainError::InvalidDraft(format!(
                "unknown fragment category: {other}"
            ))),
        }
    }
}

// ── PackageId ────────────────────────────────────────────────────────────────

/// Filesystem-safe package identifier derived from a variant name.
///
/// Invariant: non-empty, only `[a-z0-9-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Identifier used when the variant name has no usable characters.
    pub const FALLBACK: &'static str = "campaign";

    /// Derive an identifier: lowercase, whitespace becomes `-`, anything
    /// outside `[a-z0-9-]` is dropped.
    pub fn derive(variant_name: &str) -> Self {
        let id: String = variant_name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect();

        if id.is_empty() {
            Self(Self::FALLBACK.to_string())
        } else {
            Self(id)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── SectionName ──────────────────────────────────────────────────────────────

/// A layout section name that is safe to turn into a file name.
///
/// Invariant: non-empty, only ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionName(String);

impl SectionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SectionName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::InvalidSectionName {
                name: s.into(),
                reason: "name cannot be empty".into(),
            });
        }
        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::InvalidSectionName {
                name: s.into(),
                reason: format!("character '{bad}' is not allowed"),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
