//! Content block model.
//!
//! A page is an ordered list of [`ContentBlock`]s declared in `site.toml`.
//! Blocks are pure data: composing a route clones its declared blocks into a
//! fresh document, so nothing here is shared or mutated between renders.
//!
//! In TOML, blocks are tagged by a `kind` field:
//!
//! ```toml
//! [[routes.blocks]]
//! kind = "hero"
//! headline = "Keep Driving a Tesla While Yours Is Being Repaired"
//!
//! [routes.blocks.cta]
//! label = "Get My Tesla Quote"
//! target = "/contact"
//! ```

use serde::{Deserialize, Serialize};

/// A clickable action rendered as a button-style link.
///
/// Targets are free-form hrefs (`/contact`, `mailto:...`, or an external
/// booking URL) rather than route ids, so promo pages can point off-site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallToAction {
    pub label: String,
    pub target: String,
}

/// Partner identity shown in the attribution section of a promo page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartnerInfo {
    /// Partner business name, e.g. "Cope Collision".
    pub name: String,
    /// Fuller display name, e.g. "Cope Collision Meridian". Falls back to
    /// `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// One-line descriptor, e.g. "Tesla-Approved Collision Center | Meridian, Idaho".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

/// One card in a value-proposition grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureItem {
    /// Short decorative marker (the stock site uses emoji).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub heading: String,
    pub body: String,
}

/// One entry in a step-by-step explainer. Steps are numbered by position
/// at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepItem {
    pub heading: String,
    pub body: String,
}

/// A named, ordered unit of page content.
///
/// `Attribution` is composer-owned: it is derived from a promo's partner
/// entry and may not be declared in `site.toml` (rejected at validation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Top-of-page headline with optional tagline and call to action.
    Hero {
        headline: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tagline: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cta: Option<CallToAction>,
    },
    /// Value-proposition card grid.
    Features {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        heading: Option<String>,
        items: Vec<FeatureItem>,
    },
    /// Numbered step-by-step explainer.
    Steps {
        heading: String,
        items: Vec<StepItem>,
    },
    /// Free-form markdown copy, rendered to HTML at generate time.
    Prose { markdown: String },
    /// Partner branding section appended to promo pages.
    Attribution { partner: PartnerInfo },
}

impl ContentBlock {
    /// Stable lowercase name of the block kind, matching the TOML tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Hero { .. } => "hero",
            ContentBlock::Features { .. } => "features",
            ContentBlock::Steps { .. } => "steps",
            ContentBlock::Prose { .. } => "prose",
            ContentBlock::Attribution { .. } => "attribution",
        }
    }
}
