//! Page metadata resolution.
//!
//! Every rendered page carries exactly one effective [`PageMeta`], produced by
//! merging two layers:
//!
//! - **Site defaults** (owned by the layout): title, description, and whether
//!   pages are indexable by search engines.
//! - **Route override** (owned by the page, optional): any subset of the same
//!   fields.
//!
//! ## Resolution
//!
//! Each field resolves independently. The override wins when it is explicitly
//! set; otherwise the site default applies. Fields are scalar, so there is no
//! deep-merge ambiguity. A blank or whitespace-only string counts as unset,
//! matching how sparse config files are written in practice.
//!
//! A route may override only `indexable` and still inherit title and
//! description from the defaults. Promo landing pages rely on this: they
//! suppress indexing without restating the site copy.
//!
//! ## Failure
//!
//! Resolution fails with [`MetadataError::MissingTitle`] when neither layer
//! supplies a usable title. A page must never render untitled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetadataError {
    #[error("no usable title in defaults or override")]
    MissingTitle,
}

/// Site-wide default metadata, owned by the layout shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaDefaults {
    pub title: String,
    pub description: String,
    /// Whether pages are discoverable by search engines unless they say
    /// otherwise.
    pub indexable: bool,
}

impl Default for MetaDefaults {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            indexable: true,
        }
    }
}

/// Per-route metadata override. Unset fields fall back to the site defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexable: Option<bool>,
}

/// The effective metadata of one rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub indexable: bool,
}

/// Resolve a text field from prioritized sources.
///
/// Returns the first non-None, non-blank value, trimmed. This is the core
/// merge operation for both title and description.
fn first_set(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Merge a route override onto the site defaults, field by field.
///
/// The description may resolve to empty (a page without a meta description
/// is legal); the title may not.
pub fn resolve(
    defaults: &MetaDefaults,
    overlay: Option<&MetaOverride>,
) -> Result<PageMeta, MetadataError> {
    let title = first_set(&[
        overlay.and_then(|o| o.title.as_deref()),
        Some(defaults.title.as_str()),
    ])
    .ok_or(MetadataError::MissingTitle)?;

    let description = first_set(&[
        overlay.and_then(|o| o.description.as_deref()),
        Some(defaults.description.as_str()),
    ])
    .unwrap_or_default();

    let indexable = overlay
        .and_then(|o| o.indexable)
        .unwrap_or(defaults.indexable);

    Ok(PageMeta {
        title,
        description,
        indexable,
    })
}

/// The robots meta directive for an effective `indexable` flag.
///
/// This is the machine-readable contract the generated documents guarantee:
/// promo pages emit `noindex, nofollow`, everything else `index, follow`.
pub fn robots_directive(indexable: bool) -> &'static str {
    if indexable {
        "index, follow"
    } else {
        "noindex, nofollow"
    }
}
