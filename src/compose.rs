//! Route composition: site definition → renderable page documents.
//!
//! Composing a route looks up its static configuration, resolves effective
//! metadata against the site defaults, and assembles the declared content
//! blocks into a [`PageDocument`]. Documents are built fresh per call, never
//! mutated afterwards, and carry no shared state, so composing the same route
//! twice with the same spec yields structurally identical results.
//!
//! ## Promo pages
//!
//! [`compose_promo`] differs from [`compose`] in three ways:
//!
//! - the effective `indexable` flag is forced to `false` after resolution.
//!   Promo pages exist for single-use referral tracking and must never be
//!   discoverable through search, so this is a hard override: even an
//!   explicit `indexable = true` in the promo's metadata is overridden.
//! - the partner attribution block is appended after the declared blocks,
//!   so it renders last before the shell-owned footer.
//! - when the promo declares a `cta_target`, the hero call-to-action points
//!   there instead of the default flow's target.
//!
//! Unknown route ids are an error value for the boundary to turn into
//! not-found output; they never panic.

use crate::config::SiteSpec;
use crate::content::ContentBlock;
use crate::metadata::{self, PageMeta};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("no usable title for route: {0}")]
    MissingTitle(String),
}

/// The fully resolved representation of one route, ready for the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    pub route: String,
    pub meta: PageMeta,
    pub blocks: Vec<ContentBlock>,
}

/// Compose a standard route into a document.
pub fn compose(spec: &SiteSpec, route_id: &str) -> Result<PageDocument, ComposeError> {
    let route = spec
        .route(route_id)
        .ok_or_else(|| ComposeError::UnknownRoute(route_id.to_string()))?;

    let meta = metadata::resolve(&spec.site.meta, route.meta.as_ref())
        .map_err(|_| ComposeError::MissingTitle(route_id.to_string()))?;

    Ok(PageDocument {
        route: route.id.clone(),
        meta,
        blocks: route.blocks.clone(),
    })
}

/// Compose a partner promo landing page.
pub fn compose_promo(spec: &SiteSpec, promo_id: &str) -> Result<PageDocument, ComposeError> {
    let promo = spec
        .promo(promo_id)
        .ok_or_else(|| ComposeError::UnknownRoute(promo_id.to_string()))?;

    let mut meta = metadata::resolve(&spec.site.meta, promo.meta.as_ref())
        .map_err(|_| ComposeError::MissingTitle(promo_id.to_string()))?;
    // Hard override, not a default: referral pages stay out of search results.
    meta.indexable = false;

    let mut blocks = promo.blocks.clone();
    if let Some(target) = &promo.cta_target {
        for block in &mut blocks {
            if let ContentBlock::Hero { cta: Some(cta), .. } = block {
                cta.target = target.clone();
            }
        }
    }
    blocks.push(ContentBlock::Attribution {
        partner: promo.partner.clone(),
    });

    Ok(PageDocument {
        route: promo.id.clone(),
        meta,
        blocks,
    })
}

/// The single route → document mapping.
///
/// Every registered id resolves through exactly one path: standard routes
/// via [`compose`], promos via [`compose_promo`].
pub fn compose_route(spec: &SiteSpec, route_id: &str) -> Result<PageDocument, ComposeError> {
    if spec.route(route_id).is_some() {
        compose(spec, route_id)
    } else if spec.promo(route_id).is_some() {
        compose_promo(spec, route_id)
    } else {
        Err(ComposeError::UnknownRoute(route_id.to_string()))
    }
}
