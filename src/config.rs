//! Site definition loading and validation.
//!
//! The whole site is data: brand, navigation, default metadata, and each
//! route's ordered content blocks live in a single `site.toml`. Pages carry
//! no bespoke composition logic; adding a landing page is a config edit.
//!
//! ## Loading
//!
//! User config is merged on top of the stock site definition, so a file only
//! needs the keys it wants to change:
//!
//! ```toml
//! # Replace the brand, keep everything else stock
//! [brand]
//! name = "Rent-a-Volt"
//! badge = "RV"
//! ```
//!
//! Tables merge key-by-key; arrays (navigation, routes, promos, blocks)
//! replace the stock value wholesale. Unknown keys are rejected to catch
//! typos early. A missing `site.toml` builds the stock site.
//!
//! ## Validation
//!
//! [`SiteSpec::validate`] runs once at load time and fails fast on malformed
//! registries: duplicate route ids, duplicate or dangling navigation targets,
//! empty labels, an image logo without a mark. A spec that loads can render
//! every registered route; nothing is discovered broken mid-request.

use crate::content::{ContentBlock, PartnerInfo};
use crate::metadata::{MetaDefaults, MetaOverride};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("site title must not be empty")]
    EmptySiteTitle,
    #[error("route id must not be empty")]
    EmptyRouteId,
    #[error("duplicate route id: {0}")]
    DuplicateRoute(String),
    #[error("navigation label for target '{0}' must not be empty")]
    EmptyNavLabel(String),
    #[error("duplicate navigation target: {0}")]
    DuplicateNavTarget(String),
    #[error("navigation target has no registered route: {0}")]
    UnknownNavTarget(String),
    #[error("brand.logo = \"image\" requires a [brand.mark] entry")]
    MissingBrandMark,
    #[error("promo '{0}' must name a partner")]
    EmptyPartnerName(String),
    #[error("route '{0}' declares an attribution block; attribution is derived from [promos.partner]")]
    ReservedAttributionBlock(String),
}

/// The full site definition: defaults, brand, navigation, and every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSpec {
    pub site: SiteSection,
    pub brand: Brand,
    /// Header navigation, rendered in declaration order.
    pub nav: Vec<NavLink>,
    /// Standard pages.
    pub routes: Vec<RouteSpec>,
    /// Partner promo landing pages. Never indexable, whatever their override says.
    pub promos: Vec<PromoSpec>,
}

/// Site-wide values owned by the layout shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Default metadata every route inherits unless it overrides a field.
    pub meta: MetaDefaults,
    /// The single contact address the footer links on every page.
    pub contact_email: String,
}

/// Header branding.
///
/// The original site shipped two competing headers (a text badge and an SVG
/// mark); here that is one `logo` switch over the same layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Brand {
    /// Business name, shown in the header and the footer copyright line.
    pub name: String,
    /// Which brand mark the header renders.
    pub logo: LogoVariant,
    /// Short badge text for the text variant, e.g. "EV".
    pub badge: String,
    /// Image mark reference. The path and intrinsic size are passed through
    /// to the image collaborator untouched; nothing here decodes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<BrandMark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoVariant {
    Text,
    Image,
}

/// Brand image reference: path plus intrinsic dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandMark {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// One header navigation entry. `target` is a route id, validated at load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub target: String,
}

/// A standard page: id, optional metadata override, ordered blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaOverride>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

/// A partner promo landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromoSpec {
    pub id: String,
    /// Partner named in the attribution section the composer appends.
    pub partner: PartnerInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaOverride>,
    /// Replaces the hero CTA target on this promo, e.g. a tracked booking link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_target: Option<String>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl SiteSpec {
    /// All registered route ids, standard routes first, in declaration order.
    pub fn route_ids(&self) -> Vec<&str> {
        self.routes
            .iter()
            .map(|r| r.id.as_str())
            .chain(self.promos.iter().map(|p| p.id.as_str()))
            .collect()
    }

    pub fn route(&self, id: &str) -> Option<&RouteSpec> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn promo(&self, id: &str) -> Option<&PromoSpec> {
        self.promos.iter().find(|p| p.id == id)
    }

    /// Fail fast on a malformed registry. Runs once at load, before any
    /// route renders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.meta.title.trim().is_empty() {
            return Err(ConfigError::EmptySiteTitle);
        }

        let mut ids = HashSet::new();
        for id in self.route_ids() {
            if id.trim().is_empty() {
                return Err(ConfigError::EmptyRouteId);
            }
            if !ids.insert(id.to_string()) {
                return Err(ConfigError::DuplicateRoute(id.to_string()));
            }
        }

        let mut targets = HashSet::new();
        for link in &self.nav {
            if link.label.trim().is_empty() {
                return Err(ConfigError::EmptyNavLabel(link.target.clone()));
            }
            if !targets.insert(link.target.as_str()) {
                return Err(ConfigError::DuplicateNavTarget(link.target.clone()));
            }
            if !ids.contains(link.target.as_str()) {
                return Err(ConfigError::UnknownNavTarget(link.target.clone()));
            }
        }

        if self.brand.logo == LogoVariant::Image && self.brand.mark.is_none() {
            return Err(ConfigError::MissingBrandMark);
        }

        for route in &self.routes {
            reject_attribution_blocks(&route.id, &route.blocks)?;
        }
        for promo in &self.promos {
            if promo.partner.name.trim().is_empty() {
                return Err(ConfigError::EmptyPartnerName(promo.id.clone()));
            }
            reject_attribution_blocks(&promo.id, &promo.blocks)?;
        }

        Ok(())
    }
}

fn reject_attribution_blocks(id: &str, blocks: &[ContentBlock]) -> Result<(), ConfigError> {
    if blocks
        .iter()
        .any(|b| matches!(b, ContentBlock::Attribution { .. }))
    {
        return Err(ConfigError::ReservedAttributionBlock(id.to_string()));
    }
    Ok(())
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            meta: MetaDefaults {
                title: "EV Boise – Tesla Rentals & EV Services".to_string(),
                description:
                    "Locally owned Tesla Model 3 rentals and EV support services in Boise, Idaho."
                        .to_string(),
                indexable: true,
            },
            contact_email: "info@evboise.com".to_string(),
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "EV Boise".to_string(),
            logo: LogoVariant::Text,
            badge: "EV".to_string(),
            mark: Some(BrandMark {
                path: "/EVBoise_Optimized.svg".to_string(),
                width: 180,
                height: 60,
            }),
        }
    }
}

impl Default for SiteSpec {
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            brand: Brand::default(),
            nav: stock_nav(),
            routes: stock_routes(),
            promos: stock_promos(),
        }
    }
}

fn link(label: &str, target: &str) -> NavLink {
    NavLink {
        label: label.to_string(),
        target: target.to_string(),
    }
}

fn stock_nav() -> Vec<NavLink> {
    vec![
        link("Fleet", "fleet"),
        link("Pricing", "pricing"),
        link("Contact", "contact"),
    ]
}

fn feature(icon: Option<&str>, heading: &str, body: &str) -> crate::content::FeatureItem {
    crate::content::FeatureItem {
        icon: icon.map(String::from),
        heading: heading.to_string(),
        body: body.to_string(),
    }
}

fn step(heading: &str, body: &str) -> crate::content::StepItem {
    crate::content::StepItem {
        heading: heading.to_string(),
        body: body.to_string(),
    }
}

fn stock_routes() -> Vec<RouteSpec> {
    use crate::content::{CallToAction, ContentBlock::*};

    vec![
        RouteSpec {
            id: "home".to_string(),
            meta: None,
            blocks: vec![
                Hero {
                    headline: "Keep Driving a Tesla While Yours Is Being Repaired".to_string(),
                    tagline: Some(
                        "EV Boise provides Idaho’s only dedicated Tesla rental service, \
                         delivered directly to your shop or home. Insurance-friendly, local, \
                         and stress-free."
                            .to_string(),
                    ),
                    cta: Some(CallToAction {
                        label: "Get My Tesla Quote".to_string(),
                        target: "/contact".to_string(),
                    }),
                },
                Features {
                    heading: Some("Why EV Boise".to_string()),
                    items: vec![
                        feature(
                            Some("⚡"),
                            "Locally Owned",
                            "Boise-based and independent. You deal with a neighbor, not a \
                             national call center.",
                        ),
                        feature(
                            Some("🧾"),
                            "Insurance-Friendly Rates",
                            "We work directly with major insurance providers to streamline \
                             your rental coverage and billing.",
                        ),
                        feature(
                            Some("🚗"),
                            "Delivered to You",
                            "We bring the car to your home, office, or repair shop, often \
                             the same day.",
                        ),
                    ],
                },
            ],
        },
        RouteSpec {
            id: "fleet".to_string(),
            meta: Some(MetaOverride {
                title: Some("Our Fleet | EV Boise".to_string()),
                description: Some(
                    "Tesla Model 3 and Model Y rentals, maintained and charged in Boise, Idaho."
                        .to_string(),
                ),
                indexable: None,
            }),
            blocks: vec![
                Hero {
                    headline: "Our Fleet".to_string(),
                    tagline: Some(
                        "Every rental is a late-model Tesla with Autopilot, Supercharging \
                         access, and a full charge at pickup."
                            .to_string(),
                    ),
                    cta: None,
                },
                Features {
                    heading: None,
                    items: vec![
                        feature(
                            Some("🚗"),
                            "Tesla Model 3",
                            "Long Range, dual motor. The daily driver: quick, comfortable, \
                             and efficient.",
                        ),
                        feature(
                            Some("🚙"),
                            "Tesla Model Y",
                            "Room for five plus cargo. The pick for families and road trips.",
                        ),
                    ],
                },
            ],
        },
        RouteSpec {
            id: "pricing".to_string(),
            meta: Some(MetaOverride {
                title: Some("Pricing | EV Boise".to_string()),
                description: Some(
                    "Simple daily and weekly Tesla rental rates with no hidden fees.".to_string(),
                ),
                indexable: None,
            }),
            blocks: vec![
                Hero {
                    headline: "Simple, Transparent Pricing".to_string(),
                    tagline: Some("One rate, charging included. No surge, no hidden fees.".to_string()),
                    cta: None,
                },
                Features {
                    heading: None,
                    items: vec![
                        feature(
                            None,
                            "Daily",
                            "Perfect for a weekend test of EV life or a short trip.",
                        ),
                        feature(
                            None,
                            "Weekly",
                            "Our best rate for repair replacements and longer stays.",
                        ),
                        feature(
                            None,
                            "Insurance Replacement",
                            "Direct billing with major providers while your car is in the shop.",
                        ),
                    ],
                },
            ],
        },
        RouteSpec {
            id: "contact".to_string(),
            meta: Some(MetaOverride {
                title: Some("Contact | EV Boise".to_string()),
                description: Some(
                    "Get in touch with EV Boise for rentals, deliveries, and EV questions."
                        .to_string(),
                ),
                indexable: None,
            }),
            blocks: vec![
                Hero {
                    headline: "Get in Touch".to_string(),
                    tagline: None,
                    cta: None,
                },
                Prose {
                    markdown: "Email [info@evboise.com](mailto:info@evboise.com) and we will \
                               get back to you within the hour during business hours.\n\n\
                               Prefer text? Send your dates and pickup location and we will \
                               confirm availability right away."
                        .to_string(),
                },
            ],
        },
    ]
}

fn stock_promos() -> Vec<PromoSpec> {
    use crate::content::{CallToAction, ContentBlock::*};

    vec![PromoSpec {
        id: "promo/cope123".to_string(),
        partner: PartnerInfo {
            name: "Cope Collision".to_string(),
            detail: Some("Cope Collision Meridian".to_string()),
            tagline: Some("Tesla-Approved Collision Center | Meridian, Idaho".to_string()),
        },
        meta: Some(MetaOverride {
            title: Some(
                "Replacement Tesla Rentals for Cope Collision Customers | EV Boise".to_string(),
            ),
            description: Some(
                "Your Tesla’s in the shop — but you don’t have to drive gas. EV Boise \
                 delivers a Model 3 or Model Y directly to Cope Collision or your home."
                    .to_string(),
            ),
            indexable: None,
        }),
        cta_target: None,
        blocks: vec![
            Hero {
                headline: "Your Tesla’s in the shop — but you don’t have to drive gas.".to_string(),
                tagline: Some(
                    "EV Boise provides temporary Tesla rentals for Cope Collision customers. \
                     Stay electric while your car is being repaired. We deliver directly to \
                     the shop or your home."
                        .to_string(),
                ),
                cta: Some(CallToAction {
                    label: "Check Availability".to_string(),
                    target: "/contact".to_string(),
                }),
            },
            Features {
                heading: None,
                items: vec![
                    feature(
                        Some("⚡"),
                        "Insurance-Friendly Rates",
                        "We work directly with major insurance providers to streamline your \
                         rental coverage and billing.",
                    ),
                    feature(
                        Some("🚗"),
                        "Fast Delivery",
                        "We’ll have your replacement Tesla ready at Cope Collision or \
                         delivered to your driveway — often the same day.",
                    ),
                    feature(
                        Some("🧾"),
                        "Simple Agreement",
                        "All paperwork is digital and quick — no logins or lengthy forms. \
                         One signature and you’re set.",
                    ),
                ],
            },
            Steps {
                heading: "How It Works".to_string(),
                items: vec![
                    step(
                        "Scan & Reserve",
                        "Scan the QR code on your Cope Collision card or flyer to visit \
                         this page and request your Tesla.",
                    ),
                    step(
                        "We Deliver Your Tesla",
                        "Delivery to Cope Collision or your preferred address within hours.",
                    ),
                    step(
                        "Return Made Easy",
                        "When your car’s repaired, we’ll pick up the rental — no extra \
                         steps required.",
                    ),
                ],
            },
        ],
    }]
}

// =============================================================================
// Site loading and merging
// =============================================================================

/// The stock site definition as a `toml::Value::Table`.
///
/// Canonical base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteSpec::default()).expect("stock site must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely. This includes
///   arrays: user navigation/routes/promos replace the stock lists wholesale.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `site.toml` as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if it exists but contains invalid TOML.
pub fn load_raw_site(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_site(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteSpec, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let spec: SiteSpec = merged.try_into()?;
    spec.validate()?;
    Ok(spec)
}

/// Load the site definition from `site.toml` at the given path.
///
/// Merges user values on top of the stock site, rejects unknown keys, and
/// validates the result. A missing file yields the stock site.
pub fn load_site(path: &Path) -> Result<SiteSpec, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_site(path)?;
    resolve_site(base, overlay)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_site_toml() -> &'static str {
    r##"# Microsite Configuration
# =======================
# All settings are optional. A missing site.toml builds the stock site.
# Any table you write is merged key-by-key onto the stock value; any array
# you write ([[nav]], [[routes]], [[promos]], block lists) replaces the
# stock array wholesale. Unknown keys will cause an error.

[site]
# The single contact address the footer links on every page.
contact_email = "info@evboise.com"

# Site-wide default metadata. Routes inherit these values field-by-field
# unless they set an override below.
[site.meta]
title = "EV Boise – Tesla Rentals & EV Services"
description = "Locally owned Tesla Model 3 rentals and EV support services in Boise, Idaho."
indexable = true

# ---------------------------------------------------------------------------
# Brand
# ---------------------------------------------------------------------------
[brand]
name = "EV Boise"
badge = "EV"
# "text" renders the badge + name; "image" renders the mark below instead.
logo = "text"

# Image mark reference, passed through to the image pipeline untouched.
[brand.mark]
path = "/EVBoise_Optimized.svg"
width = 180
height = 60

# ---------------------------------------------------------------------------
# Navigation (rendered in declaration order; targets must be route ids)
# ---------------------------------------------------------------------------
[[nav]]
label = "Fleet"
target = "fleet"

[[nav]]
label = "Pricing"
target = "pricing"

[[nav]]
label = "Contact"
target = "contact"

# ---------------------------------------------------------------------------
# Routes
# ---------------------------------------------------------------------------
# The route id "home" renders to the site root (index.html); every other id
# renders to <id>/index.html. Blocks render in declaration order.

[[routes]]
id = "home"

[[routes.blocks]]
kind = "hero"
headline = "Keep Driving a Tesla While Yours Is Being Repaired"
tagline = "EV Boise provides Idaho’s only dedicated Tesla rental service, delivered directly to your shop or home. Insurance-friendly, local, and stress-free."

[routes.blocks.cta]
label = "Get My Tesla Quote"
target = "/contact"

[[routes.blocks]]
kind = "features"
heading = "Why EV Boise"

[[routes.blocks.items]]
icon = "⚡"
heading = "Locally Owned"
body = "Boise-based and independent. You deal with a neighbor, not a national call center."

[[routes.blocks.items]]
icon = "🧾"
heading = "Insurance-Friendly Rates"
body = "We work directly with major insurance providers to streamline your rental coverage and billing."

[[routes.blocks.items]]
icon = "🚗"
heading = "Delivered to You"
body = "We bring the car to your home, office, or repair shop, often the same day."

[[routes]]
id = "fleet"

# Route metadata overrides: unset fields fall back to [site.meta].
[routes.meta]
title = "Our Fleet | EV Boise"
description = "Tesla Model 3 and Model Y rentals, maintained and charged in Boise, Idaho."

[[routes.blocks]]
kind = "hero"
headline = "Our Fleet"
tagline = "Every rental is a late-model Tesla with Autopilot, Supercharging access, and a full charge at pickup."

[[routes.blocks]]
kind = "features"

[[routes.blocks.items]]
icon = "🚗"
heading = "Tesla Model 3"
body = "Long Range, dual motor. The daily driver: quick, comfortable, and efficient."

[[routes.blocks.items]]
icon = "🚙"
heading = "Tesla Model Y"
body = "Room for five plus cargo. The pick for families and road trips."

[[routes]]
id = "pricing"

[routes.meta]
title = "Pricing | EV Boise"
description = "Simple daily and weekly Tesla rental rates with no hidden fees."

[[routes.blocks]]
kind = "hero"
headline = "Simple, Transparent Pricing"
tagline = "One rate, charging included. No surge, no hidden fees."

[[routes.blocks]]
kind = "features"

[[routes.blocks.items]]
heading = "Daily"
body = "Perfect for a weekend test of EV life or a short trip."

[[routes.blocks.items]]
heading = "Weekly"
body = "Our best rate for repair replacements and longer stays."

[[routes.blocks.items]]
heading = "Insurance Replacement"
body = "Direct billing with major providers while your car is in the shop."

[[routes]]
id = "contact"

[routes.meta]
title = "Contact | EV Boise"
description = "Get in touch with EV Boise for rentals, deliveries, and EV questions."

[[routes.blocks]]
kind = "hero"
headline = "Get in Touch"

[[routes.blocks]]
kind = "prose"
markdown = """
Email [info@evboise.com](mailto:info@evboise.com) and we will get back to \
you within the hour during business hours.

Prefer text? Send your dates and pickup location and we will confirm \
availability right away.
"""

# ---------------------------------------------------------------------------
# Partner promo landing pages
# ---------------------------------------------------------------------------
# Promo pages render inside the same shell but are never indexable, and the
# partner below is appended as an attribution section after the declared
# blocks. cta_target (optional) replaces the hero CTA target, e.g. with a
# tracked booking link.

[[promos]]
id = "promo/cope123"

[promos.partner]
name = "Cope Collision"
detail = "Cope Collision Meridian"
tagline = "Tesla-Approved Collision Center | Meridian, Idaho"

[promos.meta]
title = "Replacement Tesla Rentals for Cope Collision Customers | EV Boise"
description = "Your Tesla’s in the shop — but you don’t have to drive gas. EV Boise delivers a Model 3 or Model Y directly to Cope Collision or your home."

[[promos.blocks]]
kind = "hero"
headline = "Your Tesla’s in the shop — but you don’t have to drive gas."
tagline = "EV Boise provides temporary Tesla rentals for Cope Collision customers. Stay electric while your car is being repaired. We deliver directly to the shop or your home."

[promos.blocks.cta]
label = "Check Availability"
target = "/contact"

[[promos.blocks]]
kind = "features"

[[promos.blocks.items]]
icon = "⚡"
heading = "Insurance-Friendly Rates"
body = "We work directly with major insurance providers to streamline your rental coverage and billing."

[[promos.blocks.items]]
icon = "🚗"
heading = "Fast Delivery"
body = "We’ll have your replacement Tesla ready at Cope Collision or delivered to your driveway — often the same day."

[[promos.blocks.items]]
icon = "🧾"
heading = "Simple Agreement"
body = "All paperwork is digital and quick — no logins or lengthy forms. One signature and you’re set."

[[promos.blocks]]
kind = "steps"
heading = "How It Works"

[[promos.blocks.items]]
heading = "Scan & Reserve"
body = "Scan the QR code on your Cope Collision card or flyer to visit this page and request your Tesla."

[[promos.blocks.items]]
heading = "We Deliver Your Tesla"
body = "Delivery to Cope Collision or your preferred address within hours."

[[promos.blocks.items]]
heading = "Return Made Easy"
body = "When your car’s repaired, we’ll pick up the rental — no extra steps required."
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stock_spec_is_valid() {
        let spec = SiteSpec::default();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn stock_spec_registers_all_routes() {
        let spec = SiteSpec::default();
        assert_eq!(
            spec.route_ids(),
            vec!["home", "fleet", "pricing", "contact", "promo/cope123"]
        );
    }

    #[test]
    fn stock_nav_order_is_declaration_order() {
        let spec = SiteSpec::default();
        let labels: Vec<&str> = spec.nav.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Fleet", "Pricing", "Contact"]);
    }

    #[test]
    fn stock_site_toml_parses_and_validates() {
        let spec: SiteSpec = toml::from_str(stock_site_toml()).unwrap();
        spec.validate().unwrap();
        assert_eq!(spec.route_ids(), SiteSpec::default().route_ids());
        assert_eq!(spec.nav, SiteSpec::default().nav);
        assert_eq!(spec.site, SiteSpec::default().site);
        assert_eq!(spec.brand, SiteSpec::default().brand);
    }

    #[test]
    fn stock_promo_does_not_preset_indexable() {
        // The composer owns the noindex guarantee; the stock override leaves
        // the flag unset so that path is actually exercised.
        let spec = SiteSpec::default();
        let promo = spec.promo("promo/cope123").unwrap();
        assert_eq!(promo.meta.as_ref().unwrap().indexable, None);
    }

    #[test]
    fn parse_partial_spec_keeps_stock_sections() {
        let toml = r##"
[brand]
name = "Rent-a-Volt"
badge = "RV"
"##;
        let spec: SiteSpec = toml::from_str(toml).unwrap();
        assert_eq!(spec.brand.name, "Rent-a-Volt");
        // Untouched sections come from the stock site
        assert_eq!(spec.site.contact_email, "info@evboise.com");
        assert_eq!(spec.routes.len(), 4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<SiteSpec, _> = toml::from_str("[site]\ncontact_emial = \"x@y.z\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // validate() tests
    // =========================================================================

    fn valid_spec() -> SiteSpec {
        SiteSpec::default()
    }

    #[test]
    fn duplicate_nav_target_is_rejected() {
        let mut spec = valid_spec();
        spec.nav.push(link("Fleet Again", "fleet"));
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::DuplicateNavTarget(t)) if t == "fleet"
        ));
    }

    #[test]
    fn empty_nav_label_is_rejected() {
        let mut spec = valid_spec();
        spec.nav[0].label = "   ".to_string();
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::EmptyNavLabel(t)) if t == "fleet"
        ));
    }

    #[test]
    fn dangling_nav_target_is_rejected() {
        let mut spec = valid_spec();
        spec.nav.push(link("Repair Rentals", "repair"));
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::UnknownNavTarget(t)) if t == "repair"
        ));
    }

    #[test]
    fn duplicate_route_id_is_rejected() {
        let mut spec = valid_spec();
        spec.routes.push(RouteSpec {
            id: "fleet".to_string(),
            meta: None,
            blocks: vec![],
        });
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::DuplicateRoute(id)) if id == "fleet"
        ));
    }

    #[test]
    fn promo_id_colliding_with_route_is_rejected() {
        let mut spec = valid_spec();
        spec.promos[0].id = "fleet".to_string();
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::DuplicateRoute(id)) if id == "fleet"
        ));
    }

    #[test]
    fn empty_route_id_is_rejected() {
        let mut spec = valid_spec();
        spec.routes[0].id = "".to_string();
        assert!(matches!(spec.validate(), Err(ConfigError::EmptyRouteId)));
    }

    #[test]
    fn empty_site_title_is_rejected() {
        let mut spec = valid_spec();
        spec.site.meta.title = " ".to_string();
        assert!(matches!(spec.validate(), Err(ConfigError::EmptySiteTitle)));
    }

    #[test]
    fn image_logo_without_mark_is_rejected() {
        let mut spec = valid_spec();
        spec.brand.logo = LogoVariant::Image;
        spec.brand.mark = None;
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::MissingBrandMark)
        ));
    }

    #[test]
    fn declared_attribution_block_is_rejected() {
        let mut spec = valid_spec();
        spec.promos[0].blocks.push(ContentBlock::Attribution {
            partner: PartnerInfo {
                name: "Sneaky".to_string(),
                detail: None,
                tagline: None,
            },
        });
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::ReservedAttributionBlock(id)) if id == "promo/cope123"
        ));
    }

    #[test]
    fn promo_without_partner_name_is_rejected() {
        let mut spec = valid_spec();
        spec.promos[0].partner.name = "".to_string();
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::EmptyPartnerName(id)) if id == "promo/cope123"
        ));
    }

    // =========================================================================
    // merge + load tests
    // =========================================================================

    #[test]
    fn merge_toml_overlays_tables_key_by_key() {
        let base: toml::Value = toml::from_str("[site]\ncontact_email = \"a@b.c\"").unwrap();
        let overlay: toml::Value = toml::from_str("[site.meta]\ntitle = \"T\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(
            merged["site"]["contact_email"].as_str(),
            Some("a@b.c")
        );
        assert_eq!(merged["site"]["meta"]["title"].as_str(), Some("T"));
    }

    #[test]
    fn merge_toml_replaces_arrays_wholesale() {
        let base: toml::Value = toml::from_str("items = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("items = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn load_site_returns_stock_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let spec = load_site(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(spec, SiteSpec::default());
    }

    #[test]
    fn load_site_merges_overlay_onto_stock() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        std::fs::write(
            &path,
            r##"
[site.meta]
title = "Rent-a-Volt – EV Rentals"
"##,
        )
        .unwrap();

        let spec = load_site(&path).unwrap();
        assert_eq!(spec.site.meta.title, "Rent-a-Volt – EV Rentals");
        // Everything else stays stock
        assert_eq!(spec.site.meta.description, SiteSpec::default().site.meta.description);
        assert_eq!(spec.route_ids(), SiteSpec::default().route_ids());
    }

    #[test]
    fn load_site_rejects_invalid_overlay() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        // Replacing nav wholesale with a dangling target must fail validation
        std::fs::write(
            &path,
            r##"
[[nav]]
label = "Repair Rentals"
target = "repair"
"##,
        )
        .unwrap();

        assert!(matches!(
            load_site(&path),
            Err(ConfigError::UnknownNavTarget(t)) if t == "repair"
        ));
    }

    #[test]
    fn load_site_surfaces_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        std::fs::write(&path, "not valid toml [[").unwrap();
        assert!(matches!(load_site(&path), Err(ConfigError::Toml(_))));
    }
}
