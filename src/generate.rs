//! The layout shell and HTML generation.
//!
//! Every page renders through the same shell: header (brand mark plus
//! navigation in registry order), the document's content blocks in their
//! declared order, and footer (contact link, copyright line). The shell is a
//! pure function of its inputs; nothing here holds state between renders, and
//! the copyright year is an injected parameter rather than a clock read, so
//! output is deterministic under test.
//!
//! ## Generated output
//!
//! ```text
//! dist/
//! ├── index.html              # "home" route
//! ├── fleet/index.html
//! ├── pricing/index.html
//! ├── contact/index.html
//! ├── promo/cope123/index.html   # noindex promo landing page
//! └── 404.html                # what static hosts serve for unknown paths
//! ```
//!
//! ## HTML generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. The
//! stylesheet is embedded at compile time; there is nothing to ship beside
//! the HTML files.

use crate::compose::{self, ComposeError, PageDocument};
use crate::config::{Brand, LogoVariant, NavLink, SiteSpec};
use crate::content::ContentBlock;
use crate::metadata::{PageMeta, robots_directive};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
}

const CSS: &str = include_str!("../static/style.css");

/// One page written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub route: String,
    /// Output file, relative to the output directory.
    pub file: String,
    pub indexable: bool,
}

/// Href for a registered route id. `home` is the site root.
pub fn route_href(route_id: &str) -> String {
    if route_id == "home" {
        "/".to_string()
    } else {
        format!("/{route_id}/")
    }
}

/// Output file for a route id, relative to the output directory.
pub fn output_path(route_id: &str) -> String {
    if route_id == "home" {
        "index.html".to_string()
    } else {
        format!("{route_id}/index.html")
    }
}

/// Render every registered route (and the not-found page) into `output_dir`.
pub fn generate(
    spec: &SiteSpec,
    output_dir: &Path,
    year: i32,
) -> Result<Vec<RenderedPage>, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut rendered = Vec::new();
    for id in spec.route_ids() {
        let doc = compose::compose_route(spec, id)?;
        let file = output_path(id);
        let path = output_dir.join(&file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, render_page(spec, &doc, year).into_string())?;
        rendered.push(RenderedPage {
            route: id.to_string(),
            file,
            indexable: doc.meta.indexable,
        });
    }

    // Static hosts serve this for paths outside the registry.
    fs::write(
        output_dir.join("404.html"),
        render_not_found(spec, year).into_string(),
    )?;

    Ok(rendered)
}

// ============================================================================
// Shell components
// ============================================================================

/// Renders the base HTML document structure around page content.
///
/// The robots meta line is the machine-readable indexing contract: promo
/// pages come through here with `indexable = false` and get `noindex`.
fn base_document(meta: &PageMeta, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !meta.description.is_empty() {
                    meta name="description" content=(meta.description);
                }
                meta name="robots" content=(robots_directive(meta.indexable));
                title { (meta.title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header: brand mark and navigation in registry order.
fn site_header(brand: &Brand, nav: &[NavLink], current_route: &str) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" {
                @match brand.logo {
                    LogoVariant::Text => {
                        span.brand-badge { (brand.badge) }
                        span.brand-name { (brand.name) }
                    },
                    LogoVariant::Image => {
                        @if let Some(mark) = &brand.mark {
                            img src=(mark.path) alt=(brand.name) width=(mark.width) height=(mark.height);
                        }
                    },
                }
            }
            nav.site-nav {
                @for link in nav {
                    @let current = link.target == current_route;
                    a class=[current.then_some("current")] href=(route_href(&link.target)) {
                        (link.label)
                    }
                }
            }
        }
    }
}

/// Renders the footer: copyright line with the injected year and the one
/// consistent contact address as a direct link.
fn site_footer(spec: &SiteSpec, year: i32) -> Markup {
    html! {
        footer.site-footer {
            p { "© " (year) " " (spec.brand.name) " — All rights reserved." }
            p {
                a href={ "mailto:" (spec.site.contact_email) } { (spec.site.contact_email) }
            }
        }
    }
}

/// Renders one content block.
fn render_block(block: &ContentBlock) -> Markup {
    match block {
        ContentBlock::Hero {
            headline,
            tagline,
            cta,
        } => html! {
            section.hero {
                h1 { (headline) }
                @if let Some(tagline) = tagline {
                    p.tagline { (tagline) }
                }
                @if let Some(cta) = cta {
                    a.cta href=(cta.target) { (cta.label) }
                }
            }
        },
        ContentBlock::Features { heading, items } => html! {
            section.features {
                @if let Some(heading) = heading {
                    h2 { (heading) }
                }
                div.feature-grid {
                    @for item in items {
                        div.feature-card {
                            @if let Some(icon) = &item.icon {
                                div.feature-icon { (icon) }
                            }
                            h3 { (item.heading) }
                            p { (item.body) }
                        }
                    }
                }
            }
        },
        ContentBlock::Steps { heading, items } => html! {
            section.steps {
                h2 { (heading) }
                div.step-grid {
                    @for (idx, item) in items.iter().enumerate() {
                        div.step {
                            div.step-number { (idx + 1) }
                            p.step-heading { (item.heading) }
                            p.step-body { (item.body) }
                        }
                    }
                }
            }
        },
        ContentBlock::Prose { markdown } => {
            let parser = Parser::new(markdown);
            let mut body_html = String::new();
            md_html::push_html(&mut body_html, parser);
            html! {
                section.prose {
                    (PreEscaped(body_html))
                }
            }
        }
        ContentBlock::Attribution { partner } => html! {
            section.attribution {
                p.attribution-lead { "In partnership with" }
                h3 { (partner.detail.as_deref().unwrap_or(&partner.name)) }
                @if let Some(tagline) = &partner.tagline {
                    p.attribution-tagline { (tagline) }
                }
            }
        },
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Wraps a composed document in the shell: header, blocks in declared order,
/// footer.
pub fn render_page(spec: &SiteSpec, doc: &PageDocument, year: i32) -> Markup {
    let content = html! {
        (site_header(&spec.brand, &spec.nav, &doc.route))
        main {
            @for block in &doc.blocks {
                (render_block(block))
            }
        }
        (site_footer(spec, year))
    };
    base_document(&doc.meta, content)
}

/// The recovered not-found document, rendered inside the same shell.
/// Never indexable.
pub fn render_not_found(spec: &SiteSpec, year: i32) -> Markup {
    let meta = PageMeta {
        title: format!("Page Not Found | {}", spec.brand.name),
        description: String::new(),
        indexable: false,
    };
    let content = html! {
        (site_header(&spec.brand, &spec.nav, ""))
        main {
            section.hero {
                h1 { "Page not found" }
                p.tagline { "That link has expired or never existed." }
                a.cta href="/" { "Back to the homepage" }
            }
        }
        (site_footer(spec, year))
    };
    base_document(&meta, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogoVariant;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn render_route(spec: &SiteSpec, id: &str, year: i32) -> String {
        let doc = compose::compose_route(spec, id).unwrap();
        render_page(spec, &doc, year).into_string()
    }

    // =========================================================================
    // Shell
    // =========================================================================

    #[test]
    fn document_structure_is_complete() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>EV Boise – Tesla Rentals &amp; EV Services</title>"));
        assert!(html.contains(r#"name="description""#));
    }

    #[test]
    fn nav_renders_in_registry_order() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert_in_order(&html, &[">Fleet</a>", ">Pricing</a>", ">Contact</a>"]);
    }

    #[test]
    fn nav_with_zero_links_renders_empty() {
        let mut spec = stock_spec();
        spec.nav.clear();
        let html = render_route(&spec, "home", 2026);
        assert!(html.contains(r#"<nav class="site-nav"></nav>"#));
    }

    #[test]
    fn nav_marks_current_route() {
        let spec = stock_spec();
        let html = render_route(&spec, "fleet", 2026);
        assert!(html.contains(r#"class="current" href="/fleet/""#));
    }

    #[test]
    fn nav_targets_link_route_paths() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert!(html.contains(r#"href="/pricing/""#));
        assert!(html.contains(r#"href="/contact/""#));
    }

    #[test]
    fn footer_has_injected_year_and_contact() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2031);
        assert!(html.contains("© 2031 EV Boise"));
        assert!(html.contains(r#"href="mailto:info@evboise.com""#));
    }

    #[test]
    fn every_route_gets_the_same_footer_contact() {
        let spec = stock_spec();
        for id in spec.route_ids() {
            let html = render_route(&spec, id, 2026);
            assert!(
                html.contains(r#"href="mailto:info@evboise.com""#),
                "footer contact missing on {id}"
            );
        }
    }

    #[test]
    fn text_logo_renders_badge_and_name() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert!(html.contains(r#"<span class="brand-badge">EV</span>"#));
        assert!(html.contains(r#"<span class="brand-name">EV Boise</span>"#));
    }

    #[test]
    fn image_logo_passes_mark_through() {
        let mut spec = stock_spec();
        spec.brand.logo = LogoVariant::Image;
        let html = render_route(&spec, "home", 2026);
        assert!(html.contains(r#"src="/EVBoise_Optimized.svg""#));
        assert!(html.contains(r#"width="180""#));
        assert!(html.contains(r#"height="60""#));
        assert!(!html.contains(r#"class="brand-badge""#));
    }

    // =========================================================================
    // Robots directive
    // =========================================================================

    #[test]
    fn standard_routes_are_indexable() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert!(html.contains(r#"name="robots" content="index, follow""#));
    }

    #[test]
    fn promo_pages_emit_noindex() {
        let spec = stock_spec();
        let html = render_route(&spec, "promo/cope123", 2026);
        assert!(html.contains(r#"name="robots" content="noindex, nofollow""#));
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    #[test]
    fn home_renders_exactly_one_hero() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert_eq!(html.matches(r#"<section class="hero">"#).count(), 1);
        assert!(html.contains("Keep Driving a Tesla While Yours Is Being Repaired"));
    }

    #[test]
    fn hero_cta_links_its_target() {
        let spec = stock_spec();
        let html = render_route(&spec, "home", 2026);
        assert!(html.contains(r#"<a class="cta" href="/contact">Get My Tesla Quote</a>"#));
    }

    #[test]
    fn steps_are_numbered_by_position() {
        let spec = stock_spec();
        let html = render_route(&spec, "promo/cope123", 2026);
        assert_in_order(
            &html,
            &[
                r#"<div class="step-number">1</div>"#,
                "Scan &amp; Reserve",
                r#"<div class="step-number">2</div>"#,
                "We Deliver Your Tesla",
                r#"<div class="step-number">3</div>"#,
                "Return Made Easy",
            ],
        );
    }

    #[test]
    fn prose_markdown_is_converted() {
        let spec = stock_spec();
        let html = render_route(&spec, "contact", 2026);
        assert!(html.contains(r#"<a href="mailto:info@evboise.com">info@evboise.com</a>"#));
    }

    #[test]
    fn attribution_names_partner_before_footer() {
        let spec = stock_spec();
        let html = render_route(&spec, "promo/cope123", 2026);
        assert_in_order(
            &html,
            &[
                "In partnership with",
                "Cope Collision Meridian",
                "Tesla-Approved Collision Center | Meridian, Idaho",
                r#"<footer class="site-footer">"#,
            ],
        );
    }

    #[test]
    fn hostile_copy_is_escaped() {
        let mut spec = stock_spec();
        spec.routes[0].blocks[0] = ContentBlock::Hero {
            headline: "<script>alert('xss')</script>".to_string(),
            tagline: None,
            cta: None,
        };
        let html = render_route(&spec, "home", 2026);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Not-found page
    // =========================================================================

    #[test]
    fn not_found_page_is_sealed_and_in_shell() {
        let spec = stock_spec();
        let html = render_not_found(&spec, 2026).into_string();
        assert!(html.contains(r#"name="robots" content="noindex, nofollow""#));
        assert!(html.contains("Page not found"));
        // Same shell as every other page
        assert!(html.contains("site-header"));
        assert!(html.contains("site-footer"));
    }

    // =========================================================================
    // generate()
    // =========================================================================

    #[test]
    fn generate_writes_every_route_and_404() {
        let spec = stock_spec();
        let tmp = TempDir::new().unwrap();
        let pages = generate(&spec, tmp.path(), 2026).unwrap();

        assert_eq!(pages.len(), 5);
        for file in [
            "index.html",
            "fleet/index.html",
            "pricing/index.html",
            "contact/index.html",
            "promo/cope123/index.html",
            "404.html",
        ] {
            assert!(tmp.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn generate_reports_indexability_per_page() {
        let spec = stock_spec();
        let tmp = TempDir::new().unwrap();
        let pages = generate(&spec, tmp.path(), 2026).unwrap();

        let promo = pages.iter().find(|p| p.route == "promo/cope123").unwrap();
        assert!(!promo.indexable);
        assert_eq!(promo.file, "promo/cope123/index.html");

        let home = pages.iter().find(|p| p.route == "home").unwrap();
        assert!(home.indexable);
        assert_eq!(home.file, "index.html");
    }

    #[test]
    fn generated_promo_file_contains_noindex() {
        let spec = stock_spec();
        let tmp = TempDir::new().unwrap();
        generate(&spec, tmp.path(), 2026).unwrap();

        let promo = std::fs::read_to_string(tmp.path().join("promo/cope123/index.html")).unwrap();
        assert!(promo.contains(r#"content="noindex, nofollow""#));

        let home = std::fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(home.contains(r#"content="index, follow""#));
    }
}
