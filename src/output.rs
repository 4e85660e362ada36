//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Build
//!
//! ```text
//! home → index.html
//! fleet → fleet/index.html
//! promo/cope123 → promo/cope123/index.html (noindex)
//!
//! Generated 5 pages (1 noindex)
//! ```
//!
//! ## Routes
//!
//! ```text
//! home → index.html
//!     Title: EV Boise – Tesla Rentals & EV Services
//! promo/cope123 → promo/cope123/index.html (noindex)
//!     Title: Replacement Tesla Rentals for Cope Collision Customers | EV Boise
//! ```

use crate::compose::{self, ComposeError};
use crate::config::SiteSpec;
use crate::generate::{self, RenderedPage};
use serde::Serialize;

/// One row of the route table: effective metadata plus output location.
#[derive(Debug, Serialize)]
pub struct RouteEntry {
    pub route: String,
    pub title: String,
    /// "page" or "promo".
    pub kind: &'static str,
    pub file: String,
    pub indexable: bool,
}

/// Compose every registered route into a table row.
pub fn route_listing(spec: &SiteSpec) -> Result<Vec<RouteEntry>, ComposeError> {
    spec.route_ids()
        .into_iter()
        .map(|id| {
            let doc = compose::compose_route(spec, id)?;
            let kind = if spec.promo(id).is_some() {
                "promo"
            } else {
                "page"
            };
            Ok(RouteEntry {
                route: id.to_string(),
                title: doc.meta.title,
                kind,
                file: generate::output_path(id),
                indexable: doc.meta.indexable,
            })
        })
        .collect()
}

fn page_line(route: &str, file: &str, indexable: bool) -> String {
    if indexable {
        format!("{route} → {file}")
    } else {
        format!("{route} → {file} (noindex)")
    }
}

pub fn format_build_output(pages: &[RenderedPage]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|p| page_line(&p.route, &p.file, p.indexable))
        .collect();

    let sealed = pages.iter().filter(|p| !p.indexable).count();
    lines.push(String::new());
    lines.push(format!("Generated {} pages ({} noindex)", pages.len(), sealed));
    lines
}

pub fn print_build_output(pages: &[RenderedPage]) {
    for line in format_build_output(pages) {
        println!("{}", line);
    }
}

pub fn format_routes_output(entries: &[RouteEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(page_line(&entry.route, &entry.file, entry.indexable));
        lines.push(format!("    Title: {}", entry.title));
    }
    lines
}

pub fn print_routes_output(entries: &[RouteEntry]) {
    for line in format_routes_output(entries) {
        println!("{}", line);
    }
}

pub fn format_check_output(spec: &SiteSpec) -> Vec<String> {
    let mut lines = vec!["Navigation".to_string()];
    for link in &spec.nav {
        lines.push(format!("    {} → {}", link.label, link.target));
    }
    lines.push(String::new());
    lines.push("Routes".to_string());
    for route in &spec.routes {
        lines.push(format!("    {} ({} blocks)", route.id, route.blocks.len()));
    }
    for promo in &spec.promos {
        lines.push(format!(
            "    {} (promo, partner: {})",
            promo.id, promo.partner.name
        ));
    }
    lines
}

pub fn print_check_output(spec: &SiteSpec) {
    for line in format_check_output(spec) {
        println!("{}", line);
    }
}
