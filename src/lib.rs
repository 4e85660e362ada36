//! # Microsite
//!
//! A minimal static site generator for small-business marketing sites and
//! partner promo landing pages. The whole site is data: `site.toml` declares
//! the brand, the navigation registry, and every route as an ordered list of
//! content blocks; `build` renders each route through one shared shell.
//!
//! # Architecture: Load, Compose, Render
//!
//! ```text
//! site.toml  →  SiteSpec  →  PageDocument (per route)  →  dist/*.html
//!            load+validate   compose                      render
//! ```
//!
//! The stages are deliberately separate:
//!
//! - **Load** happens once and fails fast: a malformed registry (duplicate
//!   routes, dangling navigation targets, empty labels) halts before
//!   anything renders.
//! - **Compose** is pure route → document assembly: metadata resolution and
//!   block ordering, no HTML. Each document is built fresh and never
//!   mutated, so renders are independent and repeatable: there is no cache
//!   and no shared mutable state between requests for different routes.
//! - **Render** wraps documents in the shell. It is a pure function of
//!   (spec, document, year); the copyright year is injected by the caller
//!   rather than read from the clock inside the render path, so tests pin
//!   it and assert exact output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, stock site defaults, startup validation |
//! | [`metadata`] | Effective metadata: route overrides over site defaults, robots directive |
//! | [`content`] | Content block model (hero, features, steps, prose, attribution) |
//! | [`compose`] | Route → `PageDocument` assembly; promo variant with forced noindex |
//! | [`generate`] | Maud layout shell and HTML generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system: malformed markup is a build error, template variables
//! are Rust expressions, and all interpolation is auto-escaped.
//!
//! ## Data-Driven Pages
//!
//! Pages carry no bespoke composition logic. A route is a config entry: id,
//! optional metadata override, ordered blocks. The site this replaced had
//! drifted into per-page copies of the same shell with inconsistent
//! navigation and branding; one registry and one shell make that class of
//! drift unrepresentable.
//!
//! ## Promo Pages Are Never Indexable
//!
//! Partner landing pages exist for single-use referral tracking. The
//! composer forces `indexable = false` after metadata resolution, so no
//! override can reopen them to search engines; the `noindex, nofollow`
//! robots directive at the document boundary follows automatically.

pub mod compose;
pub mod config;
pub mod content;
pub mod generate;
pub mod metadata;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
