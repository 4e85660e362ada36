//! Shared test utilities for the microsite test suite.
//!
//! Block-level extractors for composed documents and ordering assertions on
//! rendered HTML, used by the compose and generate tests.

use crate::compose::PageDocument;
use crate::config::SiteSpec;

/// The stock site definition. Tests clone and mutate it freely.
pub fn stock_spec() -> SiteSpec {
    SiteSpec::default()
}

/// Block kind names of a document, in order.
pub fn block_kinds(doc: &PageDocument) -> Vec<&'static str> {
    doc.blocks.iter().map(|b| b.kind()).collect()
}

/// Number of blocks of one kind in a document.
pub fn count_kind(doc: &PageDocument, kind: &str) -> usize {
    doc.blocks.iter().filter(|b| b.kind() == kind).count()
}

/// Assert each needle occurs in `html`, in the given order.
///
/// Panics with the offending needle on a miss or an order violation.
pub fn assert_in_order(html: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match html[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => {
                if html.contains(needle) {
                    panic!("'{needle}' present but out of order");
                }
                panic!("'{needle}' not found in rendered HTML");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_in_order_accepts_ordered_needles() {
        assert_in_order("<a>Fleet</a><a>Pricing</a>", &["Fleet", "Pricing"]);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn assert_in_order_rejects_reordered_needles() {
        assert_in_order("<a>Pricing</a><a>Fleet</a>", &["Fleet", "Pricing"]);
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn assert_in_order_rejects_missing_needles() {
        assert_in_order("<a>Fleet</a>", &["Contact"]);
    }
}
