//! URL alias resolution.
//!
//! A view is reachable at its canonical path unless `url_mappings` overrides
//! it. A string entry replaces the URL; a list entry gives one alias per
//! element, in declared order. Anything else is ignored.

use std::collections::BTreeMap;

use crate::config::UrlMapping;

/// Final URL list for the view at `canonical_path` (`/secure/secrets`).
///
/// The lookup key is the canonical path without its leading `/`. The result is
/// never empty.
pub fn resolve_urls(canonical_path: &str, mappings: &BTreeMap<String, UrlMapping>) -> Vec<String> {
    let key = canonical_path.trim_start_matches('/');

    match mappings.get(key) {
        Some(UrlMapping::Single(url)) => vec![normalize(url)],
        Some(UrlMapping::Many(urls)) if !urls.is_empty() => urls.iter().map(|url| normalize(url)).collect(),
        Some(other) => {
            tracing::debug!(view = %key, mapping = ?other, "Unusable url mapping, using default URL");
            vec![normalize(canonical_path)]
        }
        None => vec![normalize(canonical_path)],
    }
}

/// Ensure a single leading `/`. Nothing else is touched.
pub fn normalize(url: &str) -> String {
    if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{}", url)
    }
}
