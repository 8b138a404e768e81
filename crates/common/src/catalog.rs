//! Static service catalog.
//!
//! Callers address boost services by code (`TIKTOK_FOLLOWERS`, ...), never by
//! the provider's numeric service IDs; this table is the only translation
//! layer between the two vocabularies.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Service code -> provider service ID. BTreeMap keeps `/services` output in
/// a stable order.
pub static SERVICE_CATALOG: Lazy<BTreeMap<&'static str, u32>> = Lazy::new(|| {
    BTreeMap::from([
        ("TIKTOK_FOLLOWERS", 301),
        ("INSTAGRAM_LIKES", 205),
        ("YOUTUBE_SUBSCRIBERS", 410),
    ])
});

/// Translate a user-facing service code into the provider's numeric ID.
pub fn resolve(service_code: &str) -> Option<u32> {
    SERVICE_CATALOG.get(service_code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_codes() {
        assert_eq!(resolve("TIKTOK_FOLLOWERS"), Some(301));
        assert_eq!(resolve("INSTAGRAM_LIKES"), Some(205));
        assert_eq!(resolve("YOUTUBE_SUBSCRIBERS"), Some(410));
    }

    #[test]
    fn rejects_unknown_and_mismatched_codes() {
        assert_eq!(resolve("FACEBOOK_LIKES"), None);
        // case-sensitive on purpose; the published codes are uppercase
        assert_eq!(resolve("tiktok_followers"), None);
        // numeric provider IDs are not valid selectors
        assert_eq!(resolve("301"), None);
    }

    #[test]
    fn catalog_lists_every_code_once() {
        assert_eq!(SERVICE_CATALOG.len(), 3);
        assert!(SERVICE_CATALOG.keys().all(|c| !c.is_empty()));
    }
}
