//! Response header policy.
//!
//! # Responsibilities
//! - Hold the fixed header table applied to every origin response
//! - Classify request paths into cache classes
//! - Map cache classes to `Cache-Control` values
//!
//! # Design Decisions
//! - Classification is a pure function of the request path, never the
//!   response content-type
//! - Extension matching is ASCII case-insensitive (`/LOGO.PNG` is a static asset)
//! - Static-asset rule is checked before the `.html` rule; `.html` is not in
//!   the static list, so the two classes never overlap
//! - Headers are inserted, never appended: an origin value for the same name
//!   is replaced, every other origin header is left alone

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

/// Opener isolation; together with COEP enables `SharedArrayBuffer`.
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");

/// Embedder isolation; together with COOP enables `SharedArrayBuffer`.
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");

/// Headers set unconditionally on every origin response.
pub const ALWAYS_ON_HEADERS: [(HeaderName, &str); 5] = [
    (CROSS_ORIGIN_OPENER_POLICY, "same-origin"),
    (CROSS_ORIGIN_EMBEDDER_POLICY, "require-corp"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Extensions (without the dot) served as long-lived immutable assets.
pub const STATIC_ASSET_EXTENSIONS: [&str; 13] = [
    "js", "css", "png", "jpg", "jpeg", "gif", "svg", "woff", "woff2", "ttf", "eot", "ico", "webp",
];

/// Extension served with a short, revalidated cache lifetime.
pub const HTML_EXTENSION: &str = "html";

/// `Cache-Control` for fingerprinted static assets (one year).
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// `Cache-Control` for HTML documents (one hour, then revalidate).
pub const REVALIDATE_CACHE_CONTROL: &str = "public, max-age=3600, must-revalidate";

/// Caching treatment derived from a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    /// Static asset: cache for a year, never revalidate.
    Immutable,
    /// HTML document: cache for an hour, then revalidate.
    Revalidate,
    /// Anything else: leave the origin's `Cache-Control` alone.
    None,
}

impl CacheClass {
    /// The `Cache-Control` value this class sets, if any.
    pub fn cache_control(self) -> Option<&'static str> {
        match self {
            CacheClass::Immutable => Some(IMMUTABLE_CACHE_CONTROL),
            CacheClass::Revalidate => Some(REVALIDATE_CACHE_CONTROL),
            CacheClass::None => None,
        }
    }
}

/// Classify a request path by its final extension.
///
/// Only the text after the last `.` counts, and only if it contains no `/`,
/// so `/assets.js/` and `/v1.2/data` are not assets.
pub fn classify_path(path: &str) -> CacheClass {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return CacheClass::None;
    };
    if ext.contains('/') {
        return CacheClass::None;
    }

    if STATIC_ASSET_EXTENSIONS
        .iter()
        .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    {
        CacheClass::Immutable
    } else if ext.eq_ignore_ascii_case(HTML_EXTENSION) {
        CacheClass::Revalidate
    } else {
        CacheClass::None
    }
}

/// Overwrite the always-on isolation and security headers.
pub fn apply_security_headers(headers: &mut HeaderMap) {
    for (name, value) in ALWAYS_ON_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// Set `Cache-Control` for the given class; `CacheClass::None` is a no-op.
pub fn apply_cache_control(headers: &mut HeaderMap, class: CacheClass) {
    if let Some(value) = class.cache_control() {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_assets_are_immutable() {
        for path in [
            "/app.js",
            "/styles/main.css",
            "/img/logo.png",
            "/a.jpg",
            "/a.jpeg",
            "/a.gif",
            "/icons/x.svg",
            "/fonts/f.woff",
            "/fonts/f.woff2",
            "/fonts/f.ttf",
            "/fonts/f.eot",
            "/favicon.ico",
            "/img/photo.webp",
        ] {
            assert_eq!(classify_path(path), CacheClass::Immutable, "{}", path);
        }
    }

    #[test]
    fn test_html_revalidates() {
        assert_eq!(classify_path("/index.html"), CacheClass::Revalidate);
        assert_eq!(classify_path("/docs/tools/merge.html"), CacheClass::Revalidate);
    }

    #[test]
    fn test_other_paths_have_no_class() {
        assert_eq!(classify_path("/api/data.json"), CacheClass::None);
        assert_eq!(classify_path("/"), CacheClass::None);
        assert_eq!(classify_path("/about"), CacheClass::None);
        assert_eq!(classify_path("/app.js.map"), CacheClass::None);
        assert_eq!(classify_path("/index.htm"), CacheClass::None);
        assert_eq!(classify_path("/worker.mjs"), CacheClass::None);
    }

    #[test]
    fn test_extension_must_be_final_segment() {
        assert_eq!(classify_path("/bundle.js/"), CacheClass::None);
        assert_eq!(classify_path("/v1.2/data"), CacheClass::None);
        assert_eq!(classify_path("/static.css/readme"), CacheClass::None);
    }

    #[test]
    fn test_suffix_must_follow_a_dot() {
        assert_eq!(classify_path("/notjs"), CacheClass::None);
        assert_eq!(classify_path("/xhtml"), CacheClass::None);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify_path("/LOGO.PNG"), CacheClass::Immutable);
        assert_eq!(classify_path("/App.Js"), CacheClass::Immutable);
        assert_eq!(classify_path("/INDEX.HTML"), CacheClass::Revalidate);
    }

    #[test]
    fn test_html_not_in_static_list() {
        assert!(!STATIC_ASSET_EXTENSIONS.contains(&HTML_EXTENSION));
    }

    #[test]
    fn test_cache_control_values() {
        assert_eq!(
            CacheClass::Immutable.cache_control(),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            CacheClass::Revalidate.cache_control(),
            Some("public, max-age=3600, must-revalidate")
        );
        assert_eq!(CacheClass::None.cache_control(), None);
    }

    #[test]
    fn test_security_headers_overwrite_without_duplicating() {
        let mut headers = HeaderMap::new();
        headers.append(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
        headers.append(header::X_FRAME_OPTIONS, HeaderValue::from_static("ALLOW-FROM x"));
        headers.insert(header::ETAG, HeaderValue::from_static("\"abc\""));

        apply_security_headers(&mut headers);

        let xfo: Vec<_> = headers.get_all(header::X_FRAME_OPTIONS).iter().collect();
        assert_eq!(xfo, vec!["DENY"]);
        assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
        assert_eq!(headers["cross-origin-embedder-policy"], "require-corp");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::REFERRER_POLICY], "strict-origin-when-cross-origin");
        assert_eq!(headers[header::ETAG], "\"abc\"");
    }

    #[test]
    fn test_none_class_keeps_origin_cache_control() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

        apply_cache_control(&mut headers, CacheClass::None);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");

        apply_cache_control(&mut headers, CacheClass::Revalidate);
        assert_eq!(headers[header::CACHE_CONTROL], REVALIDATE_CACHE_CONTROL);
    }
}
