//! Conversion between slugs and route paths.

/// Default prefix of post routes.
pub const DEFAULT_POST_PREFIX: &str = "/post/";

/// Route for a slug: `{prefix}{slug}`.
#[must_use]
pub fn route_for_slug(prefix: &str, slug: &str) -> String {
    format!("{prefix}{slug}")
}

/// Slug addressed by a route path.
///
/// Returns `None` when `path` does not start with `prefix`. A trailing `/`
/// is dropped. No percent-decoding is done.
///
/// # Examples
///
/// ```
/// use logbook_site::slug_from_route;
///
/// assert_eq!(slug_from_route("/post/", "/post/systems/raft/"), Some("systems/raft"));
/// assert_eq!(slug_from_route("/post/", "/about"), None);
/// ```
#[must_use]
pub fn slug_from_route<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    path.strip_prefix(prefix).map(|rest| rest.trim_end_matches('/'))
}
