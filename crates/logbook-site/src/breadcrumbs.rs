//! Breadcrumb trail for a resolved node.

use serde::Serialize;

use crate::resolver::{Ancestor, ResolvedNode};
use crate::routes::{DEFAULT_POST_PREFIX, route_for_slug};

/// One entry of the trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Link target; `None` for the current page.
    pub path: Option<String>,
}

/// Root entry and route prefix used when assembling breadcrumbs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    /// Prefix of post routes (e.g. `/post/`).
    pub post_prefix: String,
    /// Label of the root entry.
    pub home_label: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            post_prefix: DEFAULT_POST_PREFIX.to_owned(),
            home_label: "Home".to_owned(),
        }
    }
}

/// Build the trail: root, one entry per ancestor, then the resolved node.
#[must_use]
pub fn assemble_breadcrumbs(
    ancestors: &[Ancestor],
    resolved: &ResolvedNode,
    routes: &RouteConfig,
) -> Vec<Breadcrumb> {
    let mut crumbs = Vec::with_capacity(ancestors.len() + 2);
    crumbs.push(Breadcrumb {
        label: routes.home_label.clone(),
        path: Some("/".to_owned()),
    });
    crumbs.extend(ancestors.iter().map(|ancestor| Breadcrumb {
        label: ancestor.title.clone(),
        path: Some(route_for_slug(&routes.post_prefix, &ancestor.slug)),
    }));
    crumbs.push(Breadcrumb {
        label: resolved.title.clone(),
        path: None,
    });
    crumbs
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::{Document, MetadataDefaults};
    use crate::resolver::resolve;

    fn titled(rel: &str, title: &str) -> Document {
        let path = rel.split('/').map(str::to_owned).collect();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Document::parse(
            path,
            &format!("---\ntitle: {title}\n---\n"),
            &MetadataDefaults::default(),
            today,
        )
    }

    fn crumb(label: &str, path: Option<&str>) -> Breadcrumb {
        Breadcrumb {
            label: label.to_owned(),
            path: path.map(str::to_owned),
        }
    }

    #[test]
    fn test_full_trail() {
        let docs = vec![
            titled("systems", "Systems"),
            titled("systems/storage", "Storage"),
            titled("systems/storage/lsm trees", "LSM Trees"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let resolved = resolve(&docs, "systems/storage/lsm-trees", today).unwrap();

        let crumbs = assemble_breadcrumbs(&resolved.ancestors, &resolved, &RouteConfig::default());

        assert_eq!(
            crumbs,
            vec![
                crumb("Home", Some("/")),
                crumb("Systems", Some("/post/systems")),
                crumb("Storage", Some("/post/systems/storage")),
                crumb("LSM Trees", None),
            ]
        );
    }

    #[test]
    fn test_top_level_trail() {
        let docs = vec![titled("about", "About")];
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let resolved = resolve(&docs, "about", today).unwrap();

        let crumbs = assemble_breadcrumbs(&resolved.ancestors, &resolved, &RouteConfig::default());

        assert_eq!(crumbs, vec![crumb("Home", Some("/")), crumb("About", None)]);
    }

    #[test]
    fn test_virtual_intermediate_not_in_trail() {
        let docs = vec![titled("a/b", "B")];
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let resolved = resolve(&docs, "a/b", today).unwrap();

        let crumbs = assemble_breadcrumbs(&resolved.ancestors, &resolved, &RouteConfig::default());

        assert_eq!(crumbs, vec![crumb("Home", Some("/")), crumb("B", None)]);
    }

    #[test]
    fn test_custom_routes() {
        let docs = vec![titled("x", "X"), titled("x/y", "Y")];
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let resolved = resolve(&docs, "x/y", today).unwrap();
        let routes = RouteConfig {
            post_prefix: "/notes/".to_owned(),
            home_label: "Index".to_owned(),
        };

        let crumbs = assemble_breadcrumbs(&resolved.ancestors, &resolved, &routes);

        assert_eq!(
            crumbs,
            vec![
                crumb("Index", Some("/")),
                crumb("X", Some("/notes/x")),
                crumb("Y", None),
            ]
        );
    }
}
