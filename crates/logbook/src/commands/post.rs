//! `logbook post` command implementation.

use clap::Args;
use logbook_site::{Breadcrumb, NavRow, NavState, ResolvedKind, ResolvedNode, visible_rows};
use serde::Serialize;

use crate::commands::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the post command.
#[derive(Args, Debug)]
pub(crate) struct PostArgs {
    /// Slug or post route (e.g. `systems/raft` or `/post/systems/raft`).
    slug: String,

    /// Print the visible navigation rows instead of the full tree.
    #[arg(long)]
    nav: bool,
}

impl PostArgs {
    /// Execute the post command.
    ///
    /// A slug that matches nothing still prints its payload; only an empty
    /// or malformed slug is an error.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load()?;
        let slug = ctx.requested_slug(&self.slug);

        let page = ctx.site.post(slug)?;
        if page.resolved.kind == ResolvedKind::NotFound {
            output.warning(&format!("Nothing found at {slug:?}"));
        }

        if self.nav {
            let mut state = NavState::new();
            state.reveal(&page.tree, &page.resolved.slug);
            let rows = visible_rows(&page.tree, &state, Some(&page.resolved.slug));
            return output.json(&NavPayload {
                resolved: &page.resolved,
                breadcrumbs: &page.breadcrumbs,
                nav: &rows,
            });
        }
        output.json(&page)
    }
}

/// Post payload with flattened navigation rows.
#[derive(Serialize)]
struct NavPayload<'a> {
    resolved: &'a ResolvedNode,
    breadcrumbs: &'a [Breadcrumb],
    nav: &'a [NavRow],
}
