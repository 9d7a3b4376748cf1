//! `logbook render` command implementation.

use clap::Args;

use crate::commands::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Slug or post route of a real document.
    slug: String,

    /// Print HTML and table of contents as JSON.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Render a post's markdown body to HTML.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let output = Output::new();
        let ctx = common.load()?;
        let slug = ctx.requested_slug(&self.slug);

        let Some(rendered) = ctx.site.render(slug)? else {
            return Err(CliError::NotRenderable(slug.to_owned()));
        };

        if self.json {
            output.json(&rendered)
        } else {
            output.data(&rendered.html)
        }
    }
}
