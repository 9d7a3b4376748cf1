//! `logbook list` command implementation.

use clap::Args;

use crate::commands::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Case-insensitive text to look for in title, excerpt or body.
    #[arg(short = 'q', long)]
    search: Option<String>,

    /// Only posts carrying this tag.
    #[arg(short, long)]
    tag: Option<String>,
}

impl ListArgs {
    /// Print top-level posts, newest first.
    pub(crate) fn execute(self, common: &CommonArgs) -> Result<(), CliError> {
        let ctx = common.load()?;
        let posts = ctx
            .site
            .listing(self.search.as_deref(), self.tag.as_deref());
        Output::new().json(&posts)
    }
}
