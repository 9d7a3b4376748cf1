//! `logbook tags` command implementation.

use crate::commands::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Print every tag of the home listing, first-seen order.
pub(crate) fn execute(common: &CommonArgs) -> Result<(), CliError> {
    let ctx = common.load()?;
    Output::new().json(&ctx.site.tags())
}
