//! `logbook tree` command implementation.

use crate::commands::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Print the whole-corpus navigation tree as JSON.
pub(crate) fn execute(common: &CommonArgs) -> Result<(), CliError> {
    let ctx = common.load()?;
    let tree = ctx.site.tree();
    if tree.is_empty() {
        Output::new().warning("No documents found");
    }
    Output::new().json(&tree)
}
