//! `show-term`: display a terms document.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use terms_client::{TermId, TermsApi};

use crate::output::{self, Format};

/// Arguments for `show-term`.
///
/// `terms show-term enterprise-plan/1` shows revision 1 of enterprise-plan;
/// without a revision the latest one is shown.
#[derive(Args, Debug)]
pub struct ShowTermArgs {
    /// Term id, `[owner/]name[/revision]`
    pub term_id: String,

    /// Print only the document content
    #[arg(long)]
    pub content: bool,
}

pub async fn execute(
    args: ShowTermArgs,
    api: &dyn TermsApi,
    out: &mut dyn Write,
    format: Format,
) -> Result<()> {
    let term = TermId::parse(&args.term_id).context("invalid term format")?;
    let response = api.get_term(&term.owner, &term.name, term.revision).await?;

    if args.content {
        out.write_all(response.content.as_bytes())?;
        Ok(())
    } else {
        output::write(out, format, &response)
    }
}
