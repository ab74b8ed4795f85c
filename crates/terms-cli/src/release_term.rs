//! `release-term`: publish an owned terms revision.

use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::Args;
use terms_client::{TermId, TermsApi};
use tracing::info;

use crate::output::{self, Format};

/// Arguments for `release-term`, e.g. `terms release-term me/my-terms/2`.
#[derive(Args, Debug)]
pub struct ReleaseTermArgs {
    /// Term id, `owner/name/revision`
    pub term_id: String,
}

pub async fn execute(
    args: ReleaseTermArgs,
    api: &dyn TermsApi,
    out: &mut dyn Write,
    format: Format,
) -> Result<()> {
    let term = TermId::parse(&args.term_id).context("invalid term format")?;
    if !term.is_owned() {
        return output::write(out, format, "only terms with owners require releasing");
    }
    if !term.has_revision() {
        bail!("must specify a term revision");
    }

    info!(term = %term, "releasing term");
    let id = api.publish(&term.owner, &term.name, term.revision).await?;
    output::write(out, format, &id)
}
