//! `push-term`: create a new revision of a terms document.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use terms_client::{TermId, TermsApi};
use tracing::info;

use crate::output::{self, Format};

/// Arguments for `push-term`.
///
/// `terms push-term text.txt user/enterprise-plan` creates a new revision
/// of `user/enterprise-plan` from the contents of `text.txt` and prints its
/// id.
#[derive(Args, Debug)]
pub struct PushTermArgs {
    /// File holding the terms and conditions text
    pub filename: PathBuf,

    /// Term id, `[owner/]name`
    pub term_id: String,
}

pub async fn execute(
    args: PushTermArgs,
    api: &dyn TermsApi,
    out: &mut dyn Write,
    format: Format,
) -> Result<()> {
    let term = TermId::parse(&args.term_id).context("invalid term id argument")?;
    if term.has_revision() {
        bail!("can't specify a revision with a new term");
    }
    if !term.tenant.is_empty() {
        bail!("can't specify a tenant with a new term");
    }
    let content = std::fs::read_to_string(&args.filename)
        .with_context(|| format!("could not read contents of {:?}", args.filename))?;

    info!(term = %term, bytes = content.len(), "pushing term");
    let id = api.save_term(&term.owner, &term.name, &content).await?;
    output::write(out, format, &id)
}
