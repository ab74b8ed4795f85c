//! `agreements`: list the terms the current user has agreed to.

use std::io::Write;

use anyhow::Result;
use terms_client::TermsApi;

use crate::output::{self, Format};

pub async fn execute(api: &dyn TermsApi, out: &mut dyn Write, format: Format) -> Result<()> {
    let agreements = api.get_users_agreements().await?;
    output::write(out, format, &agreements)
}
