//! `list-terms`: list terms owned by the user or the user's groups.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::Result;
use clap::Args;
use terms_client::{IdentityApi, TermsApi, config};
use tracing::debug;

use crate::output::{self, Format};

/// Arguments for `list-terms`.
///
/// Terms owned by the current user or any public group the user belongs to
/// are listed. `--groups test-group1,test-group2` adds groups the user
/// belongs to that are not public.
#[derive(Args, Debug)]
pub struct ListTermsArgs {
    /// Comma separated list of additional groups
    #[arg(long, default_value = "")]
    pub groups: String,

    /// Identity manager location
    #[arg(long, env = config::IDENTITY_URL_ENV, default_value = config::DEFAULT_IDENTITY_URL)]
    pub identity_url: String,
}

pub async fn execute(
    args: ListTermsArgs,
    api: &dyn TermsApi,
    identity: &dyn IdentityApi,
    out: &mut dyn Write,
    format: Format,
) -> Result<()> {
    let username = identity.whoami().await?;
    let mut groups: BTreeSet<String> = identity.groups(&username).await?.into_iter().collect();
    groups.extend(
        args.groups
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string),
    );
    debug!(user = %username, groups = groups.len(), "listing terms");

    let mut ids = Vec::new();
    for group in &groups {
        for term in api.get_terms_by_owner(group).await? {
            ids.push(term.id);
        }
    }
    output::write(out, format, &ids)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use terms_client::Term;

    use super::*;
    use crate::testing::{MockApi, MockIdentity, run_err};

    fn setup(username: &str) -> (MockApi, MockIdentity) {
        let api = MockApi::with_terms(vec![Term {
            id: "test-user/test-term/1".to_string(),
            owner: "test-user".to_string(),
            name: "test-term".to_string(),
            revision: 1,
            ..Default::default()
        }]);
        let identity = MockIdentity {
            username: username.to_string(),
            groups: HashMap::from([("test-user".to_string(), vec!["test-user".to_string()])]),
        };
        (api, identity)
    }

    async fn list(api: &MockApi, identity: &MockIdentity, groups: &str) -> Result<String> {
        let mut out = Vec::new();
        let args = ListTermsArgs {
            groups: groups.to_string(),
            identity_url: config::DEFAULT_IDENTITY_URL.to_string(),
        };
        execute(args, api, identity, &mut out, Format::Yaml).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_list_terms() {
        let (api, identity) = setup("test-user");
        let out = list(&api, &identity, "").await.unwrap();
        assert_eq!(out, "- test-user/test-term/1\n");
        assert_eq!(api.calls(), vec![r#"get_terms_by_owner "test-user""#]);
    }

    #[tokio::test]
    async fn test_list_terms_unknown_user() {
        let (api, identity) = setup("test-unknown-user");
        let result = list(&api, &identity, "").await;
        assert_eq!(run_err(result), "user not found");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_terms_private_groups() {
        let (api, identity) = setup("test-user");
        let out = list(&api, &identity, "private-group2, private-group1,test-user,")
            .await
            .unwrap();
        assert_eq!(
            out,
            "- test-user/test-term/1\n- test-user/test-term/1\n- test-user/test-term/1\n"
        );
        assert_eq!(
            api.calls(),
            vec![
                r#"get_terms_by_owner "private-group1""#,
                r#"get_terms_by_owner "private-group2""#,
                r#"get_terms_by_owner "test-user""#,
            ]
        );
    }
}
