//! Test doubles for command tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use terms_client::{
    Agreement, ApiError, CheckAgreementsRequest, GetTermsResponse, IdentityApi,
    SaveAgreementResponses, SaveAgreements, Term, TermsApi,
};

/// Returns the full error chain of a failed command.
pub fn run_err<T: std::fmt::Debug>(result: Result<T>) -> String {
    format!("{:#}", result.unwrap_err())
}

/// Terms API double. Records each call and answers from canned data.
#[derive(Debug, Default)]
pub struct MockApi {
    pub terms: Vec<Term>,
    pub agreements: Vec<Agreement>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn with_terms(terms: Vec<Term>) -> Self {
        Self {
            terms,
            ..Default::default()
        }
    }

    pub fn with_agreements(agreements: Vec<Agreement>) -> Self {
        Self {
            agreements,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TermsApi for MockApi {
    async fn save_term(&self, owner: &str, name: &str, content: &str) -> Result<String, ApiError> {
        self.record(format!("save_term {owner:?} {name:?} {content:?}"));
        if owner.is_empty() {
            Ok(format!("{name}/1"))
        } else {
            Ok(format!("{owner}/{name}/1"))
        }
    }

    async fn get_term(&self, owner: &str, name: &str, revision: i64) -> Result<Term, ApiError> {
        self.record(format!("get_term {owner:?} {name:?} {revision}"));
        self.terms.first().cloned().ok_or(ApiError::TermNotFound)
    }

    async fn publish(&self, owner: &str, name: &str, revision: i64) -> Result<String, ApiError> {
        self.record(format!("publish {owner:?} {name:?} {revision}"));
        Ok("owner/name/1".to_string())
    }

    async fn get_terms_by_owner(&self, owner: &str) -> Result<Vec<Term>, ApiError> {
        self.record(format!("get_terms_by_owner {owner:?}"));
        Ok(self.terms.clone())
    }

    async fn get_unsigned_terms(
        &self,
        request: &CheckAgreementsRequest,
    ) -> Result<Vec<GetTermsResponse>, ApiError> {
        self.record(format!("get_unsigned_terms {:?}", request.terms));
        Ok(Vec::new())
    }

    async fn save_agreement(
        &self,
        agreements: &SaveAgreements,
    ) -> Result<SaveAgreementResponses, ApiError> {
        self.record(format!("save_agreement {}", agreements.agreements.len()));
        Ok(SaveAgreementResponses::default())
    }

    async fn get_users_agreements(&self) -> Result<Vec<Agreement>, ApiError> {
        self.record("get_users_agreements".to_string());
        Ok(self.agreements.clone())
    }
}

/// Identity manager double keyed by user name.
#[derive(Debug, Default)]
pub struct MockIdentity {
    pub username: String,
    pub groups: HashMap<String, Vec<String>>,
}

#[async_trait]
impl IdentityApi for MockIdentity {
    async fn whoami(&self) -> Result<String, ApiError> {
        Ok(self.username.clone())
    }

    async fn groups(&self, username: &str) -> Result<Vec<String>, ApiError> {
        self.groups
            .get(username)
            .cloned()
            .ok_or_else(|| ApiError::Service("user not found".to_string()))
    }
}
