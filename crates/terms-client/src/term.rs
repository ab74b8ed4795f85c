//! Term identifiers.
//!
//! A term is addressed by a compact string of the form
//! `[tenant:][owner/]name[/revision]`. This module parses that form into a
//! [`TermId`], checks it against the naming grammar, and renders it back in
//! canonical form through [`std::fmt::Display`].

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::TermIdError;

/// Tenant name accepted without checking the term-name grammar.
pub const RESERVED_TENANT: &str = "cs";

const USER_NAME_SNIPPET: &str = "[a-zA-Z0-9][a-zA-Z0-9.+-]*[a-zA-Z0-9]";

lazy_static! {
    static ref VALID_TERM_NAME: Regex = Regex::new(r"^[a-z](-?[a-z0-9]+)+$").unwrap();
    static ref VALID_OWNER: Regex = Regex::new(&format!(
        "^(?P<name>{USER_NAME_SNIPPET})(?:@(?P<domain>{USER_NAME_SNIPPET}))?$"
    ))
    .unwrap();
}

/// A parsed term identifier.
///
/// Empty `tenant` and `owner` mean "default tenant" and "ownerless term".
/// Revisions start at 1, so a `revision` of 0 means unset (latest).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TermId {
    pub tenant: String,
    pub owner: String,
    pub name: String,
    pub revision: i64,
}

impl TermId {
    /// Parses a term id.
    ///
    /// Accepted forms:
    /// ```text
    /// name
    /// name/283            # revision 283
    /// owner/name
    /// owner/name/27       # revision 27
    /// tenant:owner/name/27
    /// ```
    ///
    /// With two slash-separated tokens the second one decides the form: if it
    /// parses as an integer it is a revision, otherwise it is the name and the
    /// first token is the owner. An all-digit owner is therefore read as a
    /// revision.
    pub fn parse(s: &str) -> Result<Self, TermIdError> {
        let (tenant, rest) = match s.split_once(':') {
            Some((tenant, rest)) => (tenant, rest),
            None => ("", s),
        };

        let tokens: Vec<&str> = rest.split('/').collect();
        let term = match tokens.as_slice() {
            [name] => TermId {
                tenant: tenant.to_string(),
                name: name.to_string(),
                ..Default::default()
            },
            [first, second] => match second.parse::<i64>() {
                Ok(revision) => TermId {
                    tenant: tenant.to_string(),
                    name: first.to_string(),
                    revision,
                    ..Default::default()
                },
                Err(_) => TermId {
                    tenant: tenant.to_string(),
                    owner: first.to_string(),
                    name: second.to_string(),
                    revision: 0,
                },
            },
            [owner, name, rev] => {
                let revision = rev.parse::<i64>().map_err(|error| {
                    TermIdError::InvalidRevisionNumber {
                        token: rev.to_string(),
                        error,
                    }
                })?;
                TermId {
                    tenant: tenant.to_string(),
                    owner: owner.to_string(),
                    name: name.to_string(),
                    revision,
                }
            }
            _ => {
                return Err(TermIdError::UnknownFormat {
                    input: s.to_string(),
                });
            }
        };

        term.validate()?;
        Ok(term)
    }

    /// Checks every field against the naming grammar.
    ///
    /// Fields are checked in order: tenant, owner, name, revision. The first
    /// failure is returned.
    pub fn validate(&self) -> Result<(), TermIdError> {
        if !self.tenant.is_empty()
            && self.tenant != RESERVED_TENANT
            && !VALID_TERM_NAME.is_match(&self.tenant)
        {
            return Err(TermIdError::InvalidTenant {
                tenant: self.tenant.clone(),
            });
        }
        if !self.owner.is_empty() {
            validate_owner(&self.owner)?;
        }
        validate_term_name(&self.name)?;
        if self.revision < 0 {
            return Err(TermIdError::NegativeRevision);
        }
        Ok(())
    }

    /// Returns true if the term belongs to an owner.
    pub fn is_owned(&self) -> bool {
        !self.owner.is_empty()
    }

    /// Returns true if a concrete revision was given.
    pub fn has_revision(&self) -> bool {
        self.revision != 0
    }
}

impl fmt::Display for TermId {
    /// Writes the canonical form, one of:
    /// ```text
    /// tenant:owner/name/revision
    /// tenant:name
    /// owner/name/revision
    /// owner/name
    /// name/revision
    /// name
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.tenant.is_empty() {
            write!(f, "{}:", self.tenant)?;
        }
        if !self.owner.is_empty() {
            write!(f, "{}/", self.owner)?;
        }
        f.write_str(&self.name)?;
        if self.revision != 0 {
            write!(f, "/{}", self.revision)?;
        }
        Ok(())
    }
}

impl FromStr for TermId {
    type Err = TermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TermId::parse(s)
    }
}

/// Parses a term id string. See [`TermId::parse`].
pub fn parse_term(s: &str) -> Result<TermId, TermIdError> {
    TermId::parse(s)
}

/// Checks a term name: a lowercase letter followed by hyphen-separated
/// runs of lowercase letters and digits.
pub fn validate_term_name(name: &str) -> Result<(), TermIdError> {
    if VALID_TERM_NAME.is_match(name) {
        Ok(())
    } else {
        Err(TermIdError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Checks an owner (user or group) name, optionally with an `@domain` suffix.
pub fn validate_owner(owner: &str) -> Result<(), TermIdError> {
    if VALID_OWNER.is_match(owner) {
        Ok(())
    } else {
        Err(TermIdError::InvalidOwner {
            owner: owner.to_string(),
        })
    }
}
