use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::identifier::{Organization, Txn};
use crate::core::object::member_opt;

/// The `verifier` member: the legal entity that performed an identity
/// verification, with the transaction it did so under.
///
/// Both members are optional; an empty object is legal on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct IdentityVerifier {
    organization: Option<Organization>,
    txn: Option<Txn>,
}

impl IdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_organization(mut self, organization: Organization) -> Self {
        self.organization = Some(organization);
        self
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    pub fn set_txn(mut self, txn: Txn) -> Self {
        self.txn = Some(txn);
        self
    }

    pub fn txn(&self) -> Option<&Txn> {
        self.txn.as_ref()
    }
}

impl TryFrom<Json> for IdentityVerifier {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("a verifier must be a JSON object")
        };
        Ok(Self {
            organization: member_opt(&object, "organization")?,
            txn: member_opt(&object, "txn")?,
        })
    }
}

impl From<IdentityVerifier> for Json {
    fn from(value: IdentityVerifier) -> Self {
        let mut object = Map::default();
        if let Some(organization) = value.organization {
            object.insert("organization".to_owned(), organization.into());
        }
        if let Some(txn) = value.txn {
            object.insert("txn".to_owned(), txn.into());
        }
        object.into()
    }
}
