//! Verified claims and the verification object.
//!
//! `verified_claims` is the composition layer above the evidence records: it
//! binds a set of claims about a person to the `verification` object
//! describing how those claims were verified. The verification object is
//! open-ended — members this library does not understand are preserved
//! across a parse/serialize round trip.

use anyhow::{bail, Context, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::utils::NonEmptyVec;

use super::date::DateWithTimeZoneOffset;
use super::identifier::{AssuranceLevel, VerificationProcess};
use super::object::{ParsingErrorContext, TypedParameter, UntypedObject};
use super::wire_string_enum;

pub mod evidence;

use evidence::IdentityEvidence;

wire_string_enum! {
    /// The trust framework a verification was performed under.
    TrustFramework {
        /// German Anti-Money Laundering Law.
        DeAml => "de_aml",
        /// EU eIDAS regulation.
        Eidas => "eidas",
        /// NIST SP 800-63A digital identity guidelines.
        Nist800_63A => "nist_800_63a",
        /// Japanese Act on Prevention of Transfer of Criminal Proceeds.
        JpAml => "jp_aml",
        /// Japanese Act for Identification by Mobile Voice Communications
        /// Carriers.
        JpMpiupa => "jp_mpiupa",
        /// Czech Anti-Money Laundering Law.
        CzAml => "cz_aml",
        /// German Telecommunications Act, §111.
        DeTkg111 => "de_tkg111",
        /// UK trust framework for identity and attribute verification.
        UkTfida => "uk_tfida",
        /// Swedish e-identification board framework.
        SeBankid => "se_bankid",
        /// Italian public digital identity system.
        ItSpid => "it_spid",
    }
}

impl TypedParameter for TrustFramework {
    const KEY: &'static str = "trust_framework";
}

/// The `time` member of the verification object: when the verification took
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time(pub DateWithTimeZoneOffset);

impl TypedParameter for Time {
    const KEY: &'static str = "time";
}

impl TryFrom<Json> for Time {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        value.try_into().map(Self)
    }
}

impl From<Time> for Json {
    fn from(value: Time) -> Self {
        value.0.into()
    }
}

/// The `evidence` member of the verification object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence(pub NonEmptyVec<IdentityEvidence>);

impl TypedParameter for Evidence {
    const KEY: &'static str = "evidence";
}

impl TryFrom<Json> for Evidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        value.try_into().map(Self)
    }
}

impl From<Evidence> for Json {
    fn from(value: Evidence) -> Self {
        value.0.into()
    }
}

fn optional<T: TypedParameter>(object: &UntypedObject) -> Result<Option<T>> {
    object
        .get::<T>()
        .transpose()
        .context(format!("'{}' could not be parsed", T::KEY))
}

/// The `verification` member of [`VerifiedClaims`].
///
/// `trust_framework` is the only required member. Members outside the set
/// understood here survive a round trip through the retained object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "UntypedObject", into = "UntypedObject")]
pub struct IdentityVerification(
    UntypedObject,
    TrustFramework,
    Option<Time>,
    Option<VerificationProcess>,
    Option<AssuranceLevel>,
    Option<Evidence>,
);

impl IdentityVerification {
    pub fn new(trust_framework: TrustFramework) -> Self {
        let mut inner = UntypedObject::default();
        inner.insert(trust_framework.clone());
        Self(inner, trust_framework, None, None, None, None)
    }

    pub fn trust_framework(&self) -> &TrustFramework {
        &self.1
    }

    pub fn set_time(mut self, time: DateWithTimeZoneOffset) -> Self {
        self.0.insert(Time(time));
        self.2 = Some(Time(time));
        self
    }

    pub fn time(&self) -> Option<&DateWithTimeZoneOffset> {
        self.2.as_ref().map(|t| &t.0)
    }

    pub fn set_verification_process(mut self, process: VerificationProcess) -> Self {
        self.0.insert(process.clone());
        self.3 = Some(process);
        self
    }

    pub fn verification_process(&self) -> Option<&VerificationProcess> {
        self.3.as_ref()
    }

    pub fn set_assurance_level(mut self, assurance_level: AssuranceLevel) -> Self {
        self.0.insert(assurance_level.clone());
        self.4 = Some(assurance_level);
        self
    }

    pub fn assurance_level(&self) -> Option<&AssuranceLevel> {
        self.4.as_ref()
    }

    pub fn set_evidence(mut self, evidence: NonEmptyVec<IdentityEvidence>) -> Self {
        let evidence = Evidence(evidence);
        self.0.insert(evidence.clone());
        self.5 = Some(evidence);
        self
    }

    pub fn evidence(&self) -> Option<&NonEmptyVec<IdentityEvidence>> {
        self.5.as_ref().map(|e| &e.0)
    }
}

impl TryFrom<UntypedObject> for IdentityVerification {
    type Error = Error;

    fn try_from(value: UntypedObject) -> Result<Self> {
        let trust_framework = value.get().parsing_error()?;
        let time = optional(&value)?;
        let verification_process = optional(&value)?;
        let assurance_level = optional(&value)?;
        let evidence = optional(&value)?;
        Ok(Self(
            value,
            trust_framework,
            time,
            verification_process,
            assurance_level,
            evidence,
        ))
    }
}

impl From<IdentityVerification> for UntypedObject {
    fn from(value: IdentityVerification) -> Self {
        let mut inner = value.0;
        inner.insert(value.1);
        if let Some(time) = value.2 {
            inner.insert(time);
        }
        if let Some(verification_process) = value.3 {
            inner.insert(verification_process);
        }
        if let Some(assurance_level) = value.4 {
            inner.insert(assurance_level);
        }
        if let Some(evidence) = value.5 {
            inner.insert(evidence);
        }
        inner
    }
}

impl TryFrom<Json> for IdentityVerification {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        UntypedObject::try_from(value)?.try_into()
    }
}

impl From<IdentityVerification> for Json {
    fn from(value: IdentityVerification) -> Self {
        UntypedObject::from(value).into()
    }
}

/// A single `verified_claims` entry: verified claims about a person together
/// with the verification that established them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct VerifiedClaims {
    verification: IdentityVerification,
    claims: Map<String, Json>,
}

impl VerifiedClaims {
    /// The `claims` member must carry at least one claim.
    pub fn new(verification: IdentityVerification, claims: Map<String, Json>) -> Result<Self> {
        if claims.is_empty() {
            bail!("'claims' must not be empty")
        }
        Ok(Self {
            verification,
            claims,
        })
    }

    pub fn verification(&self) -> &IdentityVerification {
        &self.verification
    }

    pub fn claims(&self) -> &Map<String, Json> {
        &self.claims
    }

    pub fn claim(&self, name: &str) -> Option<&Json> {
        self.claims.get(name)
    }
}

impl TryFrom<Json> for VerifiedClaims {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("verified claims must be a JSON object")
        };
        let verification = object
            .get("verification")
            .cloned()
            .context("'verification' is missing")?
            .try_into()
            .context("'verification' could not be parsed")?;
        let claims = match object.get("claims") {
            None => bail!("'claims' is missing"),
            Some(Json::Object(claims)) => claims.clone(),
            Some(_) => bail!("'claims' could not be parsed"),
        };
        Self::new(verification, claims)
    }
}

impl From<VerifiedClaims> for Json {
    fn from(value: VerifiedClaims) -> Self {
        let mut object = Map::default();
        object.insert("verification".to_owned(), value.verification.into());
        object.insert("claims".to_owned(), value.claims.into());
        object.into()
    }
}

/// The `verified_claims` member of a claims set: a single entry or an array
/// of them.
///
/// Both wire shapes are legal; which one a producer uses is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub enum VerifiedClaimsSet {
    Single(VerifiedClaims),
    Many(Vec<VerifiedClaims>),
}

impl VerifiedClaimsSet {
    pub fn into_vec(self) -> Vec<VerifiedClaims> {
        match self {
            Self::Single(single) => vec![single],
            Self::Many(many) => many,
        }
    }
}

impl TypedParameter for VerifiedClaimsSet {
    const KEY: &'static str = "verified_claims";
}

impl TryFrom<Json> for VerifiedClaimsSet {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        match value {
            Json::Object(_) => VerifiedClaims::try_from(value).map(Self::Single),
            Json::Array(entries) => entries
                .into_iter()
                .map(VerifiedClaims::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Self::Many),
            _ => bail!("'verified_claims' must be a JSON object or array"),
        }
    }
}

impl From<VerifiedClaimsSet> for Json {
    fn from(value: VerifiedClaimsSet) -> Self {
        match value {
            VerifiedClaimsSet::Single(single) => single.into(),
            VerifiedClaimsSet::Many(many) => {
                Json::Array(many.into_iter().map(Into::into).collect())
            }
        }
    }
}
