//! Vouch evidence: an attestation of a person's identity given by another
//! person or organization.
//!
//! This is the deepest nesting in the evidence model: the evidence owns an
//! optional [`Attestation`], which owns an optional [`Voucher`], whose postal
//! address shares the voucher object's flat namespace exactly like an
//! originator's does.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::address::Address;
use crate::core::date::{DateWithTimeZoneOffset, SimpleDate};
use crate::core::identifier::{
    Name, Occupation, Organization, PersonalNumber, ReferenceNumber,
};
use crate::core::object::{member, member_opt};
use crate::core::wire_string_enum;
use crate::utils::NonEmptyVec;

use super::method::{ValidationMethod, VerificationMethod};
use super::verifier::IdentityVerifier;
use super::{into_checked_object, Attachment, EvidenceType};

wire_string_enum! {
    /// Standard attestation types.
    VouchType {
        /// Attestation on paper.
        WrittenAttestation => "written_attestation",
        /// Attestation in electronic form.
        DigitalAttestation => "digital_attestation",
    }
}

/// The person or organization giving the attestation.
///
/// On the wire the voucher's address members sit in the same flat namespace
/// as `name`, `birthdate`, `occupation` and `organization`; parsing reads
/// those four members first and then carves the standard address claim names
/// out of what the object carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct Voucher {
    name: Option<Name>,
    birthdate: Option<SimpleDate>,
    address: Option<Address>,
    occupation: Option<Occupation>,
    organization: Option<Organization>,
}

impl Voucher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn set_birthdate(mut self, birthdate: SimpleDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    pub fn birthdate(&self) -> Option<&SimpleDate> {
        self.birthdate.as_ref()
    }

    pub fn set_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn set_occupation(mut self, occupation: Occupation) -> Self {
        self.occupation = Some(occupation);
        self
    }

    pub fn occupation(&self) -> Option<&Occupation> {
        self.occupation.as_ref()
    }

    pub fn set_organization(mut self, organization: Organization) -> Self {
        self.organization = Some(organization);
        self
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }
}

impl TryFrom<Json> for Voucher {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            anyhow::bail!("a voucher must be a JSON object")
        };
        Ok(Self {
            name: member_opt(&object, "name")?,
            birthdate: member_opt(&object, "birthdate")?,
            address: Address::from_flattened(&object)?,
            occupation: member_opt(&object, "occupation")?,
            organization: member_opt(&object, "organization")?,
        })
    }
}

impl From<Voucher> for Json {
    fn from(value: Voucher) -> Self {
        let mut object = Map::default();
        if let Some(name) = value.name {
            object.insert("name".to_owned(), name.into());
        }
        if let Some(birthdate) = value.birthdate {
            object.insert("birthdate".to_owned(), birthdate.into());
        }
        if let Some(address) = &value.address {
            address.flatten_into(&mut object);
        }
        if let Some(occupation) = value.occupation {
            object.insert("occupation".to_owned(), occupation.into());
        }
        if let Some(organization) = value.organization {
            object.insert("organization".to_owned(), organization.into());
        }
        object.into()
    }
}

/// The `attestation` member of [`VouchEvidence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct Attestation {
    vouch_type: VouchType,
    reference_number: Option<ReferenceNumber>,
    personal_number: Option<PersonalNumber>,
    date_of_issuance: Option<SimpleDate>,
    date_of_expiry: Option<SimpleDate>,
    voucher: Option<Voucher>,
}

impl Attestation {
    pub fn new(vouch_type: VouchType) -> Self {
        Self {
            vouch_type,
            reference_number: None,
            personal_number: None,
            date_of_issuance: None,
            date_of_expiry: None,
            voucher: None,
        }
    }

    pub fn vouch_type(&self) -> &VouchType {
        &self.vouch_type
    }

    pub fn set_reference_number(mut self, reference_number: ReferenceNumber) -> Self {
        self.reference_number = Some(reference_number);
        self
    }

    pub fn reference_number(&self) -> Option<&ReferenceNumber> {
        self.reference_number.as_ref()
    }

    pub fn set_personal_number(mut self, personal_number: PersonalNumber) -> Self {
        self.personal_number = Some(personal_number);
        self
    }

    pub fn personal_number(&self) -> Option<&PersonalNumber> {
        self.personal_number.as_ref()
    }

    pub fn set_date_of_issuance(mut self, date_of_issuance: SimpleDate) -> Self {
        self.date_of_issuance = Some(date_of_issuance);
        self
    }

    pub fn date_of_issuance(&self) -> Option<&SimpleDate> {
        self.date_of_issuance.as_ref()
    }

    pub fn set_date_of_expiry(mut self, date_of_expiry: SimpleDate) -> Self {
        self.date_of_expiry = Some(date_of_expiry);
        self
    }

    pub fn date_of_expiry(&self) -> Option<&SimpleDate> {
        self.date_of_expiry.as_ref()
    }

    pub fn set_voucher(mut self, voucher: Voucher) -> Self {
        self.voucher = Some(voucher);
        self
    }

    pub fn voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref()
    }
}

impl TryFrom<Json> for Attestation {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            anyhow::bail!("an attestation must be a JSON object")
        };
        Ok(Self {
            vouch_type: member(&object, "type")?,
            reference_number: member_opt(&object, "reference_number")?,
            personal_number: member_opt(&object, "personal_number")?,
            date_of_issuance: member_opt(&object, "date_of_issuance")?,
            date_of_expiry: member_opt(&object, "date_of_expiry")?,
            voucher: member_opt(&object, "voucher")?,
        })
    }
}

impl From<Attestation> for Json {
    fn from(value: Attestation) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), value.vouch_type.into());
        if let Some(reference_number) = value.reference_number {
            object.insert("reference_number".to_owned(), reference_number.into());
        }
        if let Some(personal_number) = value.personal_number {
            object.insert("personal_number".to_owned(), personal_number.into());
        }
        if let Some(date_of_issuance) = value.date_of_issuance {
            object.insert("date_of_issuance".to_owned(), date_of_issuance.into());
        }
        if let Some(date_of_expiry) = value.date_of_expiry {
            object.insert("date_of_expiry".to_owned(), date_of_expiry.into());
        }
        if let Some(voucher) = value.voucher {
            object.insert("voucher".to_owned(), voucher.into());
        }
        object.into()
    }
}

/// Evidence based on a vouch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct VouchEvidence {
    validation_method: Option<ValidationMethod>,
    verification_method: Option<VerificationMethod>,
    verifier: Option<IdentityVerifier>,
    time: Option<DateWithTimeZoneOffset>,
    attestation: Option<Attestation>,
    attachments: Option<NonEmptyVec<Attachment>>,
}

impl VouchEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_validation_method(mut self, validation_method: ValidationMethod) -> Self {
        self.validation_method = Some(validation_method);
        self
    }

    pub fn validation_method(&self) -> Option<&ValidationMethod> {
        self.validation_method.as_ref()
    }

    pub fn set_verification_method(mut self, verification_method: VerificationMethod) -> Self {
        self.verification_method = Some(verification_method);
        self
    }

    pub fn verification_method(&self) -> Option<&VerificationMethod> {
        self.verification_method.as_ref()
    }

    pub fn set_verifier(mut self, verifier: IdentityVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn verifier(&self) -> Option<&IdentityVerifier> {
        self.verifier.as_ref()
    }

    pub fn set_time(mut self, time: DateWithTimeZoneOffset) -> Self {
        self.time = Some(time);
        self
    }

    pub fn time(&self) -> Option<&DateWithTimeZoneOffset> {
        self.time.as_ref()
    }

    pub fn set_attestation(mut self, attestation: Attestation) -> Self {
        self.attestation = Some(attestation);
        self
    }

    pub fn attestation(&self) -> Option<&Attestation> {
        self.attestation.as_ref()
    }

    pub fn set_attachments(mut self, attachments: NonEmptyVec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn attachments(&self) -> Option<&NonEmptyVec<Attachment>> {
        self.attachments.as_ref()
    }
}

impl TryFrom<Json> for VouchEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::Vouch)?;
        Ok(Self {
            validation_method: member_opt(&object, "validation_method")?,
            verification_method: member_opt(&object, "verification_method")?,
            verifier: member_opt(&object, "verifier")?,
            time: member_opt(&object, "time")?,
            attestation: member_opt(&object, "attestation")?,
            attachments: member_opt(&object, "attachments")?,
        })
    }
}

impl From<VouchEvidence> for Json {
    fn from(value: VouchEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::Vouch.into());
        if let Some(validation_method) = value.validation_method {
            object.insert("validation_method".to_owned(), validation_method.into());
        }
        if let Some(verification_method) = value.verification_method {
            object.insert("verification_method".to_owned(), verification_method.into());
        }
        if let Some(verifier) = value.verifier {
            object.insert("verifier".to_owned(), verifier.into());
        }
        if let Some(time) = value.time {
            object.insert("time".to_owned(), time.into());
        }
        if let Some(attestation) = value.attestation {
            object.insert("attestation".to_owned(), attestation.into());
        }
        if let Some(attachments) = value.attachments {
            object.insert("attachments".to_owned(), attachments.into());
        }
        object.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn evidence_json() -> Json {
        json!({
            "type": "vouch",
            "validation_method": { "type": "vcrypt" },
            "verification_method": { "type": "bvr" },
            "time": "2020-02-23T07:15:00Z",
            "attestation": {
                "type": "digital_attestation",
                "reference_number": "6485-1619-3976-6671",
                "date_of_issuance": "2021-06-04",
                "voucher": {
                    "name": "Peter Crowe",
                    "occupation": "Executive Principal",
                    "organization": "Kristin School"
                }
            }
        })
    }

    #[test]
    fn parses_the_ida_example() {
        let evidence = VouchEvidence::try_from(evidence_json()).unwrap();
        let attestation = evidence.attestation().unwrap();
        assert_eq!(attestation.vouch_type(), &VouchType::DigitalAttestation);
        let voucher = attestation.voucher().unwrap();
        assert_eq!(voucher.name().unwrap().as_str(), "Peter Crowe");
        assert_eq!(voucher.organization().unwrap().as_str(), "Kristin School");
        assert!(voucher.address().is_none());
    }

    #[test]
    fn round_trip() {
        let evidence = VouchEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(Json::from(evidence.clone()), evidence_json());
    }

    #[test]
    fn voucher_address_is_carved_from_the_flat_namespace() {
        let voucher = Voucher::try_from(json!({
            "name": "Megan Ann Baker",
            "birthdate": "1975-02-20",
            "street_address": "1234 Main St",
            "locality": "Anytown",
            "occupation": "Notary"
        }))
        .unwrap();
        assert_eq!(voucher.name().unwrap().as_str(), "Megan Ann Baker");
        assert_eq!(voucher.occupation().unwrap().as_str(), "Notary");
        let address = voucher.address().unwrap();
        assert_eq!(address.street_address(), Some("1234 Main St"));
        assert_eq!(address.locality(), Some("Anytown"));
        assert_eq!(address.formatted(), None);
    }

    #[test]
    fn voucher_round_trip_with_address() {
        let voucher = Voucher::new()
            .set_name(Name::new("Megan Ann Baker").unwrap())
            .set_address(
                Address::new()
                    .set_street_address("1234 Main St".to_owned())
                    .set_locality("Anytown".to_owned()),
            );
        let json = Json::from(voucher.clone());
        assert_eq!(
            json,
            json!({
                "name": "Megan Ann Baker",
                "street_address": "1234 Main St",
                "locality": "Anytown"
            })
        );
        assert_eq!(Voucher::try_from(json).unwrap(), voucher);
    }

    #[test]
    fn attestation_type_is_mandatory() {
        let err = Attestation::try_from(json!({ "reference_number": "1234" })).unwrap_err();
        assert_eq!(err.to_string(), "'type' is missing");
    }
}
