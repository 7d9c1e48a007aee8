//! Electronic record evidence: data obtained from an approved or recognized
//! register or account.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::date::{DateWithTimeZoneOffset, SimpleDate};
use crate::core::identifier::PersonalNumber;
use crate::core::object::{member, member_opt};
use crate::core::wire_string_enum;
use crate::utils::NonEmptyVec;

use super::method::{ValidationMethod, VerificationMethod};
use super::originator::ElectronicRecordSource;
use super::verifier::IdentityVerifier;
use super::{into_checked_object, Attachment, EvidenceType};

wire_string_enum! {
    /// Standard electronic record types.
    ElectronicRecordType {
        BirthRegister => "birth_register",
        DeathRegister => "death_register",
        PopulationRegister => "population_register",
        VoterRegister => "voter_register",
        CompanyRegister => "company_register",
        BankAccount => "bank_account",
        UtilityAccount => "utility_account",
        MortgageAccount => "mortgage_account",
        LoanAccount => "loan_account",
        TaxRecord => "tax_record",
        SocialSecurityRecord => "social_security_record",
        PrisonRecord => "prison_record",
    }
}

/// The `record` member of [`ElectronicRecordEvidence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct ElectronicRecordDetails {
    record_type: ElectronicRecordType,
    personal_number: Option<PersonalNumber>,
    created_at: Option<DateWithTimeZoneOffset>,
    date_of_expiry: Option<SimpleDate>,
    source: Option<ElectronicRecordSource>,
}

impl ElectronicRecordDetails {
    pub fn new(record_type: ElectronicRecordType) -> Self {
        Self {
            record_type,
            personal_number: None,
            created_at: None,
            date_of_expiry: None,
            source: None,
        }
    }

    pub fn record_type(&self) -> &ElectronicRecordType {
        &self.record_type
    }

    pub fn set_personal_number(mut self, personal_number: PersonalNumber) -> Self {
        self.personal_number = Some(personal_number);
        self
    }

    pub fn personal_number(&self) -> Option<&PersonalNumber> {
        self.personal_number.as_ref()
    }

    pub fn set_created_at(mut self, created_at: DateWithTimeZoneOffset) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn created_at(&self) -> Option<&DateWithTimeZoneOffset> {
        self.created_at.as_ref()
    }

    pub fn set_date_of_expiry(mut self, date_of_expiry: SimpleDate) -> Self {
        self.date_of_expiry = Some(date_of_expiry);
        self
    }

    pub fn date_of_expiry(&self) -> Option<&SimpleDate> {
        self.date_of_expiry.as_ref()
    }

    pub fn set_source(mut self, source: ElectronicRecordSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn source(&self) -> Option<&ElectronicRecordSource> {
        self.source.as_ref()
    }
}

impl TryFrom<Json> for ElectronicRecordDetails {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            anyhow::bail!("record details must be a JSON object")
        };
        Ok(Self {
            record_type: member(&object, "type")?,
            personal_number: member_opt(&object, "personal_number")?,
            created_at: member_opt(&object, "created_at")?,
            date_of_expiry: member_opt(&object, "date_of_expiry")?,
            source: member_opt(&object, "source")?,
        })
    }
}

impl From<ElectronicRecordDetails> for Json {
    fn from(value: ElectronicRecordDetails) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), value.record_type.into());
        if let Some(personal_number) = value.personal_number {
            object.insert("personal_number".to_owned(), personal_number.into());
        }
        if let Some(created_at) = value.created_at {
            object.insert("created_at".to_owned(), created_at.into());
        }
        if let Some(date_of_expiry) = value.date_of_expiry {
            object.insert("date_of_expiry".to_owned(), date_of_expiry.into());
        }
        if let Some(source) = value.source {
            object.insert("source".to_owned(), source.into());
        }
        object.into()
    }
}

/// Evidence based on an electronic record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct ElectronicRecordEvidence {
    validation_method: Option<ValidationMethod>,
    verification_method: Option<VerificationMethod>,
    verifier: Option<IdentityVerifier>,
    time: Option<DateWithTimeZoneOffset>,
    record: Option<ElectronicRecordDetails>,
    attachments: Option<NonEmptyVec<Attachment>>,
}

impl ElectronicRecordEvidence {
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

    pub fn set_record(mut self, record: ElectronicRecordDetails) -> Self {
        self.record = Some(record);
        self
    }

    pub fn record(&self) -> Option<&ElectronicRecordDetails> {
        self.record.as_ref()
    }

    pub fn set_attachments(mut self, attachments: NonEmptyVec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn attachments(&self) -> Option<&NonEmptyVec<Attachment>> {
        self.attachments.as_ref()
    }
}

impl TryFrom<Json> for ElectronicRecordEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::ElectronicRecord)?;
        Ok(Self {
            validation_method: member_opt(&object, "validation_method")?,
            verification_method: member_opt(&object, "verification_method")?,
            verifier: member_opt(&object, "verifier")?,
            time: member_opt(&object, "time")?,
            record: member_opt(&object, "record")?,
            attachments: member_opt(&object, "attachments")?,
        })
    }
}

impl From<ElectronicRecordEvidence> for Json {
    fn from(value: ElectronicRecordEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::ElectronicRecord.into());
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
        if let Some(record) = value.record {
            object.insert("record".to_owned(), record.into());
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
            "type": "electronic_record",
            "validation_method": { "type": "data" },
            "verification_method": { "type": "token" },
            "time": "2021-02-15T16:51:00Z",
            "record": {
                "type": "population_register",
                "source": {
                    "name": "General Register Office",
                    "street_address": "PO BOX 2",
                    "locality": "Southport",
                    "postal_code": "PR8 2JD",
                    "country_code": "GBR"
                }
            }
        })
    }

    #[test]
    fn parses_the_ida_example() {
        let evidence = ElectronicRecordEvidence::try_from(evidence_json()).unwrap();
        let record = evidence.record().unwrap();
        assert_eq!(record.record_type(), &ElectronicRecordType::PopulationRegister);
        let source = record.source().unwrap();
        assert_eq!(source.name().unwrap().as_str(), "General Register Office");
        assert_eq!(
            source.address().unwrap().postal_code(),
            Some("PR8 2JD")
        );
        assert_eq!(source.country_code().unwrap().as_str(), "GBR");
    }

    #[test]
    fn round_trip() {
        let evidence = ElectronicRecordEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(Json::from(evidence.clone()), evidence_json());
    }

    #[test]
    fn record_type_is_mandatory() {
        let err =
            ElectronicRecordDetails::try_from(json!({ "personal_number": "4901224131" }))
                .unwrap_err();
        assert_eq!(err.to_string(), "'type' is missing");
    }
}
