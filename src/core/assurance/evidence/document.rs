//! Document evidence, the current wire form for physical and electronic
//! documents.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::date::{DateWithTimeZoneOffset, SimpleDate};
use crate::core::identifier::{DocumentNumber, PersonalNumber, SerialNumber};
use crate::core::object::{member, member_opt};
use crate::core::wire_string_enum;
use crate::utils::NonEmptyVec;

use super::method::{IdentityVerificationMethod, ValidationMethod, VerificationMethod};
use super::originator::DocumentIssuer;
use super::verifier::IdentityVerifier;
use super::{into_checked_object, Attachment, EvidenceType};

wire_string_enum! {
    /// Standard identity document types.
    DocumentType {
        /// National identity card.
        Idcard => "idcard",
        Passport => "passport",
        /// Official document permitting to drive.
        DrivingPermit => "driving_permit",
        /// German identity card for foreign nationals.
        DeIdcardForeigners => "de_idcard_foreigners",
        /// German temporary emergency identity card.
        DeEmergencyIdcard => "de_emergency_idcard",
        /// German electronic residence permit.
        DeErp => "de_erp",
        /// German replacement electronic residence permit.
        DeErpReplacementIdcard => "de_erp_replacement_idcard",
        /// German identity card for refugees.
        DeIdcardRefugees => "de_idcard_refugees",
        /// German identity card for stateless persons.
        DeIdcardApatrids => "de_idcard_apatrids",
        /// German certificate of suspension of deportation.
        DeCertificateOfSuspensionOfDeportation => "de_certificate_of_suspension_of_deportation",
        /// German permission-to-reside certificate.
        DePermissionToReside => "de_permission_to_reside",
        /// German replacement identity card.
        DeReplacementIdcard => "de_replacement_idcard",
        /// Japanese driving license.
        JpDriversLicense => "jp_drivers_license",
        /// Japanese residency card for foreigners.
        JpResidencyCardForForeigner => "jp_residency_card_for_foreigner",
        /// Japanese individual number card.
        JpIndividualNumberCard => "jp_individual_number_card",
        /// Japanese permanent residency card for foreigners.
        JpPermanentResidencyCardForForeigner => "jp_permanent_residency_card_for_foreigner",
        /// Japanese health insurance card.
        JpHealthInsuranceCard => "jp_health_insurance_card",
        /// Japanese residency card.
        JpResidencyCard => "jp_residency_card",
    }
}

/// The `document_details` member of [`DocumentEvidence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct DocumentDetails {
    document_type: DocumentType,
    document_number: Option<DocumentNumber>,
    personal_number: Option<PersonalNumber>,
    serial_number: Option<SerialNumber>,
    date_of_issuance: Option<SimpleDate>,
    date_of_expiry: Option<SimpleDate>,
    issuer: Option<DocumentIssuer>,
}

impl DocumentDetails {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            document_number: None,
            personal_number: None,
            serial_number: None,
            date_of_issuance: None,
            date_of_expiry: None,
            issuer: None,
        }
    }

    pub fn document_type(&self) -> &DocumentType {
        &self.document_type
    }

    pub fn set_document_number(mut self, document_number: DocumentNumber) -> Self {
        self.document_number = Some(document_number);
        self
    }

    pub fn document_number(&self) -> Option<&DocumentNumber> {
        self.document_number.as_ref()
    }

    pub fn set_personal_number(mut self, personal_number: PersonalNumber) -> Self {
        self.personal_number = Some(personal_number);
        self
    }

    pub fn personal_number(&self) -> Option<&PersonalNumber> {
        self.personal_number.as_ref()
    }

    pub fn set_serial_number(mut self, serial_number: SerialNumber) -> Self {
        self.serial_number = Some(serial_number);
        self
    }

    pub fn serial_number(&self) -> Option<&SerialNumber> {
        self.serial_number.as_ref()
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

    pub fn set_issuer(mut self, issuer: DocumentIssuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn issuer(&self) -> Option<&DocumentIssuer> {
        self.issuer.as_ref()
    }
}

impl TryFrom<Json> for DocumentDetails {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            anyhow::bail!("document details must be a JSON object")
        };
        Ok(Self {
            document_type: member(&object, "type")?,
            document_number: member_opt(&object, "document_number")?,
            personal_number: member_opt(&object, "personal_number")?,
            serial_number: member_opt(&object, "serial_number")?,
            date_of_issuance: member_opt(&object, "date_of_issuance")?,
            date_of_expiry: member_opt(&object, "date_of_expiry")?,
            issuer: member_opt(&object, "issuer")?,
        })
    }
}

impl From<DocumentDetails> for Json {
    fn from(value: DocumentDetails) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), value.document_type.into());
        if let Some(document_number) = value.document_number {
            object.insert("document_number".to_owned(), document_number.into());
        }
        if let Some(personal_number) = value.personal_number {
            object.insert("personal_number".to_owned(), personal_number.into());
        }
        if let Some(serial_number) = value.serial_number {
            object.insert("serial_number".to_owned(), serial_number.into());
        }
        if let Some(date_of_issuance) = value.date_of_issuance {
            object.insert("date_of_issuance".to_owned(), date_of_issuance.into());
        }
        if let Some(date_of_expiry) = value.date_of_expiry {
            object.insert("date_of_expiry".to_owned(), date_of_expiry.into());
        }
        if let Some(issuer) = value.issuer {
            object.insert("issuer".to_owned(), issuer.into());
        }
        object.into()
    }
}

/// Evidence based on a physical or electronic document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct DocumentEvidence {
    validation_method: Option<ValidationMethod>,
    verification_method: Option<VerificationMethod>,
    method: Option<IdentityVerificationMethod>,
    verifier: Option<IdentityVerifier>,
    time: Option<DateWithTimeZoneOffset>,
    document_details: Option<DocumentDetails>,
    attachments: Option<NonEmptyVec<Attachment>>,
}

impl DocumentEvidence {
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

    /// The legacy `method` member, retained for wire compatibility with
    /// producers that have not moved to `validation_method` /
    /// `verification_method`.
    pub fn set_method(mut self, method: IdentityVerificationMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn method(&self) -> Option<&IdentityVerificationMethod> {
        self.method.as_ref()
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

    pub fn set_document_details(mut self, document_details: DocumentDetails) -> Self {
        self.document_details = Some(document_details);
        self
    }

    pub fn document_details(&self) -> Option<&DocumentDetails> {
        self.document_details.as_ref()
    }

    pub fn set_attachments(mut self, attachments: NonEmptyVec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn attachments(&self) -> Option<&NonEmptyVec<Attachment>> {
        self.attachments.as_ref()
    }
}

impl TryFrom<Json> for DocumentEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::Document)?;
        Ok(Self {
            validation_method: member_opt(&object, "validation_method")?,
            verification_method: member_opt(&object, "verification_method")?,
            method: member_opt(&object, "method")?,
            verifier: member_opt(&object, "verifier")?,
            time: member_opt(&object, "time")?,
            document_details: member_opt(&object, "document_details")?,
            attachments: member_opt(&object, "attachments")?,
        })
    }
}

impl From<DocumentEvidence> for Json {
    fn from(value: DocumentEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::Document.into());
        if let Some(validation_method) = value.validation_method {
            object.insert("validation_method".to_owned(), validation_method.into());
        }
        if let Some(verification_method) = value.verification_method {
            object.insert("verification_method".to_owned(), verification_method.into());
        }
        if let Some(method) = value.method {
            object.insert("method".to_owned(), method.into());
        }
        if let Some(verifier) = value.verifier {
            object.insert("verifier".to_owned(), verifier.into());
        }
        if let Some(time) = value.time {
            object.insert("time".to_owned(), time.into());
        }
        if let Some(document_details) = value.document_details {
            object.insert("document_details".to_owned(), document_details.into());
        }
        if let Some(attachments) = value.attachments {
            object.insert("attachments".to_owned(), attachments.into());
        }
        object.into()
    }
}

#[cfg(test)]
mod tests {
    use super::super::method::ValidationMethodType;
    use super::*;
    use crate::core::identifier::Name;
    use serde_json::json;

    fn evidence_json() -> Json {
        json!({
            "type": "document",
            "validation_method": { "type": "vpip" },
            "verification_method": { "type": "pvr" },
            "time": "2012-04-22T11:30:00Z",
            "document_details": {
                "type": "idcard",
                "document_number": "53554554",
                "date_of_issuance": "2010-03-23",
                "date_of_expiry": "2020-03-22",
                "issuer": {
                    "name": "Stadt Augsburg",
                    "country_code": "DE"
                }
            }
        })
    }

    #[test]
    fn parses_the_ida_example() {
        let evidence = DocumentEvidence::try_from(evidence_json()).unwrap();
        let details = evidence.document_details().unwrap();
        assert_eq!(details.document_type(), &DocumentType::Idcard);
        assert_eq!(details.document_number().unwrap().as_str(), "53554554");
        assert_eq!(
            details.issuer().unwrap().name(),
            Some(&Name::new("Stadt Augsburg").unwrap())
        );
        assert_eq!(
            evidence.validation_method().unwrap().method_type(),
            &ValidationMethodType::Vpip
        );
    }

    #[test]
    fn round_trip() {
        let evidence = DocumentEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(Json::from(evidence.clone()), evidence_json());
        assert_eq!(
            DocumentEvidence::try_from(Json::from(evidence.clone())).unwrap(),
            evidence
        );
    }

    #[test]
    fn document_type_is_mandatory_in_details() {
        let err = DocumentDetails::try_from(json!({ "document_number": "1234" })).unwrap_err();
        assert_eq!(err.to_string(), "'type' is missing");
    }

    #[test]
    fn unknown_document_types_are_preserved() {
        let details = DocumentDetails::try_from(json!({ "type": "space_visa" })).unwrap();
        assert_eq!(
            details.document_type(),
            &DocumentType::Other("space_visa".to_owned())
        );
    }

    #[test]
    fn minimal_evidence_serializes_to_the_discriminator_only() {
        assert_eq!(
            Json::from(DocumentEvidence::new()),
            json!({ "type": "document" })
        );
    }
}
