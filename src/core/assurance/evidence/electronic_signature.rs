//! Electronic signature evidence, the current wire form for signatures and
//! seals created by the person being verified.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::date::DateWithTimeZoneOffset;
use crate::core::identifier::{Issuer, SerialNumber, SignatureType};
use crate::core::object::{member, member_opt};
use crate::utils::NonEmptyVec;

use super::{into_checked_object, Attachment, EvidenceType};

/// Evidence based on an electronic signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct ElectronicSignatureEvidence {
    signature_type: SignatureType,
    issuer: Option<Issuer>,
    serial_number: Option<SerialNumber>,
    created_at: Option<DateWithTimeZoneOffset>,
    attachments: Option<NonEmptyVec<Attachment>>,
}

impl ElectronicSignatureEvidence {
    pub fn new(signature_type: SignatureType) -> Self {
        Self {
            signature_type,
            issuer: None,
            serial_number: None,
            created_at: None,
            attachments: None,
        }
    }

    /// The type of signature used, e.g. a qualified electronic signature
    /// under eIDAS.
    pub fn signature_type(&self) -> &SignatureType {
        &self.signature_type
    }

    pub fn set_issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn issuer(&self) -> Option<&Issuer> {
        self.issuer.as_ref()
    }

    pub fn set_serial_number(mut self, serial_number: SerialNumber) -> Self {
        self.serial_number = Some(serial_number);
        self
    }

    pub fn serial_number(&self) -> Option<&SerialNumber> {
        self.serial_number.as_ref()
    }

    pub fn set_created_at(mut self, created_at: DateWithTimeZoneOffset) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn created_at(&self) -> Option<&DateWithTimeZoneOffset> {
        self.created_at.as_ref()
    }

    pub fn set_attachments(mut self, attachments: NonEmptyVec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn attachments(&self) -> Option<&NonEmptyVec<Attachment>> {
        self.attachments.as_ref()
    }
}

impl TryFrom<Json> for ElectronicSignatureEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::ElectronicSignature)?;
        Ok(Self {
            signature_type: member(&object, "signature_type")?,
            issuer: member_opt(&object, "issuer")?,
            serial_number: member_opt(&object, "serial_number")?,
            created_at: member_opt(&object, "created_at")?,
            attachments: member_opt(&object, "attachments")?,
        })
    }
}

impl From<ElectronicSignatureEvidence> for Json {
    fn from(value: ElectronicSignatureEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::ElectronicSignature.into());
        object.insert("signature_type".to_owned(), value.signature_type.into());
        if let Some(issuer) = value.issuer {
            object.insert("issuer".to_owned(), issuer.into());
        }
        if let Some(serial_number) = value.serial_number {
            object.insert("serial_number".to_owned(), serial_number.into());
        }
        if let Some(created_at) = value.created_at {
            object.insert("created_at".to_owned(), created_at.into());
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
            "type": "electronic_signature",
            "signature_type": "qes_eidas",
            "issuer": "Certification Authority",
            "serial_number": "59cb09e5-3373-4b06-8c88-b6fa49b4a9e2",
            "created_at": "2021-05-11T14:29:00Z"
        })
    }

    #[test]
    fn round_trip() {
        let evidence = ElectronicSignatureEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(evidence.signature_type().as_str(), "qes_eidas");
        assert_eq!(evidence.issuer().unwrap().as_str(), "Certification Authority");
        assert_eq!(Json::from(evidence.clone()), evidence_json());
        assert_eq!(
            ElectronicSignatureEvidence::try_from(Json::from(evidence.clone())).unwrap(),
            evidence
        );
    }

    #[test]
    fn signature_type_is_mandatory() {
        let err = ElectronicSignatureEvidence::try_from(json!({
            "type": "electronic_signature"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "'signature_type' is missing");
    }
}
