//! Identity document evidence, the deprecated wire form superseded by
//! `document`.
//!
//! The legacy form nests the document description under `document` instead of
//! `document_details`, and its issuer carries only a name and a country
//! rather than the full originator attributes.

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::date::{DateWithTimeZoneOffset, SimpleDate};
use crate::core::identifier::{CountryCode, DocumentNumber, Name};
use crate::core::object::{member, member_opt};

use super::document::DocumentType;
use super::method::IdentityVerificationMethod;
use super::verifier::IdentityVerifier;
use super::{into_checked_object, EvidenceType};

/// The issuer of a legacy identity document: name and country only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct IdDocumentIssuer {
    name: Option<Name>,
    country: Option<CountryCode>,
}

impl IdDocumentIssuer {
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

    pub fn set_country(mut self, country: CountryCode) -> Self {
        self.country = Some(country);
        self
    }

    pub fn country(&self) -> Option<&CountryCode> {
        self.country.as_ref()
    }
}

impl TryFrom<Json> for IdDocumentIssuer {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("an issuer must be a JSON object")
        };
        Ok(Self {
            name: member_opt(&object, "name")?,
            country: member_opt(&object, "country")?,
        })
    }
}

impl From<IdDocumentIssuer> for Json {
    fn from(value: IdDocumentIssuer) -> Self {
        let mut object = Map::default();
        if let Some(name) = value.name {
            object.insert("name".to_owned(), name.into());
        }
        if let Some(country) = value.country {
            object.insert("country".to_owned(), country.into());
        }
        object.into()
    }
}

/// The `document` member of [`IdDocumentEvidence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct IdDocumentDescription {
    document_type: DocumentType,
    number: Option<DocumentNumber>,
    issuer: Option<IdDocumentIssuer>,
    date_of_issuance: Option<SimpleDate>,
    date_of_expiry: Option<SimpleDate>,
}

impl IdDocumentDescription {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            number: None,
            issuer: None,
            date_of_issuance: None,
            date_of_expiry: None,
        }
    }

    pub fn document_type(&self) -> &DocumentType {
        &self.document_type
    }

    pub fn set_number(mut self, number: DocumentNumber) -> Self {
        self.number = Some(number);
        self
    }

    pub fn number(&self) -> Option<&DocumentNumber> {
        self.number.as_ref()
    }

    pub fn set_issuer(mut self, issuer: IdDocumentIssuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn issuer(&self) -> Option<&IdDocumentIssuer> {
        self.issuer.as_ref()
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
}

impl TryFrom<Json> for IdDocumentDescription {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("a document description must be a JSON object")
        };
        Ok(Self {
            document_type: member(&object, "type")?,
            number: member_opt(&object, "number")?,
            issuer: member_opt(&object, "issuer")?,
            date_of_issuance: member_opt(&object, "date_of_issuance")?,
            date_of_expiry: member_opt(&object, "date_of_expiry")?,
        })
    }
}

impl From<IdDocumentDescription> for Json {
    fn from(value: IdDocumentDescription) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), value.document_type.into());
        if let Some(number) = value.number {
            object.insert("number".to_owned(), number.into());
        }
        if let Some(issuer) = value.issuer {
            object.insert("issuer".to_owned(), issuer.into());
        }
        if let Some(date_of_issuance) = value.date_of_issuance {
            object.insert("date_of_issuance".to_owned(), date_of_issuance.into());
        }
        if let Some(date_of_expiry) = value.date_of_expiry {
            object.insert("date_of_expiry".to_owned(), date_of_expiry.into());
        }
        object.into()
    }
}

/// Evidence based on an identity document (deprecated wire form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct IdDocumentEvidence {
    method: Option<IdentityVerificationMethod>,
    verifier: Option<IdentityVerifier>,
    time: Option<DateWithTimeZoneOffset>,
    document: Option<IdDocumentDescription>,
}

impl IdDocumentEvidence {
    pub fn new() -> Self {
        Self::default()
    }

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

    pub fn set_document(mut self, document: IdDocumentDescription) -> Self {
        self.document = Some(document);
        self
    }

    pub fn document(&self) -> Option<&IdDocumentDescription> {
        self.document.as_ref()
    }
}

impl TryFrom<Json> for IdDocumentEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::IdDocument)?;
        Ok(Self {
            method: member_opt(&object, "method")?,
            verifier: member_opt(&object, "verifier")?,
            time: member_opt(&object, "time")?,
            document: member_opt(&object, "document")?,
        })
    }
}

impl From<IdDocumentEvidence> for Json {
    fn from(value: IdDocumentEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::IdDocument.into());
        if let Some(method) = value.method {
            object.insert("method".to_owned(), method.into());
        }
        if let Some(verifier) = value.verifier {
            object.insert("verifier".to_owned(), verifier.into());
        }
        if let Some(time) = value.time {
            object.insert("time".to_owned(), time.into());
        }
        if let Some(document) = value.document {
            object.insert("document".to_owned(), document.into());
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
            "type": "id_document",
            "method": "pipp",
            "time": "2012-04-22T11:30:00Z",
            "document": {
                "type": "idcard",
                "issuer": {
                    "name": "Stadt Augsburg",
                    "country": "DE"
                },
                "number": "53554554",
                "date_of_issuance": "2010-03-23",
                "date_of_expiry": "2020-03-22"
            }
        })
    }

    #[test]
    fn parses_the_legacy_example() {
        let evidence = IdDocumentEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(evidence.method(), Some(&IdentityVerificationMethod::Pipp));
        let document = evidence.document().unwrap();
        assert_eq!(document.document_type(), &DocumentType::Idcard);
        assert_eq!(document.number().unwrap().as_str(), "53554554");
        assert_eq!(document.issuer().unwrap().country().unwrap().as_str(), "DE");
    }

    #[test]
    fn round_trip() {
        let evidence = IdDocumentEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(Json::from(evidence), evidence_json());
    }

    #[test]
    fn document_type_is_mandatory() {
        let err = IdDocumentDescription::try_from(json!({ "number": "1234" })).unwrap_err();
        assert_eq!(err.to_string(), "'type' is missing");
    }
}
