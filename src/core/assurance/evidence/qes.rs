//! Qualified electronic signature evidence, the deprecated wire form
//! superseded by `electronic_signature`.
//!
//! Kept as a distinct variant: producers on earlier protocol revisions still
//! emit it, and wire compatibility with both generations is required.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::date::DateWithTimeZoneOffset;
use crate::core::identifier::{Issuer, SerialNumber};
use crate::core::object::member_opt;

use super::{into_checked_object, EvidenceType};

/// Evidence based on a qualified electronic signature (deprecated wire
/// form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct QesEvidence {
    issuer: Option<Issuer>,
    serial_number: Option<SerialNumber>,
    created_at: Option<DateWithTimeZoneOffset>,
}

impl QesEvidence {
    pub fn new() -> Self {
        Self::default()
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
}

impl TryFrom<Json> for QesEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::Qes)?;
        Ok(Self {
            issuer: member_opt(&object, "issuer")?,
            serial_number: member_opt(&object, "serial_number")?,
            created_at: member_opt(&object, "created_at")?,
        })
    }
}

impl From<QesEvidence> for Json {
    fn from(value: QesEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::Qes.into());
        if let Some(issuer) = value.issuer {
            object.insert("issuer".to_owned(), issuer.into());
        }
        if let Some(serial_number) = value.serial_number {
            object.insert("serial_number".to_owned(), serial_number.into());
        }
        if let Some(created_at) = value.created_at {
            object.insert("created_at".to_owned(), created_at.into());
        }
        object.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip() {
        let json = json!({
            "type": "qes",
            "issuer": "TrustCenter X",
            "serial_number": "1234567890",
            "created_at": "2019-12-01T09:22:00Z"
        });
        let evidence = QesEvidence::try_from(json.clone()).unwrap();
        assert_eq!(evidence.issuer().unwrap().as_str(), "TrustCenter X");
        assert_eq!(Json::from(evidence), json);
    }

    #[test]
    fn discriminator_is_rechecked() {
        let err = QesEvidence::try_from(json!({ "type": "electronic_signature" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the identity evidence type must be 'qes', found 'electronic_signature'"
        );
    }
}
