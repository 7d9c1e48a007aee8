//! Identity evidence records.
//!
//! Evidence is the discriminated part of the identity assurance data model:
//! every record carries a `type` member naming its kind, and the remaining
//! members depend on that kind. [`IdentityEvidence`] is the closed sum over
//! the kinds this library understands, including the deprecated wire forms
//! (`id_document`, `utility_bill`, `qes`) that earlier protocol revisions
//! used alongside their successors.

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use super::super::object::member;
use super::super::wire_string_enum;

pub mod attachment;
pub mod document;
pub mod electronic_record;
pub mod electronic_signature;
pub mod id_document;
pub mod method;
pub mod originator;
pub mod qes;
pub mod utility_bill;
pub mod verifier;
pub mod vouch;

pub use attachment::{Attachment, Digest, EmbeddedAttachment, ExternalAttachment};
pub use document::{DocumentDetails, DocumentEvidence, DocumentType};
pub use electronic_record::{
    ElectronicRecordDetails, ElectronicRecordEvidence, ElectronicRecordType,
};
pub use electronic_signature::ElectronicSignatureEvidence;
pub use id_document::{IdDocumentDescription, IdDocumentEvidence, IdDocumentIssuer};
pub use method::{
    CommonMethodAttributes, IdentityVerificationMethod, ValidationMethod, ValidationMethodType,
    VerificationMethod, VerificationMethodType,
};
pub use originator::{
    CommonOriginatorAttributes, DocumentIssuer, ElectronicRecordSource, UtilityProvider,
};
pub use qes::QesEvidence;
pub use utility_bill::UtilityBillEvidence;
pub use verifier::IdentityVerifier;
pub use vouch::{Attestation, VouchEvidence, VouchType, Voucher};

wire_string_enum! {
    /// The `type` discriminator of an identity evidence record.
    EvidenceType {
        /// Physical or electronic document, the current wire form.
        Document => "document",
        /// Data or information obtained electronically from an approved or
        /// recognized source.
        ElectronicRecord => "electronic_record",
        /// Attestation of a person's identity by another person.
        Vouch => "vouch",
        /// Electronic signature created by the person.
        ElectronicSignature => "electronic_signature",
        /// Qualified electronic signature, superseded by
        /// `electronic_signature`.
        Qes => "qes",
        /// Utility bill, superseded by `document`.
        UtilityBill => "utility_bill",
        /// Identity document, superseded by `document`.
        IdDocument => "id_document",
    }
}

/// Evidence-specific parse failures.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    /// The `type` discriminator matches no evidence kind known to this
    /// library.
    #[error("unsupported evidence type: {0}")]
    UnsupportedType(String),

    /// A variant parser was handed a record carrying another variant's
    /// discriminator.
    #[error("the identity evidence type must be '{expected}', found '{found}'")]
    TypeMismatch {
        expected: EvidenceType,
        found: EvidenceType,
    },

    /// An attachment object did not contain exactly one of `content` and
    /// `url`.
    #[error("an attachment must contain exactly one of 'content' or 'url'")]
    AmbiguousAttachment,
}

/// A single identity evidence record of any kind.
///
/// Parsing reads the `type` member and dispatches to the matching variant;
/// each variant's own parser re-checks the discriminator and does not trust
/// the dispatcher. An unknown `type` fails with
/// [`EvidenceError::UnsupportedType`] naming the offending string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub enum IdentityEvidence {
    Document(DocumentEvidence),
    ElectronicRecord(ElectronicRecordEvidence),
    Vouch(VouchEvidence),
    ElectronicSignature(ElectronicSignatureEvidence),
    Qes(QesEvidence),
    UtilityBill(UtilityBillEvidence),
    IdDocument(IdDocumentEvidence),
}

impl IdentityEvidence {
    /// The discriminator of this record's kind.
    pub fn evidence_type(&self) -> EvidenceType {
        match self {
            Self::Document(_) => EvidenceType::Document,
            Self::ElectronicRecord(_) => EvidenceType::ElectronicRecord,
            Self::Vouch(_) => EvidenceType::Vouch,
            Self::ElectronicSignature(_) => EvidenceType::ElectronicSignature,
            Self::Qes(_) => EvidenceType::Qes,
            Self::UtilityBill(_) => EvidenceType::UtilityBill,
            Self::IdDocument(_) => EvidenceType::IdDocument,
        }
    }
}

impl TryFrom<Json> for IdentityEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = &value else {
            bail!("identity evidence must be a JSON object")
        };
        let evidence_type: EvidenceType = member(object, "type")?;
        match evidence_type {
            EvidenceType::Document => DocumentEvidence::try_from(value).map(Self::Document),
            EvidenceType::ElectronicRecord => {
                ElectronicRecordEvidence::try_from(value).map(Self::ElectronicRecord)
            }
            EvidenceType::Vouch => VouchEvidence::try_from(value).map(Self::Vouch),
            EvidenceType::ElectronicSignature => {
                ElectronicSignatureEvidence::try_from(value).map(Self::ElectronicSignature)
            }
            EvidenceType::Qes => QesEvidence::try_from(value).map(Self::Qes),
            EvidenceType::UtilityBill => {
                UtilityBillEvidence::try_from(value).map(Self::UtilityBill)
            }
            EvidenceType::IdDocument => IdDocumentEvidence::try_from(value).map(Self::IdDocument),
            EvidenceType::Other(unknown) => Err(EvidenceError::UnsupportedType(unknown).into()),
        }
    }
}

impl From<IdentityEvidence> for Json {
    fn from(value: IdentityEvidence) -> Self {
        match value {
            IdentityEvidence::Document(e) => e.into(),
            IdentityEvidence::ElectronicRecord(e) => e.into(),
            IdentityEvidence::Vouch(e) => e.into(),
            IdentityEvidence::ElectronicSignature(e) => e.into(),
            IdentityEvidence::Qes(e) => e.into(),
            IdentityEvidence::UtilityBill(e) => e.into(),
            IdentityEvidence::IdDocument(e) => e.into(),
        }
    }
}

/// Take apart an evidence JSON value, enforcing its discriminator.
///
/// Returns the record's members for the variant parser to pick over. The
/// caller-supplied value is consumed, never a shared reference, so parsing
/// cannot mutate caller state.
pub(crate) fn into_checked_object(value: Json, expected: EvidenceType) -> Result<Map<String, Json>> {
    let Json::Object(object) = value else {
        bail!("identity evidence must be a JSON object")
    };
    let found: EvidenceType = member(&object, "type")?;
    if found != expected {
        return Err(EvidenceError::TypeMismatch { expected, found }.into());
    }
    Ok(object)
}
