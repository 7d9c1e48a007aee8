//! Validation and verification method descriptors.
//!
//! Validation establishes that evidence is genuine; verification establishes
//! that it belongs to the person. Both descriptors carry the same optional
//! `policy`/`procedure`/`status` members, shared here through an embedded
//! [`CommonMethodAttributes`] rather than a type hierarchy.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::identifier::{MethodStatus, Policy, Procedure};
use crate::core::object::{member, member_opt, TypedParameter};
use crate::core::wire_string_enum;

wire_string_enum! {
    /// How the authenticity of evidence was determined.
    ValidationMethodType {
        /// Physical evidence inspected in person.
        Vpip => "vpip",
        /// Physical evidence inspected in person with specialist light
        /// equipment.
        Vpiruv => "vpiruv",
        /// Physical evidence validated remotely from an image or video.
        Vri => "vri",
        /// Digital evidence validated by inspection of its properties.
        Vdig => "vdig",
        /// Digital evidence validated cryptographically.
        Vcrypt => "vcrypt",
        /// Found data checked against an authoritative source.
        Data => "data",
    }
}

wire_string_enum! {
    /// How evidence was bound to the person being verified.
    VerificationMethodType {
        /// Electronic authentication, e.g. against an eID.
        Auth => "auth",
        /// Possession of a token or one-time code.
        Token => "token",
        /// Knowledge-based verification.
        Kbv => "kbv",
        /// Physical comparison with the evidence in person.
        Pvp => "pvp",
        /// Physical comparison with the evidence remotely.
        Pvr => "pvr",
        /// Biometric comparison in person.
        Bvp => "bvp",
        /// Biometric comparison remotely.
        Bvr => "bvr",
    }
}

wire_string_enum! {
    /// The legacy `method` member describing how an identity document was
    /// verified, used by the deprecated `id_document` evidence and retained
    /// on `document` evidence for wire compatibility.
    IdentityVerificationMethod {
        /// Physical in-person proofing.
        Pipp => "pipp",
        /// Supervised remote in-person proofing.
        Sripp => "sripp",
        /// Online verification of an electronic identity card.
        Eid => "eid",
        /// Unsupervised remote in-person proofing.
        Uripp => "uripp",
    }
}

/// Optional members shared by [`ValidationMethod`] and [`VerificationMethod`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonMethodAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    procedure: Option<Procedure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<MethodStatus>,
}

impl CommonMethodAttributes {
    pub(crate) fn from_object(object: &Map<String, Json>) -> Result<Self> {
        Ok(Self {
            policy: member_opt(object, "policy")?,
            procedure: member_opt(object, "procedure")?,
            status: member_opt(object, "status")?,
        })
    }

    pub(crate) fn write_into(&self, object: &mut Map<String, Json>) {
        if let Some(policy) = &self.policy {
            object.insert("policy".to_owned(), policy.clone().into());
        }
        if let Some(procedure) = &self.procedure {
            object.insert("procedure".to_owned(), procedure.clone().into());
        }
        if let Some(status) = &self.status {
            object.insert("status".to_owned(), status.clone().into());
        }
    }

    pub fn policy(&self) -> Option<&Policy> {
        self.policy.as_ref()
    }

    pub fn procedure(&self) -> Option<&Procedure> {
        self.procedure.as_ref()
    }

    pub fn status(&self) -> Option<&MethodStatus> {
        self.status.as_ref()
    }
}

/// The `validation_method` member of an evidence record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct ValidationMethod {
    method_type: ValidationMethodType,
    attributes: CommonMethodAttributes,
}

impl ValidationMethod {
    pub fn new(method_type: ValidationMethodType) -> Self {
        Self {
            method_type,
            attributes: CommonMethodAttributes::default(),
        }
    }

    pub fn method_type(&self) -> &ValidationMethodType {
        &self.method_type
    }

    pub fn attributes(&self) -> &CommonMethodAttributes {
        &self.attributes
    }

    pub fn set_policy(mut self, policy: Policy) -> Self {
        self.attributes.policy = Some(policy);
        self
    }

    pub fn set_procedure(mut self, procedure: Procedure) -> Self {
        self.attributes.procedure = Some(procedure);
        self
    }

    pub fn set_status(mut self, status: MethodStatus) -> Self {
        self.attributes.status = Some(status);
        self
    }
}

impl TypedParameter for ValidationMethod {
    const KEY: &'static str = "validation_method";
}

impl TryFrom<Json> for ValidationMethod {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            anyhow::bail!("a validation method must be a JSON object")
        };
        Ok(Self {
            method_type: member(&object, "type")?,
            attributes: CommonMethodAttributes::from_object(&object)?,
        })
    }
}

impl From<ValidationMethod> for Json {
    fn from(value: ValidationMethod) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), value.method_type.into());
        value.attributes.write_into(&mut object);
        object.into()
    }
}

/// The `verification_method` member of an evidence record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct VerificationMethod {
    method_type: VerificationMethodType,
    attributes: CommonMethodAttributes,
}

impl VerificationMethod {
    pub fn new(method_type: VerificationMethodType) -> Self {
        Self {
            method_type,
            attributes: CommonMethodAttributes::default(),
        }
    }

    pub fn method_type(&self) -> &VerificationMethodType {
        &self.method_type
    }

    pub fn attributes(&self) -> &CommonMethodAttributes {
        &self.attributes
    }

    pub fn set_policy(mut self, policy: Policy) -> Self {
        self.attributes.policy = Some(policy);
        self
    }

    pub fn set_procedure(mut self, procedure: Procedure) -> Self {
        self.attributes.procedure = Some(procedure);
        self
    }

    pub fn set_status(mut self, status: MethodStatus) -> Self {
        self.attributes.status = Some(status);
        self
    }
}

impl TypedParameter for VerificationMethod {
    const KEY: &'static str = "verification_method";
}

impl TryFrom<Json> for VerificationMethod {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            anyhow::bail!("a verification method must be a JSON object")
        };
        Ok(Self {
            method_type: member(&object, "type")?,
            attributes: CommonMethodAttributes::from_object(&object)?,
        })
    }
}

impl From<VerificationMethod> for Json {
    fn from(value: VerificationMethod) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), value.method_type.into());
        value.attributes.write_into(&mut object);
        object.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_method_round_trip() {
        let method = ValidationMethod::new(ValidationMethodType::Vpip)
            .set_policy(Policy::new("gpg45").unwrap())
            .set_procedure(Procedure::new("score_3").unwrap());
        let json = Json::from(method.clone());
        assert_eq!(
            json,
            json!({ "type": "vpip", "policy": "gpg45", "procedure": "score_3" })
        );
        assert_eq!(ValidationMethod::try_from(json).unwrap(), method);
    }

    #[test]
    fn type_is_mandatory() {
        let err = ValidationMethod::try_from(json!({ "policy": "gpg45" })).unwrap_err();
        assert_eq!(err.to_string(), "'type' is missing");
    }

    #[test]
    fn unknown_method_types_are_preserved() {
        let method = VerificationMethod::try_from(json!({ "type": "future_method" })).unwrap();
        assert_eq!(
            method.method_type(),
            &VerificationMethodType::Other("future_method".to_owned())
        );
        assert_eq!(Json::from(method), json!({ "type": "future_method" }));
    }

    #[test]
    fn absent_attributes_are_omitted() {
        let method = VerificationMethod::new(VerificationMethodType::Bvr);
        assert_eq!(Json::from(method), json!({ "type": "bvr" }));
    }
}
