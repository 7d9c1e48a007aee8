//! Typed string identifiers.
//!
//! Every semantically distinct string on the wire gets its own wrapper type,
//! so a personal number can never be assigned where a serial number is
//! expected. Equality and hashing are defined solely by the wrapped string,
//! and any non-empty string is a legal value.

use core::fmt;

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::object::TypedParameter;

fn non_empty(kind: &'static str, value: String) -> Result<String> {
    if value.is_empty() {
        bail!("{kind} must not be empty")
    }
    Ok(value)
}

macro_rules! string_identifier {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self> {
                value.into().try_into()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                non_empty($kind, value).map(Self)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<Json> for $name {
            type Error = Error;

            fn try_from(value: Json) -> Result<Self> {
                let s: String = serde_json::from_value(value)?;
                s.try_into()
            }
        }

        impl From<$name> for Json {
            fn from(value: $name) -> Self {
                Json::String(value.0)
            }
        }
    };
}

string_identifier!(
    /// A display name: of a document issuer, a record source or a voucher.
    Name,
    "a name"
);

string_identifier!(
    /// Reference number of an attestation.
    ReferenceNumber,
    "a reference number"
);

string_identifier!(
    /// National or state-issued personal number.
    PersonalNumber,
    "a personal number"
);

string_identifier!(
    /// Serial number of a document or certificate.
    SerialNumber,
    "a serial number"
);

string_identifier!(
    /// Identity document number, as printed on the document.
    DocumentNumber,
    "a document number"
);

string_identifier!(
    /// Transaction identifier assigned by a verifier to a verification
    /// transaction, opaque to this library.
    Txn,
    "a transaction identifier"
);

string_identifier!(
    /// Organization a verifier or voucher belongs to.
    Organization,
    "an organization"
);

string_identifier!(
    /// Occupation of a voucher.
    Occupation,
    "an occupation"
);

string_identifier!(
    /// Region or state in which an originator operates.
    Jurisdiction,
    "a jurisdiction"
);

string_identifier!(
    /// ICAO or ISO 3166 country code.
    CountryCode,
    "a country code"
);

string_identifier!(
    /// Issuer of a certificate underlying an electronic signature.
    Issuer,
    "an issuer"
);

string_identifier!(
    /// Standard or regulation a validation/verification method conforms to.
    Policy,
    "a policy"
);

string_identifier!(
    /// Procedure a validation/verification method followed within its policy.
    Procedure,
    "a procedure"
);

string_identifier!(
    /// Outcome of a validation/verification method.
    MethodStatus,
    "a method status"
);

string_identifier!(
    /// Identifier of the process a verification was performed under, unique
    /// to the operator of the trust framework.
    VerificationProcess,
    "a verification process"
);

string_identifier!(
    /// Assurance level asserted under a trust framework, e.g. `substantial`.
    AssuranceLevel,
    "an assurance level"
);

string_identifier!(
    /// Name of the hash algorithm used for an attachment digest, from the
    /// IANA "Named Information Hash Algorithm" registry, e.g. `sha-256`.
    HashAlg,
    "a hash algorithm"
);

string_identifier!(
    /// Type of an electronic signature, e.g. `qes_eidas`.
    SignatureType,
    "a signature type"
);

impl TypedParameter for VerificationProcess {
    const KEY: &'static str = "verification_process";
}

impl TypedParameter for AssuranceLevel {
    const KEY: &'static str = "assurance_level";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_rejected() {
        assert!(Name::new("").is_err());
        assert!(Txn::new("").is_err());
        let err = PersonalNumber::new("").unwrap_err();
        assert_eq!(err.to_string(), "a personal number must not be empty");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(
            DocumentNumber::new("123456788").unwrap(),
            DocumentNumber::new("123456788").unwrap()
        );
        assert_ne!(
            SerialNumber::new("a").unwrap(),
            SerialNumber::new("b").unwrap()
        );
    }

    #[test]
    fn display_returns_the_raw_value() {
        assert_eq!(Jurisdiction::new("RP Darmstadt").unwrap().to_string(), "RP Darmstadt");
    }

    #[test]
    fn serde_round_trip() {
        let name: Name = serde_json::from_value(serde_json::json!("Stadt Augsburg")).unwrap();
        assert_eq!(name.as_str(), "Stadt Augsburg");
        assert_eq!(Json::from(name), serde_json::json!("Stadt Augsburg"));
    }

    #[test]
    fn deserializing_an_empty_string_fails() {
        assert!(serde_json::from_value::<CountryCode>(serde_json::json!("")).is_err());
    }
}
