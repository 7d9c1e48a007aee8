//! Attributes shared by document issuers, record sources and utility
//! providers.
//!
//! These three wire objects are unrelated concepts that happen to carry the
//! same optional members, so they embed a single
//! [`CommonOriginatorAttributes`] and delegate to it. On the wire the
//! originator's postal address is not nested: its members sit in the same
//! flat namespace as `name`, `country_code` and `jurisdiction`, which is why
//! parsing carves the standard address claim names out first (see
//! [`Address::from_flattened`]).

use std::ops::Deref;

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::address::Address;
use crate::core::identifier::{CountryCode, Jurisdiction, Name};
use crate::core::object::member_opt;

/// Optional members describing the party a piece of evidence originates
/// from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct CommonOriginatorAttributes {
    name: Option<Name>,
    address: Option<Address>,
    country_code: Option<CountryCode>,
    jurisdiction: Option<Jurisdiction>,
}

impl CommonOriginatorAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_object(object: &Map<String, Json>) -> Result<Self> {
        Ok(Self {
            name: member_opt(object, "name")?,
            address: Address::from_flattened(object)?,
            country_code: member_opt(object, "country_code")?,
            jurisdiction: member_opt(object, "jurisdiction")?,
        })
    }

    pub(crate) fn write_into(&self, object: &mut Map<String, Json>) {
        if let Some(name) = &self.name {
            object.insert("name".to_owned(), name.clone().into());
        }
        if let Some(address) = &self.address {
            address.flatten_into(object);
        }
        if let Some(country_code) = &self.country_code {
            object.insert("country_code".to_owned(), country_code.clone().into());
        }
        if let Some(jurisdiction) = &self.jurisdiction {
            object.insert("jurisdiction".to_owned(), jurisdiction.clone().into());
        }
    }

    pub fn set_name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn set_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn set_country_code(mut self, country_code: CountryCode) -> Self {
        self.country_code = Some(country_code);
        self
    }

    pub fn country_code(&self) -> Option<&CountryCode> {
        self.country_code.as_ref()
    }

    pub fn set_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    pub fn jurisdiction(&self) -> Option<&Jurisdiction> {
        self.jurisdiction.as_ref()
    }
}

impl TryFrom<Json> for CommonOriginatorAttributes {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("an originator must be a JSON object")
        };
        Self::from_object(&object)
    }
}

impl From<CommonOriginatorAttributes> for Json {
    fn from(value: CommonOriginatorAttributes) -> Self {
        let mut object = Map::default();
        value.write_into(&mut object);
        object.into()
    }
}

macro_rules! originator_wrapper {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(CommonOriginatorAttributes);

        impl $name {
            pub fn new(attributes: CommonOriginatorAttributes) -> Self {
                Self(attributes)
            }

            pub fn into_attributes(self) -> CommonOriginatorAttributes {
                self.0
            }
        }

        impl From<CommonOriginatorAttributes> for $name {
            fn from(attributes: CommonOriginatorAttributes) -> Self {
                Self(attributes)
            }
        }

        impl Deref for $name {
            type Target = CommonOriginatorAttributes;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl TryFrom<Json> for $name {
            type Error = Error;

            fn try_from(value: Json) -> Result<Self> {
                value.try_into().map(Self)
            }
        }

        impl From<$name> for Json {
            fn from(value: $name) -> Self {
                value.0.into()
            }
        }
    };
}

originator_wrapper!(
    /// The `issuer` of document details.
    DocumentIssuer
);

originator_wrapper!(
    /// The `source` of electronic record details.
    ElectronicRecordSource
);

originator_wrapper!(
    /// The `provider` of a utility bill.
    UtilityProvider
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn address_members_are_carved_from_the_flat_namespace() {
        let issuer = DocumentIssuer::try_from(json!({
            "name": "Stadt Augsburg",
            "country_code": "DE",
            "jurisdiction": "Bayern",
            "street_address": "Maximilianstraße 4",
            "locality": "Augsburg"
        }))
        .unwrap();

        assert_eq!(issuer.name().unwrap().as_str(), "Stadt Augsburg");
        assert_eq!(issuer.country_code().unwrap().as_str(), "DE");
        assert_eq!(issuer.jurisdiction().unwrap().as_str(), "Bayern");
        let address = issuer.address().unwrap();
        assert_eq!(address.street_address(), Some("Maximilianstraße 4"));
        assert_eq!(address.locality(), Some("Augsburg"));
    }

    #[test]
    fn no_address_keys_means_no_address() {
        let source =
            ElectronicRecordSource::try_from(json!({ "name": "General Register Office" })).unwrap();
        assert!(source.address().is_none());
    }

    #[test]
    fn serialization_flattens_the_address() {
        let provider = UtilityProvider::new(
            CommonOriginatorAttributes::new()
                .set_name(Name::new("ACME Energy").unwrap())
                .set_address(
                    Address::new()
                        .set_street_address("1234 Main St".to_owned())
                        .set_locality("Anytown".to_owned()),
                ),
        );
        assert_eq!(
            Json::from(provider),
            json!({
                "name": "ACME Energy",
                "street_address": "1234 Main St",
                "locality": "Anytown"
            })
        );
    }

    #[test]
    fn round_trip() {
        let attributes = CommonOriginatorAttributes::new()
            .set_name(Name::new("Skatteverket").unwrap())
            .set_country_code(CountryCode::new("SE").unwrap());
        let json = Json::from(attributes.clone());
        assert_eq!(CommonOriginatorAttributes::try_from(json).unwrap(), attributes);
    }
}
