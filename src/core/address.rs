//! The OpenID Connect postal address claim.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// OpenID Connect address claim.
///
/// Inside identity assurance originator and voucher objects the address
/// members are not nested under an `address` key: they share the parent
/// object's flat namespace with the parent's own members. [`Address::from_flattened`]
/// and [`Address::flatten_into`] implement that encoding; callers are expected
/// to have accounted for the parent's own members first.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

/// The standard claim names of the OpenID Connect address claim, in the order
/// they are serialized.
pub const STANDARD_CLAIM_NAMES: [&str; 6] = [
    "formatted",
    "street_address",
    "locality",
    "region",
    "postal_code",
    "country",
];

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any standard address claim name occurs in `object`'s key set.
    pub fn is_present_in(object: &Map<String, Json>) -> bool {
        STANDARD_CLAIM_NAMES.iter().any(|k| object.contains_key(*k))
    }

    /// Extract an address from the flat namespace of `object`.
    ///
    /// Returns `Some` iff at least one standard address claim name is present,
    /// reading exactly those keys and nothing else. A key that happens to use
    /// a standard address claim name is folded in even if the producer meant
    /// it differently; the flattened wire encoding leaves no way to tell the
    /// difference. `object` is not modified.
    pub fn from_flattened(object: &Map<String, Json>) -> Result<Option<Self>> {
        if !Self::is_present_in(object) {
            return Ok(None);
        }
        tracing::debug!(
            "treating standard address claim names in a flattened object as an address"
        );
        let field = |key: &'static str| -> Result<Option<String>> {
            object
                .get(key)
                .cloned()
                .map(serde_json::from_value)
                .transpose()
                .context(format!("'{key}' could not be parsed"))
        };
        Ok(Some(Self {
            formatted: field("formatted")?,
            street_address: field("street_address")?,
            locality: field("locality")?,
            region: field("region")?,
            postal_code: field("postal_code")?,
            country: field("country")?,
        }))
    }

    /// Write the present address members into `object`'s flat namespace.
    pub fn flatten_into(&self, object: &mut Map<String, Json>) {
        let entries = [
            ("formatted", &self.formatted),
            ("street_address", &self.street_address),
            ("locality", &self.locality),
            ("region", &self.region),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                object.insert(key.to_owned(), Json::String(value.clone()));
            }
        }
    }

    pub fn set_formatted(mut self, formatted: String) -> Self {
        self.formatted = Some(formatted);
        self
    }

    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    pub fn set_street_address(mut self, street_address: String) -> Self {
        self.street_address = Some(street_address);
        self
    }

    pub fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    pub fn set_locality(mut self, locality: String) -> Self {
        self.locality = Some(locality);
        self
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn set_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn set_postal_code(mut self, postal_code: String) -> Self {
        self.postal_code = Some(postal_code);
        self
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn set_country(mut self, country: String) -> Self {
        self.country = Some(country);
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_object() -> Map<String, Json> {
        let Json::Object(map) = json!({
            "name": "Stadt Augsburg",
            "street_address": "Maximilianstraße 4",
            "locality": "Augsburg",
            "country": "DE"
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn carves_exactly_the_standard_claim_names() {
        let object = flat_object();
        let address = Address::from_flattened(&object).unwrap().unwrap();
        assert_eq!(address.street_address(), Some("Maximilianstraße 4"));
        assert_eq!(address.locality(), Some("Augsburg"));
        assert_eq!(address.country(), Some("DE"));
        assert_eq!(address.formatted(), None);
        // The sibling key is untouched.
        assert_eq!(object.get("name"), Some(&json!("Stadt Augsburg")));
    }

    #[test]
    fn absent_address_keys_yield_none() {
        let Json::Object(map) = json!({ "name": "Stadt Augsburg" }) else {
            unreachable!()
        };
        assert!(Address::from_flattened(&map).unwrap().is_none());
    }

    #[test]
    fn non_string_address_member_is_a_parse_error() {
        let Json::Object(map) = json!({ "locality": 42 }) else {
            unreachable!()
        };
        let err = Address::from_flattened(&map).unwrap_err();
        assert!(err.to_string().contains("'locality'"));
    }

    #[test]
    fn flatten_omits_absent_members() {
        let mut out = Map::new();
        Address::new()
            .set_locality("Köln".to_owned())
            .flatten_into(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("locality"), Some(&json!("Köln")));
    }

    #[test]
    fn flatten_then_carve_round_trips() {
        let address = Address::new()
            .set_street_address("1234 Main St".to_owned())
            .set_locality("Anytown".to_owned())
            .set_region("Anystate".to_owned())
            .set_country("US".to_owned());
        let mut out = Map::new();
        address.flatten_into(&mut out);
        assert_eq!(Address::from_flattened(&out).unwrap(), Some(address));
    }
}
