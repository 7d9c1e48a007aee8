//! Utility bill evidence, the deprecated wire form superseded by `document`.

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::core::date::{DateWithTimeZoneOffset, SimpleDate};
use crate::core::object::member_opt;

use super::originator::UtilityProvider;
use super::{into_checked_object, EvidenceType};

/// Evidence based on a utility bill (deprecated wire form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub struct UtilityBillEvidence {
    provider: Option<UtilityProvider>,
    date: Option<SimpleDate>,
    time: Option<DateWithTimeZoneOffset>,
}

impl UtilityBillEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_provider(mut self, provider: UtilityProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn provider(&self) -> Option<&UtilityProvider> {
        self.provider.as_ref()
    }

    /// The date the utility bill was issued.
    pub fn set_date(mut self, date: SimpleDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn date(&self) -> Option<&SimpleDate> {
        self.date.as_ref()
    }

    /// When the utility bill was checked.
    pub fn set_time(mut self, time: DateWithTimeZoneOffset) -> Self {
        self.time = Some(time);
        self
    }

    pub fn time(&self) -> Option<&DateWithTimeZoneOffset> {
        self.time.as_ref()
    }
}

impl TryFrom<Json> for UtilityBillEvidence {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let object = into_checked_object(value, EvidenceType::UtilityBill)?;
        Ok(Self {
            provider: member_opt(&object, "provider")?,
            date: member_opt(&object, "date")?,
            time: member_opt(&object, "time")?,
        })
    }
}

impl From<UtilityBillEvidence> for Json {
    fn from(value: UtilityBillEvidence) -> Self {
        let mut object = Map::default();
        object.insert("type".to_owned(), EvidenceType::UtilityBill.into());
        if let Some(provider) = value.provider {
            object.insert("provider".to_owned(), provider.into());
        }
        if let Some(date) = value.date {
            object.insert("date".to_owned(), date.into());
        }
        if let Some(time) = value.time {
            object.insert("time".to_owned(), time.into());
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
            "type": "utility_bill",
            "provider": {
                "name": "Stadtwerke Musterstadt",
                "country_code": "DE",
                "region": "Thüringen",
                "street_address": "Energiestrasse 33"
            },
            "date": "2013-01-31"
        })
    }

    #[test]
    fn provider_address_is_carved_from_the_flat_namespace() {
        let evidence = UtilityBillEvidence::try_from(evidence_json()).unwrap();
        let provider = evidence.provider().unwrap();
        assert_eq!(provider.name().unwrap().as_str(), "Stadtwerke Musterstadt");
        assert_eq!(provider.country_code().unwrap().as_str(), "DE");
        let address = provider.address().unwrap();
        assert_eq!(address.region(), Some("Thüringen"));
        assert_eq!(address.street_address(), Some("Energiestrasse 33"));
    }

    #[test]
    fn round_trip() {
        let evidence = UtilityBillEvidence::try_from(evidence_json()).unwrap();
        assert_eq!(Json::from(evidence), evidence_json());
    }
}
