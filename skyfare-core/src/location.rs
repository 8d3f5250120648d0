use serde::{Deserialize, Serialize};

/// Airport reference record, shaped like the provider's location resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub sub_type: String,
    pub name: String,
    pub iata_code: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city_name: String,
    pub country_name: String,
    pub country_code: String,
}

impl AirportRecord {
    pub fn airport(iata_code: &str, name: &str, city_name: &str, country_name: &str, country_code: &str) -> Self {
        Self {
            record_type: "location".to_string(),
            sub_type: "AIRPORT".to_string(),
            name: name.to_string(),
            iata_code: iata_code.to_string(),
            address: Address {
                city_name: city_name.to_string(),
                country_name: country_name.to_string(),
                country_code: country_code.to_string(),
            },
        }
    }
}
