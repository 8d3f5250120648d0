use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::search::{DateRangeCriteria, SearchCriteria};

/// Raw reply from a travel-data provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub dictionaries: Option<Value>,
}

impl ProviderResponse {
    pub fn new(data: Vec<Value>) -> Self {
        Self { data, ..Default::default() }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with an error it described itself.
    #[error("provider returned {status}: {description}")]
    Api { status: u16, description: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider worker failed: {0}")]
    WorkerFailed(String),
}

/// The three lookups every travel-data source must answer.
#[async_trait]
pub trait TravelProvider: Send + Sync {
    /// Search bookable flight offers.
    async fn search_offers(&self, criteria: &SearchCriteria) -> Result<ProviderResponse, ProviderError>;

    /// Search the cheapest travel dates on a route.
    async fn search_dates(&self, criteria: &DateRangeCriteria) -> Result<ProviderResponse, ProviderError>;

    /// Find airports matching an IATA code. An unknown code yields an empty response.
    async fn lookup_airport(&self, iata_code: &str) -> Result<ProviderResponse, ProviderError>;

    /// Short name used in logs.
    fn provider_name(&self) -> &'static str;

    /// Whether calls reach a real provider.
    fn is_live(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_response_decodes_partial_body() {
        let json = r#"{"data":[{"type":"flight-offer","id":"1"}]}"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);
        assert!(response.meta.is_none());
        assert!(response.dictionaries.is_none());
    }

    #[test]
    fn test_provider_response_without_data_is_empty() {
        let response: ProviderResponse = serde_json::from_str(r#"{"meta":{"count":0}}"#).unwrap();
        assert!(response.is_empty());
        assert_eq!(response.meta.unwrap()["count"], 0);
    }
}
