use std::sync::Arc;

use serde_json::{json, Value};
use skyfare_core::{
    DateRangeCriteria, FailureKind, ProviderError, ProviderResponse, SearchCriteria, ServiceFailure, ServicePayload,
    ServiceResult, TravelProvider,
};
use tracing::{error, info, warn};

use crate::amadeus::AmadeusClient;
use crate::app_config::{AmadeusConfig, PoolConfig};
use crate::dummy::DummyProvider;
use crate::live::LiveProvider;
use crate::pool::BlockingPool;

pub const NO_RESULTS: &str = "no results found";
pub const AIRPORT_NOT_FOUND: &str = "airport not found";
pub const UNEXPECTED_FAULT: &str = "an unexpected server error occurred";

/// Flight search facade in front of one travel provider.
///
/// Every operation returns a [`ServiceResult`]; provider errors, empty
/// replies and worker failures all come back as a tagged [`ServiceFailure`].
#[derive(Clone)]
pub struct FlightService {
    provider: Arc<dyn TravelProvider>,
}

impl FlightService {
    pub fn new(provider: Arc<dyn TravelProvider>) -> Self {
        Self { provider }
    }

    /// Live mode when both credentials are configured, canned data otherwise.
    pub fn from_config(amadeus: &AmadeusConfig, pool: &PoolConfig) -> Self {
        match AmadeusClient::from_config(amadeus, pool.timeout()) {
            Some(client) => {
                info!("FlightService initialized with Amadeus client at {}", client.base_url());
                let provider = LiveProvider::new(Arc::new(client), BlockingPool::from_config(pool));
                Self::new(Arc::new(provider))
            }
            None => {
                warn!("FlightService initialized in dummy mode - API credentials not provided");
                Self::new(Arc::new(DummyProvider))
            }
        }
    }

    pub fn is_live(&self) -> bool {
        self.provider.is_live()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub async fn search_flight_offers(&self, criteria: &SearchCriteria) -> ServiceResult {
        let response = self.provider.search_offers(criteria).await;
        self.list_result("flight offer search", response, true)
    }

    pub async fn search_cheapest_dates(&self, criteria: &DateRangeCriteria) -> ServiceResult {
        let response = self.provider.search_dates(criteria).await;
        self.list_result("cheapest date search", response, false)
    }

    /// Expects an already upper-cased code.
    pub async fn get_airport_info(&self, iata_code: &str) -> ServiceResult {
        match self.provider.lookup_airport(iata_code).await {
            Ok(response) => match response.data.into_iter().next() {
                Some(record) => Ok(ServicePayload::new(record)),
                None => Err(ServiceFailure::new(FailureKind::NotFound, AIRPORT_NOT_FOUND, json!({}))),
            },
            Err(e) => Err(self.failure("airport lookup", e, json!({}))),
        }
    }

    fn list_result(
        &self,
        operation: &str,
        response: Result<ProviderResponse, ProviderError>,
        keep_dictionaries: bool,
    ) -> ServiceResult {
        match response {
            Ok(response) if response.is_empty() => {
                Err(ServiceFailure::new(FailureKind::NotFound, NO_RESULTS, json!([])))
            }
            Ok(response) => {
                let dictionaries = if keep_dictionaries { response.dictionaries } else { None };
                let payload = ServicePayload::new(Value::Array(response.data))
                    .with_meta(response.meta)
                    .with_dictionaries(dictionaries);
                info!("{} returned {} record(s)", operation, payload.count());
                Ok(payload)
            }
            Err(e) => Err(self.failure(operation, e, json!([]))),
        }
    }

    fn failure(&self, operation: &str, err: ProviderError, empty: Value) -> ServiceFailure {
        match err {
            ProviderError::Api { status, description } => {
                error!("{} provider error ({}) during {}: {}", self.provider_name(), status, operation, description);
                ServiceFailure::new(FailureKind::ProviderError, format!("API error: {}", description), empty)
            }
            other => {
                error!("Unexpected error during {}: {}", operation, other);
                ServiceFailure::new(FailureKind::UnexpectedFault, UNEXPECTED_FAULT, empty)
            }
        }
    }
}
