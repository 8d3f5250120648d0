use std::sync::Arc;

use async_trait::async_trait;
use skyfare_core::{DateRangeCriteria, ProviderError, ProviderResponse, SearchCriteria, TravelProvider};
use tracing::{debug, info};

use crate::amadeus::{ProviderClient, QueryParams};
use crate::pool::BlockingPool;

const MAX_OFFERS: u32 = 10;
const DATE_SEARCH_CURRENCY: &str = "KRW";
const DATE_SEARCH_MAX_PRICE: u32 = 2_000_000;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Provider backed by a real vendor client. Each call runs on the blocking pool.
pub struct LiveProvider<C> {
    client: Arc<C>,
    pool: BlockingPool,
}

impl<C: ProviderClient> LiveProvider<C> {
    pub fn new(client: Arc<C>, pool: BlockingPool) -> Self {
        Self { client, pool }
    }

    async fn dispatch<F>(&self, call: F) -> Result<ProviderResponse, ProviderError>
    where
        F: FnOnce(&C) -> Result<ProviderResponse, ProviderError> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        debug!("Dispatching provider call, {} worker slot(s) free", self.pool.available());
        self.pool.run(move || call(client.as_ref())).await
    }
}

pub(crate) fn offer_params(criteria: &SearchCriteria) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("originLocationCode", criteria.origin.clone());
    params.insert("destinationLocationCode", criteria.destination.clone());
    params.insert("departureDate", criteria.departure_date.format(DATE_FORMAT).to_string());
    params.insert("adults", criteria.adults.to_string());
    params.insert("currencyCode", criteria.currency.clone());
    params.insert("max", MAX_OFFERS.to_string());
    if let Some(return_date) = criteria.return_date {
        params.insert("returnDate", return_date.format(DATE_FORMAT).to_string());
    }
    params
}

pub(crate) fn date_params(criteria: &DateRangeCriteria) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("origin", criteria.origin.clone());
    params.insert("destination", criteria.destination.clone());
    params.insert("departureDate", criteria.departure_date.format(DATE_FORMAT).to_string());
    params.insert("oneWay", false.to_string());
    params.insert("currency", DATE_SEARCH_CURRENCY.to_string());
    params.insert("maxPrice", DATE_SEARCH_MAX_PRICE.to_string());
    if let Some(days) = criteria.duration {
        params.insert("duration", days.to_string());
    }
    params
}

pub(crate) fn location_params(iata_code: &str) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("keyword", iata_code.to_string());
    params.insert("subType", "AIRPORT".to_string());
    params
}

#[async_trait]
impl<C: ProviderClient> TravelProvider for LiveProvider<C> {
    async fn search_offers(&self, criteria: &SearchCriteria) -> Result<ProviderResponse, ProviderError> {
        info!("Searching flight offers: {} -> {}", criteria.origin, criteria.destination);
        let params = offer_params(criteria);
        self.dispatch(move |client| client.flight_offers(&params)).await
    }

    async fn search_dates(&self, criteria: &DateRangeCriteria) -> Result<ProviderResponse, ProviderError> {
        info!("Searching cheapest dates: {} -> {}", criteria.origin, criteria.destination);
        let params = date_params(criteria);
        self.dispatch(move |client| client.flight_dates(&params)).await
    }

    async fn lookup_airport(&self, iata_code: &str) -> Result<ProviderResponse, ProviderError> {
        info!("Getting airport info for: {}", iata_code);
        let params = location_params(iata_code);
        self.dispatch(move |client| client.locations(&params)).await
    }

    fn provider_name(&self) -> &'static str {
        "amadeus"
    }

    fn is_live(&self) -> bool {
        true
    }
}
