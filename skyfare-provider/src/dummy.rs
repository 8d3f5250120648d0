use async_trait::async_trait;
use serde_json::{json, Value};
use skyfare_core::{AirportRecord, DateRangeCriteria, ProviderError, ProviderResponse, SearchCriteria, TravelProvider};

const PRICE_TOTAL: &str = "280000";
const PRICE_BASE: &str = "250000";

/// Fixed sample date; does not follow the requested departure.
pub const SAMPLE_RETURN_DATE: &str = "2025-08-18";

/// (IATA code, name, city, country, country code)
const AIRPORTS: [(&str, &str, &str, &str, &str); 3] = [
    ("ICN", "Incheon International Airport", "Seoul", "South Korea", "KR"),
    ("NRT", "Narita International Airport", "Tokyo", "Japan", "JP"),
    ("HND", "Haneda International Airport", "Tokyo", "Japan", "JP"),
];

/// Exact, case-sensitive lookup in the built-in airport table.
pub fn find_airport(iata_code: &str) -> Option<AirportRecord> {
    AIRPORTS
        .iter()
        .find(|(code, ..)| *code == iata_code)
        .map(|(code, name, city, country, country_code)| {
            AirportRecord::airport(code, name, city, country, country_code)
        })
}

/// Canned data used when no provider credentials are configured.
/// Output depends only on the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyProvider;

fn sample_offer(criteria: &SearchCriteria) -> Value {
    let origin = &criteria.origin;
    let destination = &criteria.destination;
    let date = criteria.departure_date.format("%Y-%m-%d").to_string();
    let price = json!({
        "currency": criteria.currency,
        "total": PRICE_TOTAL,
        "base": PRICE_BASE,
    });

    json!({
        "type": "flight-offer",
        "id": format!("dummy-{}-{}-{}", origin, destination, date),
        "source": "GDS",
        "itineraries": [{
            "duration": "PT2H30M",
            "segments": [{
                "departure": { "iataCode": origin, "at": format!("{}T09:00:00", date) },
                "arrival": { "iataCode": destination, "at": format!("{}T11:30:00", date) },
                "carrierCode": "KE",
                "number": "704",
            }],
        }],
        "price": price.clone(),
        "travelerPricings": [{
            "travelerId": "1",
            "fareOption": "STANDARD",
            "travelerType": "ADULT",
            "price": price,
        }],
    })
}

fn sample_flight_date(criteria: &DateRangeCriteria) -> Value {
    json!({
        "type": "flight-date",
        "origin": criteria.origin,
        "destination": criteria.destination,
        "departureDate": criteria.departure_date.format("%Y-%m-%d").to_string(),
        "returnDate": SAMPLE_RETURN_DATE,
        "price": { "total": PRICE_TOTAL, "currency": "KRW" },
    })
}

#[async_trait]
impl TravelProvider for DummyProvider {
    async fn search_offers(&self, criteria: &SearchCriteria) -> Result<ProviderResponse, ProviderError> {
        Ok(ProviderResponse::new(vec![sample_offer(criteria)]).with_meta(json!({ "count": 1 })))
    }

    async fn search_dates(&self, criteria: &DateRangeCriteria) -> Result<ProviderResponse, ProviderError> {
        Ok(ProviderResponse::new(vec![sample_flight_date(criteria)]).with_meta(json!({ "count": 1 })))
    }

    async fn lookup_airport(&self, iata_code: &str) -> Result<ProviderResponse, ProviderError> {
        let Some(record) = find_airport(iata_code) else {
            return Ok(ProviderResponse::default());
        };
        let value = serde_json::to_value(record).map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(ProviderResponse::new(vec![value]))
    }

    fn provider_name(&self) -> &'static str {
        "dummy"
    }

    fn is_live(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn criteria() -> SearchCriteria {
        SearchCriteria::new("ICN", "NRT", NaiveDate::from_ymd_opt(2025, 8, 15).unwrap())
    }

    #[test]
    fn test_sample_offer_itinerary() {
        let offer = sample_offer(&criteria());
        let segment = &offer["itineraries"][0]["segments"][0];

        assert_eq!(offer["id"], "dummy-ICN-NRT-2025-08-15");
        assert_eq!(offer["itineraries"][0]["duration"], "PT2H30M");
        assert_eq!(segment["departure"]["at"], "2025-08-15T09:00:00");
        assert_eq!(segment["arrival"]["iataCode"], "NRT");
        assert_eq!(segment["arrival"]["at"], "2025-08-15T11:30:00");
        assert_eq!(segment["carrierCode"], "KE");
        assert_eq!(segment["number"], "704");
    }

    #[test]
    fn test_sample_offer_uses_requested_currency() {
        let offer = sample_offer(&criteria().with_currency("JPY"));
        assert_eq!(offer["price"]["currency"], "JPY");
        assert_eq!(offer["price"]["total"], "280000");
        assert_eq!(offer["travelerPricings"][0]["price"]["currency"], "JPY");
        assert_eq!(offer["travelerPricings"][0]["travelerType"], "ADULT");
    }

    #[test]
    fn test_airport_table() {
        assert_eq!(find_airport("NRT").unwrap().address.city_name, "Tokyo");
        assert_eq!(find_airport("HND").unwrap().name, "Haneda International Airport");
        assert!(find_airport("icn").is_none());
        assert!(find_airport("KIX").is_none());
    }

    #[tokio::test]
    async fn test_unknown_airport_is_empty_response() {
        let response = DummyProvider.lookup_airport("XXX").await.unwrap();
        assert!(response.is_empty());
    }
}
