use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "KRW";

/// Criteria for a live flight-offer search.
///
/// Only the shape is checked on the way in: IATA codes are not validated and
/// origin may equal destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: NonZeroU32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl SearchCriteria {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, departure_date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date: None,
            adults: default_adults(),
            currency: default_currency(),
        }
    }

    pub fn with_return_date(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self
    }

    pub fn with_adults(mut self, adults: NonZeroU32) -> Self {
        self.adults = adults;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Criteria for a cheapest-travel-date search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    /// Trip length in days.
    #[serde(default)]
    pub duration: Option<u32>,
}

impl DateRangeCriteria {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, departure_date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            duration: None,
        }
    }

    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration = Some(days);
        self
    }
}

fn default_adults() -> NonZeroU32 {
    NonZeroU32::MIN
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_criteria_defaults() {
        let json = r#"
            {
                "origin": "ICN",
                "destination": "NRT",
                "departure_date": "2025-08-15"
            }
        "#;
        let criteria: SearchCriteria = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(criteria.origin, "ICN");
        assert_eq!(criteria.departure_date, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
        assert_eq!(criteria.return_date, None);
        assert_eq!(criteria.adults.get(), 1);
        assert_eq!(criteria.currency, "KRW");
    }

    #[test]
    fn test_search_criteria_rejects_zero_adults() {
        let json = r#"{"origin":"ICN","destination":"NRT","departure_date":"2025-08-15","adults":0}"#;
        assert!(serde_json::from_str::<SearchCriteria>(json).is_err());
    }

    #[test]
    fn test_search_criteria_rejects_bad_date() {
        let json = r#"{"origin":"ICN","destination":"NRT","departure_date":"15/08/2025"}"#;
        assert!(serde_json::from_str::<SearchCriteria>(json).is_err());
    }

    #[test]
    fn test_same_origin_and_destination_is_accepted() {
        let json = r#"{"origin":"ICN","destination":"ICN","departure_date":"2025-08-15"}"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.origin, criteria.destination);
    }

    #[test]
    fn test_date_range_duration_is_optional() {
        let json = r#"{"origin":"ICN","destination":"HND","departure_date":"2025-09-01"}"#;
        let criteria: DateRangeCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.duration, None);

        let json = r#"{"origin":"ICN","destination":"HND","departure_date":"2025-09-01","duration":4}"#;
        let criteria: DateRangeCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.duration, Some(4));
    }
}
