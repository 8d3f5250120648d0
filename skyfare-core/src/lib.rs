pub mod search;
pub mod location;
pub mod result;
pub mod provider;

pub use location::{Address, AirportRecord};
pub use provider::{ProviderError, ProviderResponse, TravelProvider};
pub use result::{FailureKind, ServiceFailure, ServicePayload, ServiceResult};
pub use search::{DateRangeCriteria, SearchCriteria};
