pub mod amadeus;
pub mod app_config;
pub mod dummy;
pub mod live;
pub mod pool;
pub mod service;

pub use amadeus::{AmadeusClient, ProviderClient, QueryParams};
pub use dummy::DummyProvider;
pub use live::LiveProvider;
pub use pool::BlockingPool;
pub use service::FlightService;
