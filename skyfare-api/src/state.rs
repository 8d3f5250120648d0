use skyfare_provider::app_config::{AppInfo, CorsConfig};
use skyfare_provider::FlightService;

#[derive(Clone)]
pub struct AppState {
    pub flights: FlightService,
    pub info: AppInfo,
    pub cors: CorsConfig,
}

impl AppState {
    pub fn new(flights: FlightService) -> Self {
        Self {
            flights,
            info: AppInfo::default(),
            cors: CorsConfig::default(),
        }
    }

    pub fn with_info(mut self, info: AppInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }
}
