pub const DEFAULT_MAP_API_BASE_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Everything the components need to reach the outside world.
/// Handed down explicitly; nothing in this crate reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub map_api_key: String,
    pub map_api_base_url: String,
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>, map_api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            map_api_key: map_api_key.into(),
            map_api_base_url: DEFAULT_MAP_API_BASE_URL.into(),
        }
    }

    pub fn with_map_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.map_api_base_url = url.into();
        self
    }

    pub fn create_trip_url(&self) -> String {
        format!("{}/create-trip/", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, "")
    }
}
