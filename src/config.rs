use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub citizen_api_url: String,
    pub admin_api_key: Option<String>,
    /// Where the admin login's "Switch to Citizen Portal" button leads
    pub citizen_portal_url: Option<String>,
    pub environment: String,
    pub enable_logging: bool,
    pub query_config: QueryConfig,
    pub ui_config: UIConfig,
    pub map_config: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            citizen_api_url: "http://127.0.0.1:8000".to_string(),
            admin_api_key: None,
            citizen_portal_url: None,
            environment: "development".to_string(),
            enable_logging: true,
            query_config: QueryConfig::default(),
            ui_config: UIConfig::default(),
            map_config: MapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub retry: u32,
    pub retry_delay_ms: u32,
    pub stale_time_ms: i64,
    pub refetch_on_focus: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            retry: 1,
            retry_delay_ms: 1000,
            stale_time_ms: 0,
            refetch_on_focus: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub guard_delay_ms: u32,
    pub toast_duration_ms: u32,
    pub location_error_clear_ms: u32,
    pub reports_per_page: usize,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            guard_delay_ms: 100,
            toast_duration_ms: 4000,
            location_error_clear_ms: 5000,
            reports_per_page: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub admin_center_lat: f64,
    pub admin_center_lng: f64,
    pub citizen_center_lat: f64,
    pub citizen_center_lng: f64,
    pub overview_zoom: f64,
    pub picker_zoom: f64,
    pub default_radius_km: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            admin_center_lat: 28.6139,
            admin_center_lng: 77.2090,
            citizen_center_lat: 28.4744,
            citizen_center_lng: 77.5041,
            overview_zoom: 12.0,
            picker_zoom: 13.0,
            default_radius_km: 10.0,
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let query = QueryConfig::default();
        let ui = UIConfig::default();

        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            citizen_api_url: option_env!("CITIZEN_API_URL")
                .map(str::to_string)
                .unwrap_or(defaults.citizen_api_url),
            admin_api_key: option_env!("ADMIN_API_KEY")
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            citizen_portal_url: option_env!("CITIZEN_PORTAL_URL")
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            query_config: QueryConfig {
                retry: option_env!("QUERY_RETRY")
                    .unwrap_or("1").parse().unwrap_or(query.retry),
                retry_delay_ms: option_env!("QUERY_RETRY_DELAY_MS")
                    .unwrap_or("1000").parse().unwrap_or(query.retry_delay_ms),
                ..query
            },
            ui_config: UIConfig {
                guard_delay_ms: option_env!("GUARD_DELAY_MS")
                    .unwrap_or("100").parse().unwrap_or(ui.guard_delay_ms),
                toast_duration_ms: option_env!("TOAST_DURATION_MS")
                    .unwrap_or("4000").parse().unwrap_or(ui.toast_duration_ms),
                ..ui
            },
            map_config: MapConfig::default(),
        }
    }

    /// Log level for wasm-logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
