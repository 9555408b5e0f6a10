use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::reporting::metrics::{DEFAULT_FLOOR_AREA_M2, DEFAULT_LIFE_CYCLE_YEARS};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the dashboard.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub building: BuildingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_database_url(None)
    }

    /// Like [`AppConfig::load`], but a supplied URL replaces `DB_URL`.
    pub fn load_with_database_url(database_url: Option<String>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let database_url = database_url
            .or_else(|| env::var("DB_URL").ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let floor_area_m2 = match env::var("FLOOR_AREA_M2") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|area| area.is_finite() && *area > 0.0)
                .ok_or(ConfigError::InvalidFloorArea)?,
            Err(_) => DEFAULT_FLOOR_AREA_M2,
        };

        let life_cycle_years = match env::var("LIFE_CYCLE_YEARS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|years| *years > 0)
                .ok_or(ConfigError::InvalidLifeCycleYears)?,
            Err(_) => DEFAULT_LIFE_CYCLE_YEARS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig { database_url },
            building: BuildingConfig {
                floor_area_m2,
                life_cycle_years,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the yearly, comfort, and cost tables live.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub database_url: String,
}

/// Fixed properties of the reported building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingConfig {
    pub floor_area_m2: f64,
    /// Horizon for the undiscounted life-cycle cost projection.
    pub life_cycle_years: u32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floor_area_m2: DEFAULT_FLOOR_AREA_M2,
            life_cycle_years: DEFAULT_LIFE_CYCLE_YEARS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingDatabaseUrl,
    InvalidFloorArea,
    InvalidLifeCycleYears,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingDatabaseUrl => {
                write!(f, "DB_URL must point at the dashboard data store")
            }
            ConfigError::InvalidFloorArea => {
                write!(f, "FLOOR_AREA_M2 must be a positive number of square meters")
            }
            ConfigError::InvalidLifeCycleYears => {
                write!(f, "LIFE_CYCLE_YEARS must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::MissingDatabaseUrl
            | ConfigError::InvalidFloorArea
            | ConfigError::InvalidLifeCycleYears => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("DB_URL");
        env::remove_var("FLOOR_AREA_M2");
        env::remove_var("LIFE_CYCLE_YEARS");
    }

    #[test]
    fn load_uses_defaults_when_optional_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DB_URL", "sqlite://dashboard.db");

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data.database_url, "sqlite://dashboard.db");
        assert_eq!(config.building, BuildingConfig::default());
        assert_eq!(config.building.floor_area_m2, 18_000.0);
        assert_eq!(config.building.life_cycle_years, 20);
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let err = AppConfig::load().expect_err("DB_URL is required");
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn explicit_database_url_wins_over_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DB_URL", "csv://data");

        let config = AppConfig::load_with_database_url(Some("sample://".to_string()))
            .expect("override accepted");
        assert_eq!(config.data.database_url, "sample://");

        reset_env();
        let config = AppConfig::load_with_database_url(Some("sample://".to_string()))
            .expect("override stands in for missing DB_URL");
        assert_eq!(config.data.database_url, "sample://");
    }

    #[test]
    fn zero_floor_area_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DB_URL", "csv://data");
        env::set_var("FLOOR_AREA_M2", "0");

        let err = AppConfig::load().expect_err("floor area must be positive");
        assert!(matches!(err, ConfigError::InvalidFloorArea));
    }

    #[test]
    fn building_overrides_are_parsed() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DB_URL", "csv://data");
        env::set_var("FLOOR_AREA_M2", "12500.5");
        env::set_var("LIFE_CYCLE_YEARS", "30");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.building.floor_area_m2, 12_500.5);
        assert_eq!(config.building.life_cycle_years, 30);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DB_URL", "csv://data");
        env::set_var("APP_HOST", "localhost");

        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}
