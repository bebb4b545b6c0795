use crate::domain::driver::{default_roster, DriverRecord};
use crate::domain::statistics::DEFAULT_HISTORY_CAPACITY;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub monitor: MonitorSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorSettings {
    pub history_capacity: usize,
    pub broadcast_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DriversConfig {
    #[serde(default)]
    pub drivers: Vec<DriverRecord>,
}

impl DriversConfig {
    /// Configured drivers, or the built-in roster when none are listed
    pub fn roster(self) -> Vec<DriverRecord> {
        if self.drivers.is_empty() {
            default_roster()
        } else {
            self.drivers
        }
    }
}

/// Defaults, then `config/server.toml` if present, then `DROWSY_<SECTION>__<KEY>` variables
pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    server_config_from(config::File::with_name("config/server").required(false))
}

pub fn load_drivers_config() -> anyhow::Result<DriversConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/drivers").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn server_config_from<S>(source: S) -> anyhow::Result<ServerConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000_i64)?
        .set_default("monitor.history_capacity", DEFAULT_HISTORY_CAPACITY as i64)?
        .set_default("monitor.broadcast_capacity", 256_i64)?
        .add_source(source)
        .add_source(
            config::Environment::with_prefix("DROWSY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: ServerConfig = settings.try_deserialize()?;
    anyhow::ensure!(
        config.monitor.history_capacity > 0,
        "monitor.history_capacity must be at least 1"
    );
    anyhow::ensure!(
        config.monitor.broadcast_capacity > 0,
        "monitor.broadcast_capacity must be at least 1"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_server_defaults() {
        let config = server_config_from(File::from_str("", FileFormat::Toml)).unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:5000");
        assert_eq!(config.monitor.history_capacity, 50);
        assert_eq!(config.monitor.broadcast_capacity, 256);
    }

    #[test]
    fn test_server_file_overrides_defaults() {
        let toml = r#"
            [server]
            port = 8080

            [monitor]
            history_capacity = 10
        "#;
        let config = server_config_from(File::from_str(toml, FileFormat::Toml)).unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.monitor.history_capacity, 10);
        assert_eq!(config.monitor.broadcast_capacity, 256);
    }

    #[test]
    fn test_zero_history_capacity_is_rejected() {
        let toml = "[monitor]\nhistory_capacity = 0\n";
        assert!(server_config_from(File::from_str(toml, FileFormat::Toml)).is_err());
    }

    #[test]
    fn test_empty_drivers_fall_back_to_default_roster() {
        let roster = DriversConfig::default().roster();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "John Driver");
    }

    #[test]
    fn test_drivers_from_toml() {
        let toml = r#"
            [[drivers]]
            id = 7
            name = "Ada Lane"
            vehicle = "Bus D001"
            status = "safe"
            location = "Depot"
            phone = "+1-555-0107"
        "#;
        let settings = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let roster = settings.try_deserialize::<DriversConfig>().unwrap().roster();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, 7);
        assert_eq!(roster[0].vehicle, "Bus D001");
    }
}
