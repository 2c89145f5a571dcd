use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout applied to every catalog store call, in milliseconds
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,

    /// Delimiter separating tokens in multi-value ingestion fields
    #[serde(default = "default_list_delimiter")]
    pub list_delimiter: char,

    /// Optional path to a JSON array of raw media records ingested at startup
    #[serde(default)]
    pub seed_media_path: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8005
}

fn default_storage_timeout_ms() -> u64 {
    5000
}

fn default_list_delimiter() -> char {
    ','
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = envy::from_iter::<_, Config>(std::iter::empty::<(String, String)>())
            .expect("defaults should satisfy every field");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8005);
        assert_eq!(config.storage_timeout_ms, 5000);
        assert_eq!(config.list_delimiter, ',');
        assert!(config.seed_media_path.is_none());
    }
}
