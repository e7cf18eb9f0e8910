use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StoreBackend,
    /// Required when the backend is Postgres.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub seed_demo: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let backend = match env_or("ROSTER_STORE", "memory").as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres,
            other => return Err(format!("Invalid ROSTER_STORE: {other}")),
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if backend == StoreBackend::Postgres && database_url.is_none() {
            return Err("DATABASE_URL is required when ROSTER_STORE=postgres".to_string());
        }

        let host: IpAddr = env_or("ROSTER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_HOST: {e}"))?;

        let port: u16 = env_or("ROSTER_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_PORT: {e}"))?;

        let max_body_size: usize = env_or("ROSTER_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid ROSTER_MAX_BODY_SIZE: {e}"))?;

        let seed_demo = env_or("ROSTER_SEED_DEMO", "false") == "true";

        let log_level = env_or("ROSTER_LOG_LEVEL", "info");

        Ok(Config {
            backend,
            database_url,
            host,
            port,
            max_body_size,
            seed_demo,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
