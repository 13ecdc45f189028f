use std::env;

/// Placeholder shipped in sample `.env` files; treated as "no key".
const WEATHER_KEY_PLACEHOLDER: &str = "your_key_here";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Postgres URL. `None` runs the server on in-memory stores.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub environment: String,
    pub session_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub weather_api_key: Option<String>,
    pub weather_api_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| "Invalid DB_MAX_CONNECTIONS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| crate::constants::SESSION_TTL_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid SESSION_TTL_SECS")?;

        let bcrypt_cost: u32 = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| crate::constants::BCRYPT_COST.to_string())
            .parse()
            .map_err(|_| "Invalid BCRYPT_COST")?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err("BCRYPT_COST must be between 4 and 31".to_string());
        }

        let weather_api_key = env::var("WEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty() && key != WEATHER_KEY_PLACEHOLDER);

        let weather_api_url = env::var("WEATHER_API_URL").unwrap_or_else(|_| {
            "https://api.openweathermap.org/data/2.5/weather".to_string()
        });

        Ok(Config {
            server_host,
            server_port,
            database_url,
            db_max_connections,
            environment,
            session_ttl_secs,
            bcrypt_cost,
            weather_api_key,
            weather_api_url,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Session cookies carry the `Secure` flag only in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
