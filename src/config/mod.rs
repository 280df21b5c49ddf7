use std::env;

// Top-level configuration container, populated from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Booking / scheduling policy knobs
#[derive(Debug, Clone)]
pub struct BookingConfig {
    // Conservative fixed screening length used by the overlap check,
    // independent of the actual movie or event duration.
    pub overlap_window_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinebook=debug,tower_http=debug".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:cinebook.db".to_string()),
                pool_size: env::var("DB_POOL_SIZE")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .expect("DB_POOL_SIZE must be a valid number"),
            },
            booking: BookingConfig {
                overlap_window_hours: env::var("BOOKING_OVERLAP_WINDOW_HOURS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .expect("BOOKING_OVERLAP_WINDOW_HOURS must be a valid number"),
            },
        }
    }
}
