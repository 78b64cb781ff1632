//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub secret: String,
    /// Lifetime of issued access tokens, in hours.
    pub token_ttl_hours: i64,
    /// Days of bonus account inactivity after which points expire.
    pub bonus_expiry_days: i64,
}
