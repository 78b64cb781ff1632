//! One-shot housekeeping binary: expires stale replacement requests and
//! drains bonus accounts nobody has touched for the configured window.
//! Meant to run from cron.

use std::env;

use chrono::Utc;
use config::Config;
use dotenvy::dotenv;

use tourbase::db::establish_connection_pool;
use tourbase::models::config::ServerConfig;
use tourbase::repository::DieselRepository;
use tourbase::services::maintenance;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let now = Utc::now().naive_utc();

    match maintenance::expire_replacements(&repo, now) {
        Ok(count) => log::info!("Expired {count} stale replacement requests"),
        Err(err) => log::error!("Failed to expire replacement requests: {err}"),
    }

    match maintenance::expire_bonus_points(&repo, now, server_config.bonus_expiry_days) {
        Ok(count) => log::info!("Drained {count} stale bonus accounts"),
        Err(err) => log::error!("Failed to expire bonus points: {err}"),
    }
}
