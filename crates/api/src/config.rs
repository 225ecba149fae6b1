//! Server configuration from the environment.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the API binds to.
    pub port: u16,
    /// Whether to load the demo catalog at startup.
    pub seed_catalog: bool,
    /// Settlement currency handed to the payment gateway.
    pub currency: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("SHOPFLOW_PORT", "8080"),
            seed_catalog: try_load("SHOPFLOW_SEED", "true"),
            currency: try_load("SHOPFLOW_CURRENCY", "usd"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("{key} not set, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
