use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result};
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub db_path: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("RUST_PORT", "3030")?,
            db_path: try_load("PROFILE_DB_PATH", "database.db")?,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse_value(key, &value)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e: T::Err| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {value}"))
}
